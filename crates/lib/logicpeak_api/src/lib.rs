//! # logicpeak_api
//!
//! HTTP API library for Logic Peak.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use logicpeak_core::store::DocumentStore;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::handlers::{chat, diagnostics, leads, root};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store; `None` when no connection string was configured.
    pub store: Option<Arc<dyn DocumentStore>>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// The configured store, or an error for data endpoints to return.
    pub fn store(&self) -> AppResult<&dyn DocumentStore> {
        self.store.as_deref().ok_or(AppError::StoreNotInitialized)
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    // Credentials cannot be combined with `*`, so every origin, method and
    // header is echoed back instead.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(root::read_root))
        .route("/test", get(diagnostics::test_database))
        .route("/leads", get(leads::list_leads).post(leads::create_lead))
        .route("/chat", post(chat::capture_chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
