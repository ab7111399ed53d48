//! Shared helpers for router-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use logicpeak_api::{AppState, config::ApiConfig};
use logicpeak_core::document::{Document, DocumentId};
use logicpeak_core::store::{DocumentStore, StoreError};
use serde_json::Value;
use tower::ServiceExt;

/// Store whose every operation fails as if the database were unreachable.
pub struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert(&self, _collection: &str, _body: Value) -> Result<DocumentId, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find(&self, _collection: &str, _limit: u64) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_collections(&self, _limit: u32) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    fn database_name(&self) -> Option<&str> {
        None
    }
}

/// Router over `store`; the connection string counts as set when a store is given.
pub fn app(store: Option<Arc<dyn DocumentStore>>) -> Router {
    let config = ApiConfig::new(
        "127.0.0.1",
        0,
        store.as_ref().map(|_| "postgres://localhost/logicpeak"),
        None,
    );
    logicpeak_api::router(AppState { store, config })
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    send(app, req).await
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).expect("parse JSON");
    (status, json)
}
