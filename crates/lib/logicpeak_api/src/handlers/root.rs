//! Liveness endpoint.

use axum::Json;

use crate::models::RootResponse;

/// `GET /` — reports that the process is up. Never touches the store.
pub async fn read_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Logic Peak API is running".into(),
    })
}
