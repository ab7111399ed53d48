//! Response bodies.

use logicpeak_core::document::DocumentId;
use serde::Serialize;

/// `GET /` body.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Body returned after a record is stored.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
    pub id: DocumentId,
}

impl CreatedResponse {
    pub fn ok(id: DocumentId) -> Self {
        Self { status: "ok", id }
    }
}

/// Listing body.
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

/// `GET /test` body. Field values are human-readable status strings.
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}
