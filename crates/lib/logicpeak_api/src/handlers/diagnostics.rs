//! Store diagnostics endpoint.
//!
//! Purely observational and infallible: store failures end up in the report,
//! never in the response status.

use axum::Json;
use axum::extract::State;
use logicpeak_core::store::DocumentStore;
use tracing::{debug, warn};

use crate::AppState;
use crate::models::DiagnosticsReport;

/// Collection names included in the report.
const CHECK_COLLECTION_LIMIT: u32 = 10;

/// Store error messages are cut to this many characters.
const CHECK_ERROR_CHARS: usize = 50;

/// `GET /test` — report store configuration and run a lightweight store check.
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let mut collections = Vec::new();
    let (database, connection_status) = match state.store.as_deref() {
        Some(store) => match check_store(store).await {
            Ok(names) => {
                collections = names;
                ("✅ Connected & Working".to_string(), "Connected")
            }
            Err(e) => {
                warn!(error = %e, "store check failed");
                (
                    format!("⚠️  Connected but Error: {}", truncate(&e.to_string())),
                    "Connected",
                )
            }
        },
        None => ("⚠️  Available but not initialized".to_string(), "Not Connected"),
    };

    Json(DiagnosticsReport {
        backend: "✅ Running".into(),
        database,
        database_url: set_label(state.config.database_url_set),
        database_name: set_label(state.config.database_name_set),
        connection_status: connection_status.into(),
        collections,
    })
}

async fn check_store(store: &dyn DocumentStore) -> logicpeak_core::store::Result<Vec<String>> {
    debug!(database = store.database_name().unwrap_or("unknown"), "probing store");
    store.list_collections(CHECK_COLLECTION_LIMIT).await
}

fn set_label(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.into()
}

fn truncate(message: &str) -> String {
    message.chars().take(CHECK_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        let long = "é".repeat(80);
        assert_eq!(truncate(&long).chars().count(), CHECK_ERROR_CHARS);
        assert_eq!(truncate("short"), "short");
    }
}
