//! Lead capture and listing handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use logicpeak_core::models::Lead;
use logicpeak_core::store::{DEFAULT_LIMIT, Repository, Stored};
use serde::Deserialize;
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::models::{CreatedResponse, ItemsResponse};

/// Query parameters for `GET /leads`.
#[derive(Debug, Deserialize)]
pub struct ListLeadsQuery {
    pub limit: Option<u64>,
}

/// `POST /leads` — store a lead from the contact form or chat widget.
pub async fn create_lead(
    State(state): State<AppState>,
    ValidatedJson(lead): ValidatedJson<Lead>,
) -> AppResult<Json<CreatedResponse>> {
    let id = Repository::<Lead>::new(state.store()?)
        .create_document(&lead)
        .await?;
    info!(%id, source = %lead.source, "lead captured");
    Ok(Json(CreatedResponse::ok(id)))
}

/// `GET /leads` — list up to `limit` leads (default 20).
pub async fn list_leads(
    State(state): State<AppState>,
    query: Result<Query<ListLeadsQuery>, QueryRejection>,
) -> AppResult<Json<ItemsResponse<Stored<Lead>>>> {
    let Query(query) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let items = Repository::<Lead>::new(state.store()?)
        .get_documents(limit)
        .await?;
    Ok(Json(ItemsResponse { items }))
}
