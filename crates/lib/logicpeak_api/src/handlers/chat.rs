//! Chat capture handler.

use axum::Json;
use axum::extract::State;
use logicpeak_core::models::ChatMessage;
use logicpeak_core::store::Repository;
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::CreatedResponse;

/// `POST /chat` — store one chat turn.
pub async fn capture_chat(
    State(state): State<AppState>,
    ValidatedJson(message): ValidatedJson<ChatMessage>,
) -> AppResult<Json<CreatedResponse>> {
    let id = Repository::<ChatMessage>::new(state.store()?)
        .create_document(&message)
        .await?;
    info!(%id, session_id = %message.session_id, "chat message captured");
    Ok(Json(CreatedResponse::ok(id)))
}
