//! POST /chat: naming, tagline and pitch-graph suggestions.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use startup_analyst::{ChatReply, ChatRequest};
use tracing::{debug, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Handler: POST /chat
///
/// An empty or unparseable body is treated as `{}`; malformed message
/// entries and non-string context fields are dropped individually.
#[instrument(name = "chat_route", skip_all)]
pub async fn chat_route(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<ChatReply>> {
    state.require_credential()?;

    let request = ChatRequest::from_json_lenient(&body);
    debug!(
        messages = request.messages.len(),
        body_len = body.len(),
        "chat request parsed"
    );

    let reply = state
        .analyst
        .chat(&request.messages, &request.context)
        .await
        .map_err(AppError::ChatFailed)?;

    Ok(Json(ChatReply { reply }))
}
