use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub model: String,
    pub credential_configured: bool,
}

/// Handler: GET /health
///
/// Reports configuration only; the provider is never contacted.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cfg = &state.llm_config;
    Json(HealthResponse {
        status: "ok",
        provider: cfg.provider.to_string(),
        model: cfg.model.clone(),
        credential_configured: cfg.has_credential(),
    })
}
