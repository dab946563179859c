//! POST /analyze and GET /analyze/schema.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;
use startup_analyst::{AnalysisDraft, AnalysisResult};
use tracing::{info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Handler: POST /analyze
///
/// The credential is checked before the body is read. Fields may be absent in
/// JSON; presence is validated afterwards so the 400 names what is missing.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/analyze \
///   -H 'content-type: application/json' \
///   -d '{"companyName":"BrightLearn","idea":"AI tutor","platform":"education"}'
/// ```
#[instrument(name = "analyze_route", skip_all)]
pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<AnalysisResult>> {
    state.require_credential()?;

    let draft: AnalysisDraft = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;

    let input = draft
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let result = state
        .analyst
        .analyze(&input)
        .await
        .map_err(AppError::AnalysisFailed)?;

    info!(company = %input.company_name, "analysis served");
    Ok(Json(result))
}

/// Handler: GET /analyze/schema
pub async fn analyze_schema_route(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.analyst.analysis_schema().clone())
}
