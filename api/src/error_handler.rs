use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ai_llm_service::AiLlmError;
use startup_analyst::AnalystError;
use thiserror::Error;
use tracing::error;

/// Public application error type.
///
/// Every variant renders as a `text/plain` body. Generation failures carry
/// their cause for logging only; the caller sees a fixed message.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] AiLlmError),

    #[error("failed to prepare analyst: {0}")]
    Startup(#[source] AnalystError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Per request ---
    #[error("Missing {0} environment variable. Set it in the server environment or .env file.")]
    MissingCredential(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to generate analysis")]
    AnalysisFailed(#[source] AnalystError),

    #[error("Failed to generate chat reply")]
    ChatFailed(#[source] AnalystError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingCredential(_)
            | AppError::AnalysisFailed(_)
            | AppError::ChatFailed(_)
            | AppError::Config(_)
            | AppError::Startup(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::AnalysisFailed(cause) | AppError::ChatFailed(cause) => {
                error!(error = %cause, "{}", self);
            }
            AppError::MissingCredential(var) => {
                error!(var = *var, "request rejected: provider credential is not set");
            }
            _ => {}
        }
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
