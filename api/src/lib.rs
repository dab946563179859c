//! HTTP surface of the startup analyzer.
//!
//! | Method | Path              | Handler                                   |
//! |--------|-------------------|-------------------------------------------|
//! | POST   | `/analyze`        | structured startup analysis               |
//! | GET    | `/analyze/schema` | JSON schema the model is constrained with |
//! | POST   | `/chat`           | naming / tagline / graph assistant        |
//! | GET    | `/health`         | provider, model, credential presence      |
//! | GET    | `/platforms`      | known platform identifiers                |

use std::{future, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use ai_llm_service::config::default_config::config_from_env;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

pub use crate::core::app_state::{AppState, ServerConfig};
pub use crate::error_handler::{AppError, AppResult};
pub use crate::middleware_layer::request_id::REQUEST_ID_HEADER;

use crate::{
    middleware_layer::request_id::request_id,
    routes::{
        analyze::analyze_route::{analyze_route, analyze_schema_route},
        chat::chat_route::chat_route,
        service_info::{health_route::health_route, platforms_route::platforms_route},
    },
};

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_route))
        .route("/analyze/schema", get(analyze_schema_route))
        .route("/chat", post(chat_route))
        .route("/health", get(health_route))
        .route("/platforms", get(platforms_route))
        .layer(middleware::from_fn(request_id))
        .with_state(Arc::new(state))
}

/// Serves `state` on an already bound listener until Ctrl+C.
pub async fn serve(listener: TcpListener, state: AppState) -> AppResult<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)
}

/// Reads configuration from the environment, binds `API_ADDRESS` and serves.
///
/// A missing provider credential does not prevent startup; requests fail
/// with a remediation hint until it is set.
pub async fn start() -> AppResult<()> {
    let server = ServerConfig::from_env();
    let llm_config = config_from_env()?;
    let state = AppState::from_llm_config(llm_config)?;

    let listener = TcpListener::bind(&server.bind_addr)
        .await
        .map_err(AppError::Bind)?;

    info!(
        addr = %server.bind_addr,
        provider = %state.llm_config.provider,
        model = %state.llm_config.model,
        credential_configured = state.llm_config.has_credential(),
        "startup analyzer listening"
    );
    if !state.llm_config.has_credential() {
        error!(
            var = state.llm_config.provider.api_key_var(),
            "provider credential is not set; /analyze and /chat will fail"
        );
    }

    serve(listener, state).await
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
