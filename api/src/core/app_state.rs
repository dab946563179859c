use std::sync::Arc;

use ai_llm_service::{LlmBackend, LlmModelConfig, LlmService};
use startup_analyst::Analyst;

use crate::error_handler::{AppError, AppResult};

/// Default listen address when `API_ADDRESS` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `host:port`, e.g. "127.0.0.1:8080".
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("API_ADDRESS")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        Self { bind_addr }
    }
}

/// Shared state for all HTTP handlers. Read-only after startup.
pub struct AppState {
    /// Provider, model and credential the backend was built from.
    pub llm_config: LlmModelConfig,
    pub analyst: Analyst,
}

impl AppState {
    /// Wires handlers to an explicit backend. Tests pass a fake here.
    pub fn new(llm_config: LlmModelConfig, backend: Arc<dyn LlmBackend>) -> AppResult<Self> {
        Ok(Self {
            llm_config,
            analyst: Analyst::new(backend).map_err(AppError::Startup)?,
        })
    }

    /// Wires handlers to the configured hosted provider.
    pub fn from_llm_config(llm_config: LlmModelConfig) -> AppResult<Self> {
        let backend: Arc<dyn LlmBackend> = Arc::new(LlmService::new(llm_config.clone()));
        Self::new(llm_config, backend)
    }

    /// Per-request precondition for every model-backed route.
    pub fn require_credential(&self) -> AppResult<()> {
        if self.llm_config.has_credential() {
            Ok(())
        } else {
            Err(AppError::MissingCredential(
                self.llm_config.provider.api_key_var(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_defaults_when_unset_or_blank() {
        assert_eq!(ServerConfig::from_lookup(|_| None).bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(
            ServerConfig::from_lookup(|_| Some("  ".into())).bind_addr,
            DEFAULT_BIND_ADDR
        );
        assert_eq!(
            ServerConfig::from_lookup(|_| Some("0.0.0.0:3000".into())).bind_addr,
            "0.0.0.0:3000"
        );
    }
}
