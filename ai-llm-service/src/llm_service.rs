//! Shared LLM service built from a single [`LlmModelConfig`].
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - The provider client is created on first use and then reused, so a missing
//!   credential does not prevent construction; it surfaces on the first call.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmBackend, LlmModelConfig, LlmProvider, LlmService};
//!
//! # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig::for_provider(LlmProvider::Gemini, Some("key".into()));
//! let svc = Arc::new(LlmService::new(cfg));
//! let text = svc.generate_text(Some("Be brief."), "Name a crab.").await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, Result},
    llm_backend::LlmBackend,
    services::{gemini_service::GeminiService, open_ai_service::OpenAiService},
};

/// Config-driven backend that dispatches to the configured provider client.
pub struct LlmService {
    cfg: LlmModelConfig,
    client: OnceCell<Arc<dyn LlmBackend>>,
}

impl LlmService {
    pub fn new(cfg: LlmModelConfig) -> Self {
        Self {
            cfg,
            client: OnceCell::new(),
        }
    }

    /// The config this service was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    async fn client(&self) -> Result<&Arc<dyn LlmBackend>> {
        self.client
            .get_or_try_init(|| async {
                let cli: Arc<dyn LlmBackend> = match self.cfg.provider {
                    LlmProvider::Gemini => Arc::new(GeminiService::new(self.cfg.clone())?),
                    LlmProvider::OpenAI => Arc::new(OpenAiService::new(self.cfg.clone())?),
                };
                Ok::<_, AiLlmError>(cli)
            })
            .await
    }
}

#[async_trait]
impl LlmBackend for LlmService {
    async fn generate_text(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        self.client().await?.generate_text(system, prompt).await
    }

    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<Value> {
        self.client().await?.generate_json(prompt, schema).await
    }
}
