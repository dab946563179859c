//! Shared LLM service used by the startup analyzer.
//!
//! - [`config`]: provider/model configuration, loaded from environment.
//! - [`services`]: thin provider clients (Gemini, OpenAI).
//! - [`llm_backend`]: the provider-agnostic [`LlmBackend`] seam.
//! - [`llm_service`]: lazily initialised, shared backend built from config.
//! - [`structured`]: schema-constrained generation and validation.
//! - [`telemetry`]: tracing subscriber layer and filters.

pub mod config;
pub mod error_handler;
pub mod llm_backend;
pub mod llm_service;
pub mod services;
pub mod structured;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind, SchemaError};
pub use llm_backend::LlmBackend;
pub use llm_service::LlmService;
pub use structured::{SchemaContract, generate_object};
