use std::fmt;

use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which LLM provider/backend to use (Gemini, OpenAI).
/// - `model`: The model identifier (e.g., `"gemini-1.5-flash"`, `"gpt-4o-mini"`).
/// - `endpoint`: API base URL (no path; the service appends it).
/// - `api_key`: Credential. `None` means "not configured"; callers check it per request.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Optional request timeout. `None` keeps the HTTP client default.
///
/// `Debug` redacts the credential.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig::for_provider(LlmProvider::Gemini, Some("key".into()));
/// assert!(cfg.has_credential());
/// assert!(format!("{cfg:?}").contains("<redacted>"));
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// API base URL.
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Config with the provider's default model and endpoint and no sampling overrides.
    pub fn for_provider(provider: LlmProvider, api_key: Option<String>) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            endpoint: provider.default_endpoint().to_string(),
            api_key,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        }
    }

    /// Whether a non-blank credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

impl fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
