//! LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_PROVIDER`   = `gemini` (default, alias `google`) or `openai` (alias `chatgpt`)
//! - `GEMINI_MODEL` / `OPENAI_MODEL` = model override (optional)
//! - `GEMINI_URL` / `OPENAI_URL`     = API base override (optional, http/https)
//! - `GOOGLE_GENERATIVE_AI_API_KEY` / `OPENAI_API_KEY` = credential
//! - `LLM_MAX_TOKENS`   = optional u32
//! - `LLM_TEMPERATURE`  = optional f32 in `0.0..=2.0`
//! - `LLM_TOP_P`        = optional f32 in `0.0..=1.0`
//! - `LLM_TIMEOUT_SECS` = optional u64; unset means no client-side timeout
//!
//! The credential is optional here on purpose: a missing key does not stop the
//! process from starting. Request handlers check [`LlmModelConfig::has_credential`]
//! before every provider call.

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        Result, env_opt_f32, env_opt_u32, env_opt_u64, opt_var, validate_http_endpoint,
        validate_range_f32,
    },
};

/// Builds the model config from the process environment.
///
/// # Errors
/// See [`config_from_lookup`].
pub fn config_from_env() -> Result<LlmModelConfig> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds the model config from an arbitrary key lookup.
///
/// # Errors
/// [`ConfigError`](crate::error_handler::ConfigError) for an unknown `LLM_PROVIDER`,
/// a non-http endpoint or a bad tunable.
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = match opt_var(&lookup, "LLM_PROVIDER") {
        Some(raw) => raw.parse::<LlmProvider>()?,
        None => LlmProvider::Gemini,
    };

    let model = opt_var(&lookup, provider.model_var())
        .map(|m| m.trim().to_string())
        .unwrap_or_else(|| provider.default_model().to_string());

    let endpoint = opt_var(&lookup, provider.endpoint_var())
        .map(|e| e.trim().to_string())
        .unwrap_or_else(|| provider.default_endpoint().to_string());
    validate_http_endpoint(provider.endpoint_var(), &endpoint)?;

    let api_key = opt_var(&lookup, provider.api_key_var()).map(|k| k.trim().to_string());

    let max_tokens = env_opt_u32(&lookup, "LLM_MAX_TOKENS")?;
    let timeout_secs = env_opt_u64(&lookup, "LLM_TIMEOUT_SECS")?;

    let temperature = env_opt_f32(&lookup, "LLM_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0, "expected 0.0..=2.0")?;
    }
    let top_p = env_opt_f32(&lookup, "LLM_TOP_P")?;
    if let Some(p) = top_p {
        validate_range_f32("top_p", p, 0.0, 1.0, "expected 0.0..=1.0")?;
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature,
        top_p,
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error_handler::{AiLlmError, ConfigError};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_to_gemini_without_credential() {
        let cfg = config_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.provider, LlmProvider::Gemini);
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.endpoint, "https://generativelanguage.googleapis.com");
        assert!(!cfg.has_credential());
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn reads_provider_specific_variables() {
        let cfg = config_from_lookup(lookup_from(&[
            ("LLM_PROVIDER", "openai"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4.1"),
            ("GOOGLE_GENERATIVE_AI_API_KEY", "ignored"),
            ("LLM_MAX_TOKENS", "2048"),
            ("LLM_TEMPERATURE", "0.4"),
            ("LLM_TIMEOUT_SECS", "90"),
        ]))
        .unwrap();
        assert_eq!(cfg.provider, LlmProvider::OpenAI);
        assert_eq!(cfg.model, "gpt-4.1");
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.max_tokens, Some(2048));
        assert_eq!(cfg.temperature, Some(0.4));
        assert_eq!(cfg.timeout_secs, Some(90));
    }

    #[test]
    fn blank_model_falls_back_to_provider_default() {
        let cfg = config_from_lookup(lookup_from(&[("GEMINI_MODEL", "   ")])).unwrap();
        assert_eq!(cfg.model, "gemini-1.5-flash");
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = config_from_lookup(lookup_from(&[("GEMINI_URL", "ftp://x")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat { var: "GEMINI_URL", .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let err = config_from_lookup(lookup_from(&[("LLM_TEMPERATURE", "3.5")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::OutOfRange { field: "temperature", .. })
        ));
    }
}
