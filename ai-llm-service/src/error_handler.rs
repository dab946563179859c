//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested enums ([`ConfigError`],
//! [`ProviderError`], [`SchemaError`]). Small helpers for reading/validating
//! configuration values are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the prefix `[AI LLM Service]` to simplify attribution in logs.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup or missing credential).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider returned an error status, blocked output or an unexpected payload.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Generated content did not satisfy the output schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (like limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_PROVIDER`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `GEMINI_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range (e.g., `expected 0.0..=2.0`).
        detail: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Non-2xx response details.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// Short, trimmed snippet of the response body.
    pub snippet: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// What went wrong talking to a provider.
#[non_exhaustive]
#[derive(Debug)]
pub enum ProviderErrorKind {
    /// The config was handed to a client for another provider.
    InvalidProvider,
    /// Endpoint is empty or missing http/https.
    InvalidEndpoint(String),
    /// The credential is not configured.
    MissingApiKey,
    /// Upstream returned a non-successful HTTP status.
    HttpStatus(HttpError),
    /// Response payload could not be decoded as expected.
    Decode(String),
    /// The response contained no usable candidate/choice.
    EmptyChoices,
    /// The provider refused to answer (safety block, etc.).
    Blocked(String),
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::InvalidProvider => f.write_str("invalid provider for this client"),
            ProviderErrorKind::InvalidEndpoint(e) => write!(f, "invalid endpoint: {e}"),
            ProviderErrorKind::MissingApiKey => f.write_str("API key is not configured"),
            ProviderErrorKind::HttpStatus(e) => e.fmt(f),
            ProviderErrorKind::Decode(e) => write!(f, "decode error: {e}"),
            ProviderErrorKind::EmptyChoices => f.write_str("response contained no content"),
            ProviderErrorKind::Blocked(reason) => write!(f, "response blocked: {reason}"),
        }
    }
}

/// Provider-scoped error.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider}: {kind}")]
pub struct ProviderError {
    pub provider: LlmProvider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: LlmProvider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/* ------------------------------------------------------------------------- */
/* Schema errors                                                             */
/* ------------------------------------------------------------------------- */

/// Schema-constrained generation failures.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema derived from the target type could not be compiled.
    #[error("[AI LLM Service] invalid output schema: {0}")]
    InvalidSchema(String),

    /// The model output was not parseable JSON.
    #[error("[AI LLM Service] model output is not valid JSON: {0}")]
    NotJson(String),

    /// The model output parsed but violated the schema.
    #[error("[AI LLM Service] model output violates schema: {}", .0.join("; "))]
    Violations(Vec<String>),

    /// The output passed the schema but did not map onto the target type.
    #[error("[AI LLM Service] model output does not match target type: {0}")]
    Deserialize(String),
}

/* ------------------------------------------------------------------------- */
/* Helpers                                                                   */
/* ------------------------------------------------------------------------- */

const SNIPPET_CHARS: usize = 240;

/// Trims a response body to a short single-line snippet for logs and errors.
pub fn make_snippet(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > SNIPPET_CHARS {
        let mut s: String = flat.chars().take(SNIPPET_CHARS).collect();
        s.push('…');
        s
    } else {
        flat
    }
}

/* ------------------------------------------------------------------------- */
/* Lookup helpers (return unified `Result<T>`)                               */
/* ------------------------------------------------------------------------- */

/// Returns the value of `name` if present and non-blank.
pub fn opt_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u32` (`Ok(None)` if unset/empty).
pub fn env_opt_u32<F>(lookup: &F, name: &'static str) -> Result<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    parse_opt(lookup, name, "expected u32")
}

/// Parses an optional `u64` (`Ok(None)` if unset/empty).
pub fn env_opt_u64<F>(lookup: &F, name: &'static str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    parse_opt(lookup, name, "expected u64")
}

/// Parses an optional `f32` (`Ok(None)` if unset/empty).
pub fn env_opt_f32<F>(lookup: &F, name: &'static str) -> Result<Option<f32>>
where
    F: Fn(&str) -> Option<String>,
{
    parse_opt(lookup, name, "expected a decimal number")
}

fn parse_opt<F, T>(lookup: &F, name: &'static str, reason: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match opt_var(lookup, name) {
        Some(v) => v.trim().parse::<T>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber { var: name, reason })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
pub fn validate_range_f32(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
    detail: &'static str,
) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_flattens_and_truncates() {
        let body = format!("line one\n\n  line two {}", "x".repeat(500));
        let s = make_snippet(&body);
        assert!(s.starts_with("line one line two"));
        assert!(s.ends_with('…'));
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 1);
    }

    #[test]
    fn blank_values_count_as_missing() {
        let lookup = |k: &str| (k == "BLANK").then(|| "   ".to_string());
        assert!(opt_var(&lookup, "BLANK").is_none());
        assert!(opt_var(&lookup, "UNSET").is_none());
    }

    #[test]
    fn numbers_are_parsed_or_rejected() {
        let lookup = |k: &str| match k {
            "GOOD" => Some("512".to_string()),
            "BAD" => Some("lots".to_string()),
            _ => None,
        };
        assert_eq!(env_opt_u32(&lookup, "GOOD").unwrap(), Some(512));
        assert_eq!(env_opt_u64(&lookup, "UNSET").unwrap(), None);
        assert!(matches!(
            env_opt_u32(&lookup, "BAD"),
            Err(AiLlmError::Config(ConfigError::InvalidNumber { var: "BAD", .. }))
        ));
    }

    #[test]
    fn endpoint_requires_http_scheme() {
        assert!(validate_http_endpoint("X", "https://example.com").is_ok());
        assert!(validate_http_endpoint("X", "example.com").is_err());
    }

    #[test]
    fn range_rejects_nan_and_out_of_bounds() {
        assert!(validate_range_f32("t", 0.5, 0.0, 1.0, "0..=1").is_ok());
        assert!(validate_range_f32("t", f32::NAN, 0.0, 1.0, "0..=1").is_err());
        assert!(validate_range_f32("t", 1.5, 0.0, 1.0, "0..=1").is_err());
    }
}
