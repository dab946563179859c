//! Provider-agnostic generation seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error_handler::Result;

/// A model backend able to produce free text and schema-shaped JSON.
///
/// Implemented by the concrete provider clients and by [`crate::LlmService`];
/// tests substitute their own implementation.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Unconstrained text generation with an optional system instruction.
    async fn generate_text(&self, system: Option<&str>, prompt: &str) -> Result<String>;

    /// JSON generation with `schema` handed to the provider as an output shape hint.
    ///
    /// Returns the parsed JSON value. Implementations do not validate it against
    /// `schema`; see [`crate::structured`] for that.
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<Value>;
}

/// Strips a surrounding Markdown code fence (```` ```json ... ``` ````) if present.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop an info string such as `json` on the opening line.
    match rest.split_once('\n') {
        Some((first, body)) if !first.trim_start().starts_with('{') => body.trim(),
        _ => rest.trim(),
    }
}
