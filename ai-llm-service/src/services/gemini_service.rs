//! Google Gemini service for text and schema-constrained JSON generation.
//!
//! Minimal, non-streaming client around the Generative Language REST API:
//! - POST {endpoint}/v1beta/models/{model}:generateContent
//!
//! Structured output uses `generationConfig.responseMimeType = application/json`
//! together with `responseSchema`. Gemini accepts only an OpenAPI-flavoured
//! subset of JSON Schema, so the schema is reduced with [`to_gemini_schema`]
//! before it is sent.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, ProviderError, ProviderErrorKind, SchemaError, make_snippet,
    },
    llm_backend::{LlmBackend, strip_code_fence},
};

/// Keywords Gemini's `responseSchema` understands. Everything else is dropped.
const SUPPORTED_KEYWORDS: &[&str] = &[
    "type",
    "description",
    "enum",
    "properties",
    "required",
    "items",
    "minItems",
    "maxItems",
    "minimum",
    "maximum",
    "nullable",
];

/// Thin client for the Gemini API.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::InvalidProvider`] if `cfg.provider` is not Gemini
    /// - [`ProviderErrorKind::MissingApiKey`] if no credential is configured
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is not http/https
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::MissingApiKey)
            })?;

        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let mut key_header = header::HeaderValue::from_str(api_key).map_err(|e| {
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        key_header.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("x-goog-api-key", key_header);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base = endpoint.trim_end_matches('/');
        let url_generate = format!("{base}/v1beta/models/{}:generateContent", cfg.model);

        info!(
            provider = %cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = ?cfg.timeout_secs,
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Sends one `generateContent` request and returns the concatenated text parts.
    async fn generate_content(&self, body: &GenerateContentRequest<'_>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        debug!(model = %self.cfg.model, "POST {}", self.url_generate);

        let resp = self.client.post(&self.url_generate).json(body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateContentResponse = resp.json().await.map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode generateContent response"
            );
            ProviderError::new(
                LlmProvider::Gemini,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `candidates[0].content.parts[].text`"
                )),
            )
        })?;

        if let Some(reason) = out.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::Blocked(reason)).into(),
            );
        }

        let text = out
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::new(LlmProvider::Gemini, ProviderErrorKind::EmptyChoices)
            })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            output_len = text.len(),
            "generateContent completed"
        );

        Ok(text)
    }

    fn generation_config(&self, schema: Option<Value>) -> GenerationConfig {
        GenerationConfig {
            temperature: self.cfg.temperature,
            top_p: self.cfg.top_p,
            max_output_tokens: self.cfg.max_tokens,
            response_mime_type: schema.as_ref().map(|_| "application/json"),
            response_schema: schema,
        }
    }
}

#[async_trait]
impl LlmBackend for GeminiService {
    #[instrument(skip_all, fields(model = %self.cfg.model, prompt_len = prompt.len()))]
    async fn generate_text(&self, system: Option<&str>, prompt: &str) -> Result<String, AiLlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: system.map(Content::system),
            generation_config: self.generation_config(None),
        };
        self.generate_content(&body).await
    }

    #[instrument(skip_all, fields(model = %self.cfg.model, prompt_len = prompt.len()))]
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<Value, AiLlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: None,
            generation_config: self.generation_config(Some(to_gemini_schema(schema))),
        };
        let text = self.generate_content(&body).await?;
        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| {
                AiLlmError::from(SchemaError::NotJson(format!(
                    "{e}; got: {}",
                    make_snippet(&text)
                )))
            })
    }
}

/// Reduces a JSON Schema document to the subset accepted by Gemini's `responseSchema`.
///
/// Unsupported keywords (`$schema`, `title`, `format`, `additionalProperties`, ...)
/// are dropped. A union type such as `["string", "null"]` becomes
/// `type: "string", nullable: true`.
pub fn to_gemini_schema(schema: &Value) -> Value {
    let Value::Object(obj) = schema else {
        return schema.clone();
    };

    let mut out = Map::new();
    for (key, value) in obj {
        if !SUPPORTED_KEYWORDS.contains(&key.as_str()) {
            continue;
        }
        match (key.as_str(), value) {
            ("type", Value::Array(types)) => {
                let mut non_null = types.iter().filter(|t| t.as_str() != Some("null"));
                if let Some(first) = non_null.next() {
                    out.insert("type".into(), first.clone());
                }
                if types.iter().any(|t| t.as_str() == Some("null")) {
                    out.insert("nullable".into(), Value::Bool(true));
                }
            }
            ("properties", Value::Object(props)) => {
                let reduced = props
                    .iter()
                    .map(|(name, sub)| (name.clone(), to_gemini_schema(sub)))
                    .collect();
                out.insert("properties".into(), Value::Object(reduced));
            }
            ("items", sub) => {
                out.insert("items".into(), to_gemini_schema(sub));
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn user(text: &'a str) -> Self {
        Self {
            role: Some("user"),
            parts: vec![Part { text }],
        }
    }

    fn system(text: &'a str) -> Self {
        Self {
            role: None,
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reduces_schema_to_supported_keywords() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": "Thing",
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "name": { "type": "string", "description": "Display name" },
                "score": { "type": "number", "format": "double", "minimum": 0, "maximum": 100 },
                "tags": { "type": "array", "items": { "type": ["string", "null"] }, "minItems": 1 }
            },
            "required": ["name", "score", "tags"]
        });

        let reduced = to_gemini_schema(&schema);

        assert_eq!(
            reduced,
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Display name" },
                    "score": { "type": "number", "minimum": 0, "maximum": 100 },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string", "nullable": true },
                        "minItems": 1
                    }
                },
                "required": ["name", "score", "tags"]
            })
        );
    }

    #[test]
    fn request_body_uses_camel_case_and_json_mime() {
        let body = GenerateContentRequest {
            contents: vec![Content::user("hi")],
            system_instruction: Some(Content::system("be brief")),
            generation_config: GenerationConfig {
                temperature: None,
                top_p: None,
                max_output_tokens: Some(64),
                response_mime_type: Some("application/json"),
                response_schema: Some(json!({ "type": "object" })),
            },
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["contents"][0]["role"], "user");
        assert_eq!(v["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(v["systemInstruction"]["parts"][0]["text"], "be brief");
        assert!(v["systemInstruction"].get("role").is_none());
        assert_eq!(v["generationConfig"]["maxOutputTokens"], 64);
        assert_eq!(v["generationConfig"]["responseMimeType"], "application/json");
        assert!(v["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn construction_requires_credential() {
        let cfg = LlmModelConfig::for_provider(LlmProvider::Gemini, None);
        let err = GeminiService::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey,
                ..
            })
        ));
    }

    #[test]
    fn construction_rejects_foreign_provider() {
        let cfg = LlmModelConfig::for_provider(LlmProvider::OpenAI, Some("k".into()));
        assert!(GeminiService::new(cfg).is_err());
    }

    #[test]
    fn decodes_candidate_text_and_block_reason() {
        let ok: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "a" }, { "text": "b" }] } }]
        }))
        .unwrap();
        let parts = &ok.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts.len(), 2);

        let blocked: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert!(blocked.candidates.is_empty());
        assert_eq!(
            blocked.prompt_feedback.and_then(|f| f.block_reason).as_deref(),
            Some("SAFETY")
        );
    }
}
