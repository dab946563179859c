//! OpenAI (ChatGPT) service for text and schema-constrained JSON generation.
//!
//! Minimal, non-streaming client around the OpenAI REST API:
//! - POST {endpoint}/v1/chat/completions
//!
//! JSON generation sets `response_format = { type: "json_schema", ... }` with
//! `strict: false`: strict mode rejects several keywords the output schema
//! relies on (`minItems`, `minimum`, ...), and the output is validated locally
//! anyway.
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::OpenAI`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, ProviderError, ProviderErrorKind, SchemaError, make_snippet,
    },
    llm_backend::{LlmBackend, strip_code_fence},
};

/// Thin client for the OpenAI API (ChatGPT).
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (default headers, optional timeout).
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::InvalidProvider`] if `cfg.provider` is not OpenAI
    /// - [`ProviderErrorKind::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        // 1) Provider must be OpenAI.
        if cfg.provider != LlmProvider::OpenAI {
            return Err(
                ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        // 2) API key must be present.
        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::MissingApiKey)
            })?;

        // 3) Endpoint must use http/https.
        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        // 4) HTTP client: default headers + optional timeout.
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
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
        let url_chat = format!("{base}/v1/chat/completions");

        info!(
            provider = %cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = ?cfg.timeout_secs,
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`ProviderErrorKind::Decode`] if the JSON cannot be parsed
    /// - [`ProviderErrorKind::EmptyChoices`] if no choices are returned
    async fn complete(&self, body: &ChatCompletionRequest<'_>) -> Result<String, AiLlmError> {
        let started = Instant::now();

        debug!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            structured = body.response_format.is_some(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                endpoint = %self.cfg.endpoint,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI /v1/chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    endpoint = %self.cfg.endpoint,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/chat/completions response"
                );
                return Err(ProviderError::new(
                    LlmProvider::OpenAI,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `choices[0].message.content`"
                    )),
                )
                .into());
            }
        };

        if let Some(refusal) = out.choices.iter().find_map(|c| c.message.refusal.clone()) {
            return Err(
                ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::Blocked(refusal)).into(),
            );
        }

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::EmptyChoices)
            })?;

        info!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            latency_ms = started.elapsed().as_millis(),
            "chat completion completed"
        );

        Ok(content)
    }
}

#[async_trait]
impl LlmBackend for OpenAiService {
    #[instrument(skip_all, fields(model = %self.cfg.model, prompt_len = prompt.len()))]
    async fn generate_text(&self, system: Option<&str>, prompt: &str) -> Result<String, AiLlmError> {
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system, None);
        self.complete(&body).await
    }

    #[instrument(skip_all, fields(model = %self.cfg.model, prompt_len = prompt.len()))]
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<Value, AiLlmError> {
        let format = json!({
            "type": "json_schema",
            "json_schema": {
                "name": "response",
                "schema": schema,
                "strict": false,
            }
        });
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, None, Some(format));
        let text = self.complete(&body).await?;
        serde_json::from_str(strip_code_fence(&text)).map_err(|e| {
            AiLlmError::from(SchemaError::NotJson(format!(
                "{e}; got: {}",
                make_snippet(&text)
            )))
        })
    }
}

/* ===========================================================================
HTTP payloads & options
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds a chat request from config, `prompt`, and an optional system message.
    fn from_cfg(
        cfg: &'a LlmModelConfig,
        prompt: &'a str,
        system: Option<&'a str>,
        response_format: Option<Value>,
    ) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system",
                content: sys,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
            response_format,
        }
    }
}

/// Chat message for the OpenAI API.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}
