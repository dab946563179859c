use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use startup_analyst::{AnalysisDraft, AnalysisResult, ChatReply, ChatRequest};
use tracing::{debug, warn};

use crate::error::ClientError;

/// Server operations used by the client state machines.
#[async_trait]
pub trait AnalystApi: Send + Sync {
    async fn analyze(&self, draft: &AnalysisDraft) -> Result<AnalysisResult, ClientError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;
}

/// `reqwest`-backed [`AnalystApi`].
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
}

impl HttpApiClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    ///
    /// # Errors
    /// [`ClientError::InvalidBaseUrl`] if it is not http/https;
    /// [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "POST");

        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AnalystApi for HttpApiClient {
    async fn analyze(&self, draft: &AnalysisDraft) -> Result<AnalysisResult, ClientError> {
        self.post_json("/analyze", draft).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.post_json("/chat", request).await
    }
}
