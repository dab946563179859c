use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("a request is already in flight")]
    Busy,

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `body` is the server's plain-text message.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),
}
