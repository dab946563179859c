//! Chat assistant wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// What the assistant knows about the startup; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub context: ChatContext,
}

impl ChatRequest {
    /// Reads a `/chat` body without failing.
    ///
    /// Anything that is not a JSON object yields the defaults. Message entries
    /// with an unknown role or non-string content are skipped, and context
    /// fields keep only string values.
    pub fn from_json_lenient(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .map(|v| Self::from_value_lenient(&v))
            .unwrap_or_default()
    }

    pub fn from_value_lenient(value: &Value) -> Self {
        let messages = value
            .get("messages")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|m| ChatMessage::deserialize(m).ok())
                    .collect()
            })
            .unwrap_or_default();

        let context = value
            .get("context")
            .map(ChatContext::from_value_lenient)
            .unwrap_or_default();

        Self { messages, context }
    }
}

impl ChatContext {
    fn from_value_lenient(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            company_name: field("companyName"),
            idea: field("idea"),
            platform: field("platform"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
