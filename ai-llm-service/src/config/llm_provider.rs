use std::{fmt, str::FromStr};

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// Each provider carries its own credential variable, default model and
/// default endpoint.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let p: LlmProvider = "google".parse().unwrap();
/// assert_eq!(p, LlmProvider::Gemini);
/// assert_eq!(p.api_key_var(), "GOOGLE_GENERATIVE_AI_API_KEY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini via the Generative Language API.
    Gemini,
    /// OpenAI's Chat Completions API.
    OpenAI,
}

impl LlmProvider {
    /// Environment variable holding the credential for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GOOGLE_GENERATIVE_AI_API_KEY",
            LlmProvider::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Environment variable that overrides the model identifier.
    pub fn model_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GEMINI_MODEL",
            LlmProvider::OpenAI => "OPENAI_MODEL",
        }
    }

    /// Environment variable that overrides the API base URL.
    pub fn endpoint_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GEMINI_URL",
            LlmProvider::OpenAI => "OPENAI_URL",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-1.5-flash",
            LlmProvider::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com",
            LlmProvider::OpenAI => "https://api.openai.com",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Gemini => f.write_str("gemini"),
            LlmProvider::OpenAI => f.write_str("openai"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("Gemini".parse::<LlmProvider>().unwrap(), LlmProvider::Gemini);
        assert_eq!(" CHATGPT ".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "ollama".parse::<LlmProvider>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedProvider(p) if p == "ollama"));
    }
}
