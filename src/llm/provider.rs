//! Provider-neutral completion interface.
//!
//! Every LLM call in deckwright is a single system prompt plus a single user
//! prompt, answered with one block of text. Providers only translate that
//! shape to and from their wire format.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised by an LLM provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("No API key for {provider}; set {env_var} or pass a key")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },
    #[error("Could not parse model response: {0}")]
    Parse(String),
}

impl LlmError {
    /// Classify a non-success HTTP response.
    ///
    /// 429 and bodies that talk about rate limits or quota become
    /// [`LlmError::RateLimit`]; everything else is a provider error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let lowered = body.to_lowercase();
        let message = format!("HTTP {status}: {body}");
        if status == 429 || lowered.contains("rate limit") || lowered.contains("rate_limit") || lowered.contains("quota") {
            LlmError::RateLimit(message)
        } else {
            LlmError::Provider(message)
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::Parse(err.to_string())
    }
}

/// Which backend serves completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
    /// Local heuristics, no network
    #[default]
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Mock => "mock",
        }
    }

    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Anthropic => Some("claude-sonnet-4-20250514"),
            ProviderKind::OpenAi => Some("gpt-4"),
            ProviderKind::Mock => None,
        }
    }

    /// Environment variable holding the API key.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Mock => None,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" => Ok(ProviderKind::Anthropic),
            "openai" => Ok(ProviderKind::OpenAi),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(LlmError::InvalidRequest(format!("Unknown provider: {other}"))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    /// Sent by the OpenAI provider only
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            max_tokens: 1024,
            temperature: 0.0,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    /// Run one completion and return the response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Anthropic".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!(" OPENAI ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("mock".parse::<ProviderKind>().unwrap(), ProviderKind::Mock);
        assert!(matches!(
            "gemini".parse::<ProviderKind>(),
            Err(LlmError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ProviderKind::Anthropic.default_model(), Some("claude-sonnet-4-20250514"));
        assert_eq!(ProviderKind::OpenAi.default_model(), Some("gpt-4"));
        assert_eq!(ProviderKind::Mock.api_key_env(), None);
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(LlmError::from_status(429, ""), LlmError::RateLimit(_)));
        assert!(matches!(
            LlmError::from_status(400, "You exceeded your current quota"),
            LlmError::RateLimit(_)
        ));
        assert!(matches!(
            LlmError::from_status(500, "internal error"),
            LlmError::Provider(_)
        ));
    }

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::new("sys", "hi").max_tokens(256).temperature(0.7);
        assert_eq!(req.max_tokens, 256);
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    }
}
