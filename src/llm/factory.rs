//! Provider construction from a kind, credentials and overrides.
use super::provider::{LlmError, LlmProvider, ProviderKind};
use super::providers::{AnthropicProvider, OpenAiProvider, anthropic, openai};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;

/// Connection settings for a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

/// Build the provider for `kind`.
///
/// Returns `Ok(None)` for [`ProviderKind::Mock`], which callers answer with
/// local heuristics. A missing key is looked up in the provider's environment
/// variable before failing with [`LlmError::MissingApiKey`].
///
/// # Examples
///
/// ```
/// use deckwright::llm::{ProviderKind, ProviderSettings, build_provider};
///
/// let provider = build_provider(ProviderKind::Mock, &ProviderSettings::default()).unwrap();
/// assert!(provider.is_none());
/// ```
pub fn build_provider(
    kind: ProviderKind,
    settings: &ProviderSettings,
) -> Result<Option<Arc<dyn LlmProvider>>, LlmError> {
    let (Some(env_var), Some(default_model)) = (kind.api_key_env(), kind.default_model()) else {
        return Ok(None);
    };

    let api_key = settings
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|k| !k.is_empty()))
        .ok_or(LlmError::MissingApiKey {
            provider: kind.as_str(),
            env_var,
        })?;
    let model = settings
        .model
        .clone()
        .unwrap_or_else(|| default_model.to_string());

    let mut builder = HttpClient::builder();
    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }
    let http_client = builder
        .build()
        .map_err(|e| LlmError::InvalidRequest(format!("HTTP client: {e}")))?;

    let provider: Arc<dyn LlmProvider> = match kind {
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::with_client(
            api_key,
            model,
            http_client,
            settings
                .base_url
                .clone()
                .unwrap_or_else(|| anthropic::DEFAULT_BASE_URL.to_string()),
        )),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::with_client(
            api_key,
            model,
            http_client,
            settings
                .base_url
                .clone()
                .unwrap_or_else(|| openai::DEFAULT_BASE_URL.to_string()),
        )),
        ProviderKind::Mock => return Ok(None),
    };
    Ok(Some(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_has_no_provider() {
        let provider = build_provider(ProviderKind::Mock, &ProviderSettings::default()).unwrap();
        assert!(provider.is_none());
    }

    #[test]
    fn test_explicit_key_and_model() {
        let settings = ProviderSettings {
            api_key: Some("sk-test".into()),
            model: Some("claude-custom".into()),
            ..Default::default()
        };
        let provider = build_provider(ProviderKind::Anthropic, &settings)
            .unwrap()
            .unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.model(), "claude-custom");
    }

    #[test]
    fn test_default_model() {
        let settings = ProviderSettings {
            api_key: Some("sk-test".into()),
            timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let provider = build_provider(ProviderKind::OpenAi, &settings).unwrap().unwrap();
        assert_eq!(provider.model(), "gpt-4");
    }
}
