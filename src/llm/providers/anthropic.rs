use crate::llm::provider::{CompletionRequest, LlmError, LlmProvider};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider.
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    http_client: HttpClient,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_client(api_key, model, HttpClient::new(), DEFAULT_BASE_URL.to_string())
    }

    pub fn with_client(api_key: String, model: String, http_client: HttpClient, base_url: String) -> Self {
        Self {
            api_key,
            model,
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Messages API body. Temperature is left to the API default.
    pub(crate) fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "system": request.system,
            "messages": [
                { "role": "user", "content": request.prompt }
            ]
        })
    }

    pub(crate) fn response_text(response: &Value) -> Result<String, LlmError> {
        response["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::Parse("No text in Anthropic response content".to_string()))
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/messages", self.base_url);
        debug!(model = %self.model, max_tokens = request.max_tokens, "anthropic completion");

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status(status.as_u16(), &error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        Self::response_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::with_client(
            "key".into(),
            "claude-sonnet-4-20250514".into(),
            HttpClient::new(),
            "http://localhost:9/v1/".into(),
        )
    }

    #[test]
    fn test_request_body() {
        let req = CompletionRequest::new("be brief", "hello")
            .max_tokens(256)
            .temperature(0.7);
        let body = provider().request_body(&req);
        assert!(body.get("temperature").is_none());
        assert_eq!(body["model"], "claude-sonnet-4-20250514");
        assert_eq!(body["system"], "be brief");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(provider().base_url, "http://localhost:9/v1");
    }

    #[test]
    fn test_response_text() {
        let body = json!({"content": [{"type": "text", "text": "{\"label\": \"x\"}"}]});
        assert_eq!(AnthropicProvider::response_text(&body).unwrap(), "{\"label\": \"x\"}");
        assert!(matches!(
            AnthropicProvider::response_text(&json!({"content": []})),
            Err(LlmError::Parse(_))
        ));
    }
}
