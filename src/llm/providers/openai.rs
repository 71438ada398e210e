use crate::llm::provider::{CompletionRequest, LlmError, LlmProvider};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat completions provider.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    http_client: HttpClient,
    base_url: String,
}

impl OpenAiProvider {
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

    pub(crate) fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt }
            ]
        })
    }

    pub(crate) fn response_text(response: &Value) -> Result<String, LlmError> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::Parse("No message content in OpenAI response".to_string()))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, max_tokens = request.max_tokens, "openai completion");

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
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

    #[test]
    fn test_request_body_has_system_message() {
        let provider = OpenAiProvider::new("key".into(), "gpt-4".into());
        let req = CompletionRequest::new("sys", "user text").temperature(0.7);
        let body = provider.request_body(&req);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["content"], "user text");
        assert_eq!(body["model"], "gpt-4");
    }

    #[test]
    fn test_response_text() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "ok"}}]});
        assert_eq!(OpenAiProvider::response_text(&body).unwrap(), "ok");
        assert!(OpenAiProvider::response_text(&json!({})).is_err());
    }
}
