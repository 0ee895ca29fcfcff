//! Anthropic Claude adapter

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::adapter::error_from_status;
use crate::{ChatProvider, ProviderError, ProviderId, ProviderPrompt};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic backend configuration
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key
    pub api_key: String,
    /// Model name (e.g. claude-sonnet-4-20250514)
    pub model: String,
    /// Max tokens
    pub max_tokens: u32,
}

impl AnthropicConfig {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens: 2000,
        }
    }
}

/// Anthropic Claude provider adapter
pub struct AnthropicProvider {
    client: reqwest::Client,
    config: AnthropicConfig,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Self {
        let client = reqwest::Client::new();
        Self { client, config }
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        prompt: &ProviderPrompt,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        debug!(model = %self.config.model, "sending anthropic request");

        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": prompt.system_instructions,
            "messages": [
                {"role": "user", "content": prompt.user_message}
            ]
        });

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .timeout(timeout)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "anthropic request rejected");
            return Err(error_from_status(status, text));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        json["content"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|block| block["text"].as_str())
            .map(|s| s.to_string())
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("no text block in response".to_string())
            })
    }
}
