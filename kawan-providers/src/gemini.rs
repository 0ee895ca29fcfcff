//! Google Gemini adapter
//!
//! The generative-language API has no separate system role in this call
//! shape, so system instructions and the user message are concatenated into
//! a single text part.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::adapter::error_from_status;
use crate::{ChatProvider, ProviderError, ProviderId, ProviderPrompt};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini backend configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Model name (e.g. gemini-1.5-flash)
    pub model: String,
}

impl GeminiConfig {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

/// Google Gemini provider adapter
pub struct GeminiProvider {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::new();
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.config.model, self.config.api_key
        )
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        prompt: &ProviderPrompt,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        debug!(model = %self.config.model, "sending gemini request");

        let full_prompt = format!(
            "{}\n\nUser: {}",
            prompt.system_instructions, prompt.user_message
        );

        let request_body = serde_json::json!({
            "contents": [
                {"parts": [{"text": full_prompt}]}
            ]
        });

        let response = self
            .client
            .post(self.endpoint())
            .timeout(timeout)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "gemini request rejected");
            return Err(error_from_status(status, text));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .and_then(|parts| parts.first())
            .and_then(|p| p["text"].as_str())
            .map(|s| s.to_string())
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("no candidate text in response".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model_and_key() {
        let provider = GeminiProvider::new(GeminiConfig::new("g-key", "gemini-1.5-flash"));
        let url = provider.endpoint();
        assert!(url.contains("gemini-1.5-flash:generateContent"));
        assert!(url.ends_with("key=g-key"));
    }
}
