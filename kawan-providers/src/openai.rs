//! OpenAI-compatible adapter
//!
//! Covers OpenAI itself plus any backend speaking its chat-completions
//! protocol (xAI Grok, local servers) via a base-URL override.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::debug;

use crate::{ChatProvider, ProviderError, ProviderId, ProviderPrompt};

/// Configuration for an OpenAI-compatible backend
#[derive(Debug, Clone)]
pub struct OpenAiCompatConfig {
    /// Which provider this instance represents (OpenAi or Grok)
    pub provider: ProviderId,
    /// API key
    pub api_key: String,
    /// Base URL override (xAI, local servers)
    pub base_url: Option<String>,
    /// Model name
    pub model: String,
    /// Temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Max tokens
    pub max_tokens: u16,
}

impl Default for OpenAiCompatConfig {
    fn default() -> Self {
        Self {
            provider: ProviderId::OpenAi,
            api_key: String::new(),
            base_url: None,
            model: "gpt-4o".to_string(),
            temperature: 0.9,
            max_tokens: 2000,
        }
    }
}

impl OpenAiCompatConfig {
    pub fn openai(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            ..Default::default()
        }
    }

    pub fn grok(api_key: &str, model: &str) -> Self {
        Self {
            provider: ProviderId::Grok,
            api_key: api_key.to_string(),
            base_url: Some("https://api.x.ai/v1".to_string()),
            model: model.to_string(),
            ..Default::default()
        }
    }

    pub fn local(base_url: &str, model: &str) -> Self {
        Self {
            api_key: "sk-local".to_string(),
            base_url: Some(base_url.to_string()),
            model: model.to_string(),
            ..Default::default()
        }
    }
}

/// OpenAI-compatible provider adapter
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    config: OpenAiCompatConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(&config.api_key);

        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        let client = Client::with_config(openai_config);

        Self { client, config }
    }
}

fn map_openai_error(err: OpenAIError) -> ProviderError {
    match err {
        OpenAIError::ApiError(api) => {
            let kind = api.r#type.clone().unwrap_or_default();
            if kind.contains("rate_limit") || api.message.contains("rate limit") {
                ProviderError::RateLimited
            } else if kind.contains("auth") || api.message.contains("API key") {
                ProviderError::Auth(api.message)
            } else {
                ProviderError::Unavailable(api.message)
            }
        }
        OpenAIError::Reqwest(e) => ProviderError::Unavailable(e.to_string()),
        OpenAIError::JSONDeserialize(e) => ProviderError::MalformedResponse(e.to_string()),
        other => ProviderError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        self.config.provider
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        prompt: &ProviderPrompt,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(prompt.system_instructions.as_str())
                    .build()
                    .map_err(map_openai_error)?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt.user_message.as_str())
                    .build()
                    .map_err(map_openai_error)?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build()
            .map_err(map_openai_error)?;

        debug!(
            provider = self.config.provider.as_str(),
            model = %self.config.model,
            "sending chat completion request"
        );

        let response = tokio::time::timeout(timeout, self.client.chat().create(request))
            .await
            .map_err(|_| ProviderError::Unavailable("request timed out".to_string()))?
            .map_err(map_openai_error)?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::MalformedResponse("empty completion".to_string()))
    }
}
