//! Provider trait and error taxonomy

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typed failures an adapter can surface
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited")]
    RateLimited,

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Closed set of provider identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    Gemini,
    Grok,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Grok => "grok",
        }
    }
}

/// Backend-agnostic prompt produced by the prompt builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPrompt {
    pub system_instructions: String,
    pub user_message: String,
}

impl ProviderPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system_instructions: system.into(),
            user_message: user.into(),
        }
    }
}

/// Uniform capability over one LLM backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Which backend this adapter wraps
    fn id(&self) -> ProviderId;

    /// Model name used for requests
    fn model_name(&self) -> &str;

    /// Issue one completion call. One outbound request, no retries;
    /// a call exceeding `timeout` surfaces as `Unavailable`.
    async fn generate(
        &self,
        prompt: &ProviderPrompt,
        timeout: Duration,
    ) -> Result<String, ProviderError>;
}

/// Thread-safe reference to a provider adapter
pub type SharedProvider = Arc<dyn ChatProvider>;

/// Map an HTTP status into the error taxonomy. Shared by the reqwest-based
/// adapters.
pub(crate) fn error_from_status(status: reqwest::StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::Auth(body),
        429 => ProviderError::RateLimited,
        _ => ProviderError::Unavailable(format!("HTTP {}: {}", status, body)),
    }
}
