//! Fallback orchestrator
//!
//! Drives one request through the pipeline: resolve language and persona,
//! classify the message, build the prompt, then try providers under the
//! configured strategy. Provider failures are recovered locally and never
//! reach the caller; when every provider fails (or the deadline elapses)
//! the template tier produces the response. The template tier cannot fail,
//! so the orchestrator is total.
//!
//! Two strategies:
//! - **Sequential**: strict priority order, stop at first success
//! - **FanOut**: all providers race under a shared deadline; first
//!   *success* wins - a fast failure never beats a slow success

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use kawan_core::{
    classify, derive_mood, extract_topic, ChatRequest, LanguageId, PersonaRegistry,
    ResponseEnvelope, SessionKey, DEFAULT_CONTEXT_TURNS,
};
use kawan_providers::{ProviderId, ProviderPrompt, SharedProvider};

use crate::{synthesize, ConversationMemory, PromptBuilder, TemplateError, TemplateLibrary};

/// How providers are attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackStrategy {
    /// Strict priority order, stop at first success
    #[default]
    Sequential,
    /// Race all providers, take the first success
    FanOut,
}

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub strategy: FallbackStrategy,
    /// Bound on total provider time per request
    pub request_deadline: Duration,
    /// Recent turns fed into the prompt
    pub context_turns: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            strategy: FallbackStrategy::Sequential,
            request_deadline: Duration::from_secs(20),
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }
}

/// Startup-time configuration failures. Requests themselves never fail.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("template tier invalid: {0}")]
    Template(#[from] TemplateError),
}

/// The dialogue orchestrator
pub struct Orchestrator {
    providers: Vec<SharedProvider>,
    templates: TemplateLibrary,
    memory: Arc<ConversationMemory>,
    registry: PersonaRegistry,
    builder: PromptBuilder,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Construct the orchestrator, validating the template tier up front.
    /// An empty provider list is allowed (template-only operation); a
    /// broken template pool is the one fatal configuration.
    pub fn new(
        providers: Vec<SharedProvider>,
        memory: Arc<ConversationMemory>,
        config: OrchestratorConfig,
    ) -> Result<Self, OrchestratorError> {
        let templates = TemplateLibrary::load_embedded()?;
        if providers.is_empty() {
            warn!("no providers configured; running on the template tier only");
        }
        Ok(Self {
            providers,
            templates,
            memory,
            registry: PersonaRegistry::new(),
            builder: PromptBuilder::new(),
            config,
        })
    }

    /// Handle one chat request. Always produces a non-empty response.
    pub async fn respond(&self, request: &ChatRequest, session_id: &str) -> ResponseEnvelope {
        let language = LanguageId::parse(&request.language)
            .unwrap_or_else(|| LanguageId::detect(&request.message));
        let profile = language.profile();
        let persona = self.registry.lookup_str(&request.personality);
        let intent = classify(&request.message, profile);
        let mood = derive_mood(&request.message);
        let topic = extract_topic(&request.message);

        debug!(
            language = language.as_str(),
            persona = persona.id.as_str(),
            intent = intent.as_str(),
            "classified request"
        );

        let key = SessionKey::new(language, session_id);
        let recent = self.memory.recent(&key, self.config.context_turns);

        let mut prompt =
            self.builder
                .build(persona, profile, intent, &recent, &request.message);
        if let Some(context) = &request.context {
            prompt.system_instructions.push_str("\nCaller context: ");
            prompt.system_instructions.push_str(context);
            prompt.system_instructions.push('\n');
        }

        let chosen = match self.config.strategy {
            FallbackStrategy::Sequential => self.run_sequential(&prompt).await,
            FallbackStrategy::FanOut => self.run_fan_out(&prompt).await,
        };

        let text = match chosen {
            Some((text, id)) => {
                info!(provider = id.as_str(), "provider produced the response");
                text
            }
            None => {
                info!("all providers failed; using the template tier");
                self.templates.pick(language, intent)
            }
        };

        // Memory write is ordered after the text is finalized
        self.memory.append_exchange(&key, &request.message, &text);

        synthesize(text, persona, profile, intent, mood, topic)
    }

    /// Try providers strictly in priority order within the deadline
    async fn run_sequential(&self, prompt: &ProviderPrompt) -> Option<(String, ProviderId)> {
        let deadline = Instant::now() + self.config.request_deadline;

        for provider in &self.providers {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!("request deadline elapsed mid-cascade");
                return None;
            }

            match provider.generate(prompt, remaining).await {
                Ok(text) => {
                    debug!(provider = provider.id().as_str(), "cascade hit");
                    return Some((text, provider.id()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.id().as_str(),
                        error = %e,
                        "cascade miss, trying next provider"
                    );
                }
            }
        }
        None
    }

    /// Race all providers under a shared deadline, first success wins.
    /// Failures are non-terminating; only the deadline (or every provider
    /// settling as a failure) forces the template tier. Pending calls are
    /// abandoned when a winner is found or the deadline elapses.
    async fn run_fan_out(&self, prompt: &ProviderPrompt) -> Option<(String, ProviderId)> {
        if self.providers.is_empty() {
            return None;
        }

        let deadline = self.config.request_deadline;
        let mut attempts: FuturesUnordered<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = provider.clone();
                let prompt = prompt.clone();
                async move {
                    let result = provider.generate(&prompt, deadline).await;
                    (provider.id(), result)
                }
            })
            .collect();

        let race = async {
            while let Some((id, result)) = attempts.next().await {
                match result {
                    Ok(text) => return Some((text, id)),
                    Err(e) => {
                        warn!(provider = id.as_str(), error = %e, "fan-out attempt failed");
                    }
                }
            }
            None
        };

        match tokio::time::timeout(deadline, race).await {
            Ok(winner) => winner,
            Err(_) => {
                warn!("fan-out deadline elapsed with no success");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kawan_providers::{ChatProvider, ProviderError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Succeed(&'static str),
        Fail,
        SucceedAfter(Duration, &'static str),
        FailAfter(Duration),
    }

    struct MockProvider {
        id: ProviderId,
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn new(id: ProviderId, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                id,
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatProvider for MockProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        fn model_name(&self) -> &str {
            "mock"
        }

        async fn generate(
            &self,
            _prompt: &ProviderPrompt,
            _timeout: Duration,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Succeed(text) => Ok(text.to_string()),
                Behavior::Fail => Err(ProviderError::Unavailable("mock outage".to_string())),
                Behavior::SucceedAfter(delay, text) => {
                    tokio::time::sleep(*delay).await;
                    Ok(text.to_string())
                }
                Behavior::FailAfter(delay) => {
                    tokio::time::sleep(*delay).await;
                    Err(ProviderError::RateLimited)
                }
            }
        }
    }

    fn orchestrator(
        providers: Vec<SharedProvider>,
        strategy: FallbackStrategy,
        deadline: Duration,
    ) -> Orchestrator {
        Orchestrator::new(
            providers,
            Arc::new(ConversationMemory::new()),
            OrchestratorConfig {
                strategy,
                request_deadline: deadline,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_totality_when_every_provider_fails() {
        let providers: Vec<SharedProvider> = vec![
            MockProvider::new(ProviderId::Anthropic, Behavior::Fail),
            MockProvider::new(ProviderId::OpenAi, Behavior::Fail),
            MockProvider::new(ProviderId::Gemini, Behavior::Fail),
        ];
        let orch = orchestrator(providers, FallbackStrategy::Sequential, Duration::from_secs(5));

        let request = ChatRequest::new("hello there").with_language("english");
        let envelope = orch.respond(&request, "s1").await;

        assert!(!envelope.response.trim().is_empty());
    }

    #[tokio::test]
    async fn test_template_only_when_no_providers() {
        let orch = orchestrator(vec![], FallbackStrategy::FanOut, Duration::from_secs(5));
        let request = ChatRequest::new("hello there").with_language("english");
        let envelope = orch.respond(&request, "s1").await;
        assert!(!envelope.response.trim().is_empty());
    }

    #[tokio::test]
    async fn test_sequential_stops_at_first_success() {
        let a = MockProvider::new(ProviderId::Anthropic, Behavior::Fail);
        let b = MockProvider::new(ProviderId::OpenAi, Behavior::Succeed("from B"));
        let c = MockProvider::new(ProviderId::Gemini, Behavior::Succeed("from C"));
        let orch = orchestrator(
            vec![a.clone(), b.clone(), c.clone()],
            FallbackStrategy::Sequential,
            Duration::from_secs(5),
        );

        let request = ChatRequest::new("hello there").with_language("english");
        let envelope = orch.respond(&request, "s1").await;

        assert_eq!(envelope.response, "from B");
        assert_eq!(a.call_count(), 1);
        assert_eq!(b.call_count(), 1);
        assert_eq!(c.call_count(), 0, "C must never be invoked after B succeeds");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_out_first_success_beats_fast_failure() {
        // A succeeds slowly, B fails fast: the slow success must win
        let a = MockProvider::new(
            ProviderId::Anthropic,
            Behavior::SucceedAfter(Duration::from_millis(200), "slow success"),
        );
        let b = MockProvider::new(ProviderId::OpenAi, Behavior::FailAfter(Duration::from_millis(5)));
        let orch = orchestrator(
            vec![a, b],
            FallbackStrategy::FanOut,
            Duration::from_secs(5),
        );

        let request = ChatRequest::new("hello there").with_language("english");
        let envelope = orch.respond(&request, "s1").await;

        assert_eq!(envelope.response, "slow success");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_out_deadline_forces_template() {
        let a = MockProvider::new(
            ProviderId::Anthropic,
            Behavior::SucceedAfter(Duration::from_secs(60), "too late"),
        );
        let orch = orchestrator(
            vec![a],
            FallbackStrategy::FanOut,
            Duration::from_millis(100),
        );

        let request = ChatRequest::new("hello there").with_language("english");
        let envelope = orch.respond(&request, "s1").await;

        assert_ne!(envelope.response, "too late");
        assert!(!envelope.response.trim().is_empty());
    }

    #[tokio::test]
    async fn test_memory_records_the_exchange() {
        let b = MockProvider::new(ProviderId::OpenAi, Behavior::Succeed("nice to meet you"));
        let memory = Arc::new(ConversationMemory::new());
        let orch = Orchestrator::new(
            vec![b],
            memory.clone(),
            OrchestratorConfig::default(),
        )
        .unwrap();

        let request = ChatRequest::new("hello there").with_language("english");
        orch.respond(&request, "s1").await;

        let key = SessionKey::new(LanguageId::English, "s1");
        let recent = memory.recent(&key, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].text, "hello there");
        assert_eq!(recent[1].text, "nice to meet you");
    }

    #[tokio::test]
    async fn test_sweet_thanks_scenario() {
        // All providers down: the Thanks template pool answers, and the
        // sweet persona's empathy flows through
        let a = MockProvider::new(ProviderId::Anthropic, Behavior::Fail);
        let orch = orchestrator(vec![a], FallbackStrategy::Sequential, Duration::from_secs(5));

        let request = ChatRequest::new("Thank you so much!")
            .with_personality("sweet")
            .with_language("english");
        let envelope = orch.respond(&request, "s1").await;

        assert!(envelope.personality_traits.empathy_score >= 0.9);
        let lowered = envelope.response.to_lowercase();
        assert!(
            ["welcome", "worries", "pleasure", "mention"]
                .iter()
                .any(|w| lowered.contains(w)),
            "expected a thanks-pool response, got: {}",
            envelope.response
        );
    }

    #[tokio::test]
    async fn test_auto_language_detects_kelantan_dialect() {
        let a = MockProvider::new(ProviderId::Anthropic, Behavior::Fail);
        let orch = orchestrator(vec![a], FallbackStrategy::Sequential, Duration::from_secs(5));

        let request = ChatRequest::new("gapo khabar demo?").with_language("auto");
        let envelope = orch.respond(&request, "s1").await;

        // Kelantan profile forces the Malaysian voice and answers in dialect
        assert_eq!(envelope.voice_synthesis.voice_id, "ms-MY");
        assert!(envelope.response.to_lowercase().contains("demo"));
    }
}
