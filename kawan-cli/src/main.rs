//! Kawan CLI
//!
//! Chat with the personality engine from the terminal. Providers are wired
//! from whichever API keys are present in the environment; with no keys at
//! all the engine still answers from its template tier.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use kawan_core::{classify, derive_mood, extract_topic, ChatRequest, LanguageId, PersonaRegistry};
use kawan_providers::{
    AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider, OpenAiCompatConfig,
    OpenAiProvider, SharedProvider,
};
use kawan_runtime::{
    ConversationMemory, FallbackStrategy, Orchestrator, OrchestratorConfig,
};

#[derive(Parser)]
#[command(name = "kawan")]
#[command(author, version, about = "Kawan: personality-driven multilingual AI companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one chat message and print the response envelope
    Chat {
        /// The message to send
        #[arg(short, long)]
        message: String,

        /// Persona: sassy, wise, rude, funny, sweet, cool, energetic, friendly
        #[arg(short, long, default_value = "friendly")]
        personality: String,

        /// Language: english, ms, kelantan, or auto to detect from the message
        #[arg(short, long, default_value = "auto")]
        language: String,

        /// Session id for conversation continuity (random if omitted)
        #[arg(short, long)]
        session: Option<String>,

        /// Race all providers instead of the sequential cascade
        #[arg(long)]
        fanout: bool,

        /// Request deadline in seconds
        #[arg(long, default_value = "20")]
        timeout: u64,

        /// Anthropic API key (or set ANTHROPIC_API_KEY env var)
        #[arg(long, env = "ANTHROPIC_API_KEY")]
        anthropic_key: Option<String>,

        /// OpenAI API key (or set OPENAI_API_KEY env var)
        #[arg(long, env = "OPENAI_API_KEY")]
        openai_key: Option<String>,

        /// Gemini API key (or set GEMINI_API_KEY env var)
        #[arg(long, env = "GEMINI_API_KEY")]
        gemini_key: Option<String>,

        /// xAI API key (or set XAI_API_KEY env var)
        #[arg(long, env = "XAI_API_KEY")]
        xai_key: Option<String>,

        /// Anthropic model
        #[arg(long, default_value = "claude-sonnet-4-20250514")]
        anthropic_model: String,

        /// OpenAI model
        #[arg(long, default_value = "gpt-4o")]
        openai_model: String,

        /// Gemini model
        #[arg(long, default_value = "gemini-1.5-flash")]
        gemini_model: String,

        /// Grok model
        #[arg(long, default_value = "grok-2-1212")]
        grok_model: String,
    },

    /// List the available personas and their trait vectors
    Personas,

    /// Show what the engine detects in a message (language, intent, mood)
    Detect {
        /// The message to analyze
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Chat {
            message,
            personality,
            language,
            session,
            fanout,
            timeout,
            anthropic_key,
            openai_key,
            gemini_key,
            xai_key,
            anthropic_model,
            openai_model,
            gemini_model,
            grok_model,
        } => {
            let keys = ProviderKeys {
                anthropic: anthropic_key,
                openai: openai_key,
                gemini: gemini_key,
                xai: xai_key,
            };
            let models = ProviderModels {
                anthropic: anthropic_model,
                openai: openai_model,
                gemini: gemini_model,
                grok: grok_model,
            };
            run_chat(
                &message,
                &personality,
                &language,
                session,
                fanout,
                timeout,
                keys,
                models,
            )
            .await?;
        }
        Commands::Personas => {
            list_personas();
        }
        Commands::Detect { text } => {
            detect(&text);
        }
    }

    Ok(())
}

struct ProviderKeys {
    anthropic: Option<String>,
    openai: Option<String>,
    gemini: Option<String>,
    xai: Option<String>,
}

struct ProviderModels {
    anthropic: String,
    openai: String,
    gemini: String,
    grok: String,
}

/// Wire up one provider per available key, in fallback priority order.
fn build_providers(keys: &ProviderKeys, models: &ProviderModels) -> Vec<SharedProvider> {
    let mut providers: Vec<SharedProvider> = Vec::new();

    if let Some(key) = &keys.anthropic {
        providers.push(Arc::new(AnthropicProvider::new(AnthropicConfig::new(
            key,
            &models.anthropic,
        ))));
    }
    if let Some(key) = &keys.openai {
        providers.push(Arc::new(OpenAiProvider::new(OpenAiCompatConfig::openai(
            key,
            &models.openai,
        ))));
    }
    if let Some(key) = &keys.gemini {
        providers.push(Arc::new(GeminiProvider::new(GeminiConfig::new(
            key,
            &models.gemini,
        ))));
    }
    if let Some(key) = &keys.xai {
        providers.push(Arc::new(OpenAiProvider::new(OpenAiCompatConfig::grok(
            key,
            &models.grok,
        ))));
    }

    providers
}

#[allow(clippy::too_many_arguments)]
async fn run_chat(
    message: &str,
    personality: &str,
    language: &str,
    session: Option<String>,
    fanout: bool,
    timeout: u64,
    keys: ProviderKeys,
    models: ProviderModels,
) -> Result<()> {
    println!("🤝 Kawan - your AI kawan\n");

    let providers = build_providers(&keys, &models);
    let names: Vec<&str> = providers.iter().map(|p| p.id().as_str()).collect();
    if names.is_empty() {
        println!("📡 Providers: none (template tier only)");
    } else {
        println!("📡 Providers: {}", names.join(" → "));
    }

    let strategy = if fanout {
        FallbackStrategy::FanOut
    } else {
        FallbackStrategy::Sequential
    };
    println!(
        "🎭 Persona: {} | 🗣️ Language: {} | ⚡ Strategy: {:?} | ⏱️ Deadline: {}s",
        personality, language, strategy, timeout
    );

    let session_id = session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    println!("💬 Session: {}\n", session_id);

    let config = OrchestratorConfig {
        strategy,
        request_deadline: Duration::from_secs(timeout),
        ..Default::default()
    };
    let orchestrator = Orchestrator::new(providers, Arc::new(ConversationMemory::new()), config)?;

    let request = ChatRequest::new(message)
        .with_personality(personality)
        .with_language(language);

    let envelope = orchestrator.respond(&request, &session_id).await;

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}

fn list_personas() {
    println!("🎭 Available personas:\n");

    let registry = PersonaRegistry::new();
    for persona in registry.all() {
        let t = persona.traits;
        println!(
            "  {:<10} humor {:>3.0}% | directness {:>3.0}% | emotion {:>3.0}% | sass {:>3.0}% | empathy {:>3.0}%",
            persona.id.as_str(),
            t.humor * 100.0,
            t.directness * 100.0,
            t.emotional_range * 100.0,
            t.sass * 100.0,
            t.empathy * 100.0,
        );
    }
    println!("\nUse with: kawan chat -m \"hello\" -p sassy");
}

fn detect(text: &str) {
    let language = LanguageId::detect(text);
    let profile = language.profile();
    let intent = classify(text, profile);
    let mood = derive_mood(text);
    let topic = extract_topic(text);

    println!("🔍 Analysis of: {}\n", text);
    println!("  Language: {}", language.as_str());
    println!("  Intent:   {}", intent.as_str());
    println!("  Mood:     {}", mood.as_str());
    println!("  Topic:    {}", topic.as_str());
    if let Some(voice) = profile.forced_voice {
        println!("  Voice:    {} (forced by language)", voice);
    }
}
