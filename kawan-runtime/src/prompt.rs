//! Prompt builder
//!
//! Assembles provider-agnostic system instructions from the language
//! fragment, the persona's style block rendered with its trait vector, an
//! intent-specific hint, and recent turns for continuity. Deterministic
//! given identical inputs - no randomness here, to keep prompts testable.

use std::fmt::Write;

use kawan_core::{DialogueTurn, IntentCategory, LanguageProfile, Persona, Speaker};
use kawan_providers::ProviderPrompt;

/// Sass level at or above which blunt phrasing is explicitly permitted
const SASS_BLUNT_THRESHOLD: f32 = 0.7;

/// Empathy level at or above which supportive framing is requested
const EMPATHY_SUPPORT_THRESHOLD: f32 = 0.8;

/// Builds provider prompts from persona, language, intent, and history
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the full provider prompt for one request
    pub fn build(
        &self,
        persona: &Persona,
        profile: &LanguageProfile,
        intent: IntentCategory,
        recent_turns: &[DialogueTurn],
        user_message: &str,
    ) -> ProviderPrompt {
        let mut system = String::new();

        // (a) language/dialect fragment
        system.push_str(profile.prompt_fragment);
        system.push_str("\n\n");

        // (b) persona style rendered from the trait vector
        system.push_str(persona.style);
        system.push('\n');
        let _ = write!(
            system,
            "\nTRAIT LEVELS:\n\
             - Humor: {:.0}%\n\
             - Directness: {:.0}%\n\
             - Emotional range: {:.0}%\n\
             - Sass: {:.0}%\n\
             - Empathy: {:.0}%\n",
            persona.traits.humor * 100.0,
            persona.traits.directness * 100.0,
            persona.traits.emotional_range * 100.0,
            persona.traits.sass * 100.0,
            persona.traits.empathy * 100.0,
        );
        if persona.traits.sass >= SASS_BLUNT_THRESHOLD {
            system.push_str("You may be blunt and cheeky; don't soften your phrasing.\n");
        }
        if persona.traits.empathy >= EMPATHY_SUPPORT_THRESHOLD {
            system.push_str(
                "Lead with warmth: acknowledge how the person feels before anything else.\n",
            );
        }

        // (c) intent-specific hint
        system.push('\n');
        system.push_str(intent_hint(intent));
        system.push('\n');

        // Recent turns for continuity
        if !recent_turns.is_empty() {
            system.push_str("\nRecent conversation:\n");
            for turn in recent_turns {
                let label = match turn.speaker {
                    Speaker::User => "User",
                    Speaker::Assistant => "You",
                };
                let _ = writeln!(system, "{}: {}", label, turn.text);
            }
        }

        ProviderPrompt::new(system, user_message)
    }
}

fn intent_hint(intent: IntentCategory) -> &'static str {
    match intent {
        IntentCategory::Greeting => {
            "The user is greeting you. Greet back warmly and ask how they're doing."
        }
        IntentCategory::Thanks => {
            "The user is thanking you. Accept graciously and offer further help."
        }
        IntentCategory::HelpRequest => {
            "The user wants help. Say clearly what you can do and invite specifics."
        }
        IntentCategory::ReactionNeeded => {
            "The user shared something emotionally charged. React to it first, advice second."
        }
        IntentCategory::Question => {
            "The user asked a question. Explain directly before elaborating."
        }
        IntentCategory::Casual => {
            "Casual conversation. Keep it light and natural, like chatting with a friend."
        }
    }
}
