//! Response synthesizer
//!
//! Pure assembly of the outbound envelope: no network, no storage. Voice
//! parameters are derived from mood and language, the trait vector is
//! copied from the persona with a small mood perturbation, and the
//! engagement level follows the dialogue act.

use kawan_core::{
    ConversationContext, IntentCategory, LanguageProfile, Mood, MultimodalCapabilities, Persona,
    PersonalityTraits, ResponseEnvelope, Topic, TraitVector, VoiceSynthesis, BASE_SPEECH_RATE,
};

/// Assemble the final response envelope for one finalized text.
pub fn synthesize(
    text: String,
    persona: &Persona,
    profile: &LanguageProfile,
    intent: IntentCategory,
    mood: Mood,
    topic: Topic,
) -> ResponseEnvelope {
    let traits = perturb_traits(persona.traits, mood);

    let voice_id = profile
        .forced_voice
        .unwrap_or(persona.default_voice)
        .to_string();

    ResponseEnvelope {
        voice_synthesis: VoiceSynthesis {
            text: text.clone(),
            voice_id,
            emotional_tone: mood.as_str().to_string(),
            speech_rate: speech_rate_for(mood),
        },
        conversation_context: ConversationContext {
            mood: mood.as_str().to_string(),
            topic: topic.as_str().to_string(),
            engagement_level: engagement_for(intent),
        },
        personality_traits: PersonalityTraits::from(traits),
        multimodal_capabilities: MultimodalCapabilities::default(),
        response: text,
    }
}

/// Scale the baseline rate slightly by mood: cheerful speeds up,
/// supportive slows down.
fn speech_rate_for(mood: Mood) -> f32 {
    match mood {
        Mood::Cheerful => BASE_SPEECH_RATE + 0.15,
        Mood::Curious => BASE_SPEECH_RATE + 0.05,
        Mood::Supportive => BASE_SPEECH_RATE - 0.05,
        Mood::Friendly => BASE_SPEECH_RATE,
    }
}

/// How engaged the conversation feels, by dialogue act
fn engagement_for(intent: IntentCategory) -> f32 {
    match intent {
        IntentCategory::Greeting | IntentCategory::Thanks => 0.9,
        IntentCategory::Question | IntentCategory::HelpRequest => 0.85,
        IntentCategory::ReactionNeeded => 0.9,
        IntentCategory::Casual => 0.8,
    }
}

/// Nudge the persona's vector toward the detected mood, clamped to [0, 1]
fn perturb_traits(traits: TraitVector, mood: Mood) -> TraitVector {
    let mut traits = traits;
    match mood {
        Mood::Cheerful => traits.humor += 0.05,
        Mood::Supportive => traits.empathy += 0.05,
        Mood::Curious | Mood::Friendly => {}
    }
    traits.clamped()
}
