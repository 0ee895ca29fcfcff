//! Request/response wire contract
//!
//! These are the only types crossing the boundary to the UI and voice
//! layers. The request accepts the caller's `voiceEnabled` camelCase key;
//! the response is all snake_case. `ResponseEnvelope.response` is never
//! empty: the template tier guarantees a final text even when every
//! provider fails.

use serde::{Deserialize, Serialize};

use crate::TraitVector;

/// Inbound chat request from the UI layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Persona identifier; unknown values fail closed to the default persona
    #[serde(default)]
    pub personality: String,
    /// Language code; `"auto"` triggers marker-word detection
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(rename = "voiceEnabled", default)]
    pub voice_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn default_language() -> String {
    "auto".to_string()
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            personality: String::new(),
            language: default_language(),
            voice_enabled: false,
            context: None,
        }
    }

    pub fn with_personality(mut self, personality: &str) -> Self {
        self.personality = personality.to_string();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }
}

/// Trait vector as exposed on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub humor_level: f32,
    pub directness: f32,
    pub emotional_range: f32,
    pub sass_factor: f32,
    pub empathy_score: f32,
}

impl From<TraitVector> for PersonalityTraits {
    fn from(v: TraitVector) -> Self {
        let v = v.clamped();
        Self {
            humor_level: v.humor,
            directness: v.directness,
            emotional_range: v.emotional_range,
            sass_factor: v.sass,
            empathy_score: v.empathy,
        }
    }
}

/// Parameters for the downstream voice synthesizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSynthesis {
    pub text: String,
    pub voice_id: String,
    pub emotional_tone: String,
    pub speech_rate: f32,
}

/// Derived conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub mood: String,
    pub topic: String,
    pub engagement_level: f32,
}

/// Static capability flags advertised to the UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MultimodalCapabilities {
    pub can_process_images: bool,
    pub can_generate_voice: bool,
    pub can_understand_context: bool,
}

impl Default for MultimodalCapabilities {
    fn default() -> Self {
        Self {
            can_process_images: true,
            can_generate_voice: true,
            can_understand_context: true,
        }
    }
}

/// Outbound response envelope for the UI/voice layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub response: String,
    pub personality_traits: PersonalityTraits,
    pub voice_synthesis: VoiceSynthesis,
    pub conversation_context: ConversationContext,
    pub multimodal_capabilities: MultimodalCapabilities,
}
