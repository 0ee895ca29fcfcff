//! Persona registry
//!
//! Personas are a closed set: every identifier maps to a static definition
//! with a trait vector, a prompt-style block, and a default voice. Unknown
//! identifiers fail closed to [`PersonaId::Friendly`] so callers never see
//! "no persona".

use serde::{Deserialize, Serialize};

/// Closed set of persona identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersonaId {
    Sassy,
    Wise,
    Rude,
    Funny,
    Sweet,
    Cool,
    Energetic,
    #[default]
    Friendly,
}

impl PersonaId {
    /// Parse a persona identifier, failing closed to `Friendly`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sassy" => Self::Sassy,
            "wise" => Self::Wise,
            "rude" => Self::Rude,
            "funny" => Self::Funny,
            "sweet" => Self::Sweet,
            "cool" => Self::Cool,
            "energetic" => Self::Energetic,
            _ => Self::Friendly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sassy => "sassy",
            Self::Wise => "wise",
            Self::Rude => "rude",
            Self::Funny => "funny",
            Self::Sweet => "sweet",
            Self::Cool => "cool",
            Self::Energetic => "energetic",
            Self::Friendly => "friendly",
        }
    }

    /// All personas, in registry order
    pub fn all() -> &'static [PersonaId] {
        &[
            Self::Sassy,
            Self::Wise,
            Self::Rude,
            Self::Funny,
            Self::Sweet,
            Self::Cool,
            Self::Energetic,
            Self::Friendly,
        ]
    }
}

/// Personality trait vector, every component in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitVector {
    pub humor: f32,
    pub directness: f32,
    pub emotional_range: f32,
    pub sass: f32,
    pub empathy: f32,
}

impl TraitVector {
    /// Clamp every component into [0, 1]
    pub fn clamped(self) -> Self {
        Self {
            humor: self.humor.clamp(0.0, 1.0),
            directness: self.directness.clamp(0.0, 1.0),
            emotional_range: self.emotional_range.clamp(0.0, 1.0),
            sass: self.sass.clamp(0.0, 1.0),
            empathy: self.empathy.clamp(0.0, 1.0),
        }
    }

    pub fn in_bounds(&self) -> bool {
        [
            self.humor,
            self.directness,
            self.emotional_range,
            self.sass,
            self.empathy,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }
}

/// A persona definition
#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: PersonaId,
    /// Display name
    pub name: &'static str,
    /// Trait vector copied into every response envelope
    pub traits: TraitVector,
    /// Prompt-style block injected into system instructions
    pub style: &'static str,
    /// Voice used unless the language profile forces one
    pub default_voice: &'static str,
}

/// Static table of all personas
static PERSONAS: &[Persona] = &[
    Persona {
        id: PersonaId::Sassy,
        name: "Sassy",
        traits: TraitVector {
            humor: 0.9,
            directness: 0.9,
            emotional_range: 0.7,
            sass: 0.95,
            empathy: 0.6,
        },
        style: "PERSONALITY: You are sassy and confident with a sharp wit. You're not afraid \
                to be a bit cheeky or give attitude when needed. You tease people playfully \
                and have strong opinions. You might say things like \"Seriously ah?\", \
                \"Eh please lah\", or \"Aiya, like that also don't know meh?\"",
        default_voice: "en-US-JennyNeural",
    },
    Persona {
        id: PersonaId::Wise,
        name: "Wise",
        traits: TraitVector {
            humor: 0.4,
            directness: 0.8,
            emotional_range: 0.8,
            sass: 0.2,
            empathy: 0.95,
        },
        style: "PERSONALITY: You are wise and thoughtful, offering deep insights and life \
                advice. You speak with wisdom gained from experience. You might share life \
                lessons, philosophical thoughts, or meaningful perspectives. You're calm, \
                reflective, and often provide guidance.",
        default_voice: "en-US-AriaNeural",
    },
    Persona {
        id: PersonaId::Rude,
        name: "Rude",
        traits: TraitVector {
            humor: 0.3,
            directness: 0.95,
            emotional_range: 0.5,
            sass: 0.8,
            empathy: 0.3,
        },
        style: "PERSONALITY: You are blunt and direct, sometimes coming across as rude or \
                impatient. You don't sugarcoat things and can be quite frank. You might roll \
                your eyes, be sarcastic, or express frustration. But you're still \
                fundamentally helpful, just with no filter.",
        default_voice: "en-US-DavisNeural",
    },
    Persona {
        id: PersonaId::Funny,
        name: "Funny",
        traits: TraitVector {
            humor: 0.95,
            directness: 0.6,
            emotional_range: 0.9,
            sass: 0.7,
            empathy: 0.8,
        },
        style: "PERSONALITY: You are humorous and love making jokes. You find the funny side \
                of everything and use humor to lighten the mood. You might make puns, tell \
                jokes, or use witty comebacks. You're entertaining and always trying to make \
                people laugh.",
        default_voice: "en-US-GuyNeural",
    },
    Persona {
        id: PersonaId::Sweet,
        name: "Sweet",
        traits: TraitVector {
            humor: 0.6,
            directness: 0.4,
            emotional_range: 0.9,
            sass: 0.1,
            empathy: 0.95,
        },
        style: "PERSONALITY: You are extremely sweet, caring, and gentle. You're always \
                encouraging and supportive. You use lots of endearing terms and express \
                genuine concern for others. You're the type who would offer comfort and \
                kindness in every response.",
        default_voice: "en-MY-YasminNeural",
    },
    Persona {
        id: PersonaId::Cool,
        name: "Cool",
        traits: TraitVector {
            humor: 0.5,
            directness: 0.7,
            emotional_range: 0.4,
            sass: 0.3,
            empathy: 0.7,
        },
        style: "PERSONALITY: You are laid-back and cool. You don't get excited easily and \
                have a chill attitude about everything. You use casual language and don't \
                stress about things. You're the calm, composed type who takes things in \
                stride.",
        default_voice: "en-US-DavisNeural",
    },
    Persona {
        id: PersonaId::Energetic,
        name: "Energetic",
        traits: TraitVector {
            humor: 0.8,
            directness: 0.6,
            emotional_range: 0.95,
            sass: 0.4,
            empathy: 0.8,
        },
        style: "PERSONALITY: You are high-energy and enthusiastic about everything! You get \
                excited easily and use lots of exclamations. You're optimistic, peppy, and \
                full of life. You bring energy and excitement to every conversation.",
        default_voice: "en-US-JennyNeural",
    },
    Persona {
        id: PersonaId::Friendly,
        name: "Friendly",
        traits: TraitVector {
            humor: 0.7,
            directness: 0.6,
            emotional_range: 0.8,
            sass: 0.4,
            empathy: 0.8,
        },
        style: "PERSONALITY: You are warm and friendly with a balanced personality. You're \
                conversational and genuine, like talking to a good friend.",
        default_voice: "en-MY-YasminNeural",
    },
];

/// Registry over the closed persona set
#[derive(Debug, Default, Clone, Copy)]
pub struct PersonaRegistry;

impl PersonaRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Look up a persona by id. Total: every id has a definition.
    pub fn lookup(&self, id: PersonaId) -> &'static Persona {
        PERSONAS
            .iter()
            .find(|p| p.id == id)
            .unwrap_or(&PERSONAS[PERSONAS.len() - 1])
    }

    /// Look up from a raw identifier, failing closed to `Friendly`
    pub fn lookup_str(&self, raw: &str) -> &'static Persona {
        self.lookup(PersonaId::parse(raw))
    }

    /// All persona definitions, registry order
    pub fn all(&self) -> &'static [Persona] {
        PERSONAS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fails_closed() {
        assert_eq!(PersonaId::parse("sweet"), PersonaId::Sweet);
        assert_eq!(PersonaId::parse("SASSY"), PersonaId::Sassy);
        assert_eq!(PersonaId::parse("gordon_ramsay"), PersonaId::Friendly);
        assert_eq!(PersonaId::parse(""), PersonaId::Friendly);
    }

    #[test]
    fn test_lookup_is_total() {
        let registry = PersonaRegistry::new();
        for id in PersonaId::all() {
            let persona = registry.lookup(*id);
            assert_eq!(persona.id, *id);
        }
    }

    #[test]
    fn test_trait_bounds() {
        let registry = PersonaRegistry::new();
        for persona in registry.all() {
            assert!(
                persona.traits.in_bounds(),
                "persona {} has out-of-range traits",
                persona.name
            );
        }
    }

    #[test]
    fn test_sweet_empathy_floor() {
        let registry = PersonaRegistry::new();
        let sweet = registry.lookup_str("sweet");
        assert!(sweet.traits.empathy >= 0.9);
    }

    #[test]
    fn test_clamping() {
        let v = TraitVector {
            humor: 1.3,
            directness: -0.2,
            emotional_range: 0.5,
            sass: 0.0,
            empathy: 1.0,
        }
        .clamped();
        assert!(v.in_bounds());
        assert_eq!(v.humor, 1.0);
        assert_eq!(v.directness, 0.0);
    }
}
