//! Language profiles and dialect detection
//!
//! Three profiles are supported: English (base), Malay (Manglish), and the
//! Kelantan dialect. Detection is a marker-word presence check; Kelantan
//! markers are tested before base Malay so dialect text like "gapo khabar
//! demo?" resolves to the dialect profile, not the base language.

use serde::{Deserialize, Serialize};

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LanguageId {
    #[default]
    English,
    Malay,
    Kelantan,
}

impl LanguageId {
    /// Parse a language code; `"auto"` and unknown codes return `None`
    /// so the caller can run [`LanguageId::detect`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" | "en-us" => Some(Self::English),
            "ms" | "malay" | "manglish" => Some(Self::Malay),
            "kelantan" | "kelate" => Some(Self::Kelantan),
            _ => None,
        }
    }

    /// Best-effort detection from raw text using dialect markers.
    /// Defaults to English when no markers match.
    pub fn detect(text: &str) -> Self {
        let lowered = text.to_lowercase();
        if contains_any(&lowered, KELANTAN_PROFILE.dialect_markers) {
            return Self::Kelantan;
        }
        if contains_any(&lowered, MALAY_PROFILE.dialect_markers) {
            return Self::Malay;
        }
        Self::English
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Malay => "ms",
            Self::Kelantan => "kelantan",
        }
    }

    /// The static profile for this language
    pub fn profile(&self) -> &'static LanguageProfile {
        match self {
            Self::English => &ENGLISH_PROFILE,
            Self::Malay => &MALAY_PROFILE,
            Self::Kelantan => &KELANTAN_PROFILE,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Multi-word needles match as substrings; single words match whole tokens
/// only, so "hi" matches "hi!" but not "this".
fn contains_word_or_phrase(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| {
        if n.contains(' ') {
            haystack.contains(n)
        } else {
            haystack
                .split(|c: char| !c.is_alphanumeric() && c != '\'')
                .any(|token| token == *n)
        }
    })
}

/// A language/dialect profile: marker words for detection, word lists for
/// intent classification, and a prompt fragment for system instructions
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub id: LanguageId,
    /// Words whose presence selects this profile under `"auto"`
    pub dialect_markers: &'static [&'static str],
    pub greeting_words: &'static [&'static str],
    pub gratitude_words: &'static [&'static str],
    pub help_words: &'static [&'static str],
    pub question_words: &'static [&'static str],
    /// Language instructions prepended to every system prompt
    pub prompt_fragment: &'static str,
    /// Some languages force a voice regardless of persona
    pub forced_voice: Option<&'static str>,
}

impl LanguageProfile {
    pub fn has_greeting(&self, lowered: &str) -> bool {
        contains_word_or_phrase(lowered, self.greeting_words)
    }

    pub fn has_gratitude(&self, lowered: &str) -> bool {
        contains_any(lowered, self.gratitude_words)
    }

    pub fn has_help_request(&self, lowered: &str) -> bool {
        contains_any(lowered, self.help_words)
    }

    pub fn has_question_word(&self, lowered: &str) -> bool {
        contains_any(lowered, self.question_words)
    }
}

static ENGLISH_PROFILE: LanguageProfile = LanguageProfile {
    id: LanguageId::English,
    dialect_markers: &[],
    greeting_words: &[
        "hello",
        "hi",
        "hey",
        "good morning",
        "good afternoon",
        "good evening",
        "what's up",
    ],
    gratitude_words: &["thank", "thanks", "tq", "appreciate", "grateful"],
    help_words: &["help", "assist", "support", "can you"],
    question_words: &["what", "how", "why", "when", "where", "who"],
    prompt_fragment: "You speak natural English with occasional Malaysian expressions like \
                      \"lah\", \"kan?\" and mix in some Malay words when appropriate.",
    forced_voice: None,
};

static MALAY_PROFILE: LanguageProfile = LanguageProfile {
    id: LanguageId::Malay,
    dialect_markers: &[
        "apa", "macam", "mana", "boleh", "saya", "awak", "kamu", "tak ", "tidak",
    ],
    greeting_words: &[
        "hello",
        "hi",
        "hey",
        "hai",
        "halo",
        "apa khabar",
        "selamat pagi",
        "selamat petang",
        "assalamualaikum",
    ],
    gratitude_words: &["thank", "thanks", "terima kasih", "tq", "appreciate"],
    help_words: &["help", "tolong", "assist", "boleh tak", "can you"],
    question_words: &[
        "apa", "macam", "mana", "kenapa", "bila", "di mana", "siapa", "what", "how", "why",
    ],
    prompt_fragment: "You speak naturally in Manglish - mixing Bahasa Malaysia and English. \
                      Use \"lah\", \"kan\", \"tu\", \"ni\" particles naturally, like \
                      \"Wah, that's quite interesting lah!\" or \"Serious ah? That's news to me!\"",
    forced_voice: Some("ms-MY"),
};

static KELANTAN_PROFILE: LanguageProfile = LanguageProfile {
    id: LanguageId::Kelantan,
    dialect_markers: &[
        "gapo", "demo", "hok ", "dok", "tubik", "buleh", "tanye", "kelate",
    ],
    greeting_words: &[
        "hello",
        "hi",
        "hey",
        "hai",
        "gapo khabar",
        "selamat pagi",
        "assalamualaikum",
    ],
    gratitude_words: &["thank", "thanks", "terima kasih", "tq"],
    help_words: &["help", "tolong", "buleh dok", "can you"],
    question_words: &[
        "gapo", "macam mano", "bilo", "mano", "siape", "what", "how", "why",
    ],
    prompt_fragment: "You speak naturally in Kelantan dialect (loghat Kelate) with authentic \
                      expressions: \"Gapo khabar?\" (How are you?), \"Demo sihat dok?\" \
                      (Are you healthy?), \"Hok ni\" (I/me), \"Demo\" (You), \"Buleh\" (Can), \
                      \"Bagus gok\" (Very good), \"Betul gok tu\" (That's really true).",
    forced_voice: Some("ms-MY"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(LanguageId::parse("english"), Some(LanguageId::English));
        assert_eq!(LanguageId::parse("ms"), Some(LanguageId::Malay));
        assert_eq!(LanguageId::parse("kelantan"), Some(LanguageId::Kelantan));
        assert_eq!(LanguageId::parse("auto"), None);
        assert_eq!(LanguageId::parse("zh"), None);
    }

    #[test]
    fn test_detect_kelantan_before_malay() {
        // "gapo" is a Kelantan marker even though "khabar" alone would not be
        assert_eq!(LanguageId::detect("gapo khabar demo?"), LanguageId::Kelantan);
    }

    #[test]
    fn test_detect_malay() {
        assert_eq!(
            LanguageId::detect("apa khabar, boleh tolong saya?"),
            LanguageId::Malay
        );
    }

    #[test]
    fn test_detect_defaults_to_english() {
        assert_eq!(LanguageId::detect("hello there, how are you?"), LanguageId::English);
        assert_eq!(LanguageId::detect(""), LanguageId::English);
    }

    #[test]
    fn test_greeting_matches_whole_tokens() {
        let profile = LanguageId::English.profile();
        assert!(profile.has_greeting("hi"));
        assert!(profile.has_greeting("hi!"));
        assert!(profile.has_greeting("hi there"));
        // Single-word greetings must not match inside other words
        assert!(!profile.has_greeting("this is fine"));
        assert!(!profile.has_greeting("they went home"));
    }

    #[test]
    fn test_forced_voice() {
        assert_eq!(LanguageId::English.profile().forced_voice, None);
        assert_eq!(LanguageId::Malay.profile().forced_voice, Some("ms-MY"));
        assert_eq!(LanguageId::Kelantan.profile().forced_voice, Some("ms-MY"));
    }
}
