//! Intent, mood, and topic classification
//!
//! The intent classifier is an ordered rule list, first match wins:
//! greeting, thanks, help request, reaction, question, casual. Greetings and
//! thanks are checked before the more general question/reaction rules so
//! that "thanks, that's great, how are you?" resolves to `Thanks`, not
//! `Question`. Mood and topic are non-authoritative keyword hints.

use serde::{Deserialize, Serialize};

use crate::LanguageProfile;

/// Dialogue-act categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Greeting,
    Thanks,
    HelpRequest,
    ReactionNeeded,
    Question,
    Casual,
}

impl IntentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Thanks => "thanks",
            Self::HelpRequest => "help_request",
            Self::ReactionNeeded => "reaction_needed",
            Self::Question => "question",
            Self::Casual => "casual",
        }
    }
}

/// Conversational mood hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Cheerful,
    Supportive,
    Curious,
    #[default]
    Friendly,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cheerful => "cheerful",
            Self::Supportive => "supportive",
            Self::Curious => "curious",
            Self::Friendly => "friendly",
        }
    }
}

/// Topic guess for the conversation context block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Work,
    Food,
    Weather,
    Family,
    Technology,
    #[default]
    General,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Food => "food",
            Self::Weather => "weather",
            Self::Family => "family",
            Self::Technology => "technology",
            Self::General => "general",
        }
    }
}

/// Emotionally charged words that warrant a reaction rather than a plain reply
const REACTION_TRIGGERS: &[&str] = &[
    "wow",
    "amazing",
    "terrible",
    "great",
    "awesome",
    "bad",
    "problem",
    "issue",
    "stuck",
    "confused",
    "excited",
    "happy",
    "sad",
    "angry",
    "frustrated",
];

/// Classify a message into a dialogue-act category.
///
/// Pure function: same message and profile always yield the same category.
pub fn classify(message: &str, profile: &LanguageProfile) -> IntentCategory {
    let lowered = message.to_lowercase();

    if profile.has_greeting(&lowered) {
        return IntentCategory::Greeting;
    }
    if profile.has_gratitude(&lowered) {
        return IntentCategory::Thanks;
    }
    if profile.has_help_request(&lowered) {
        return IntentCategory::HelpRequest;
    }
    if REACTION_TRIGGERS.iter().any(|w| lowered.contains(w)) {
        return IntentCategory::ReactionNeeded;
    }
    if lowered.contains('?') || profile.has_question_word(&lowered) {
        return IntentCategory::Question;
    }
    IntentCategory::Casual
}

/// Derive a mood hint from the message. Ties default to `Friendly`.
pub fn derive_mood(message: &str) -> Mood {
    let lowered = message.to_lowercase();
    if ["happy", "excited", "great"].iter().any(|w| lowered.contains(w)) {
        return Mood::Cheerful;
    }
    if ["sad", "problem", "help"].iter().any(|w| lowered.contains(w)) {
        return Mood::Supportive;
    }
    if lowered.contains('?') {
        return Mood::Curious;
    }
    Mood::Friendly
}

/// Guess the topic from keyword presence. Ties default to `General`.
pub fn extract_topic(message: &str) -> Topic {
    let lowered = message.to_lowercase();
    if ["work", "job", "kerja"].iter().any(|w| lowered.contains(w)) {
        return Topic::Work;
    }
    if ["food", "makan", "eat"].iter().any(|w| lowered.contains(w)) {
        return Topic::Food;
    }
    if ["weather", "cuaca", "rain"].iter().any(|w| lowered.contains(w)) {
        return Topic::Weather;
    }
    if ["family", "keluarga"].iter().any(|w| lowered.contains(w)) {
        return Topic::Family;
    }
    if ["tech", "computer", "coding", "komputer", "software"]
        .iter()
        .any(|w| lowered.contains(w))
    {
        return Topic::Technology;
    }
    Topic::General
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageId;

    fn english() -> &'static LanguageProfile {
        LanguageId::English.profile()
    }

    #[test]
    fn test_greeting_beats_question() {
        // Contains both a greeting word and a question mark
        assert_eq!(classify("hello, how are you?", english()), IntentCategory::Greeting);
    }

    #[test]
    fn test_bare_hi_is_a_greeting() {
        assert_eq!(classify("hi", english()), IntentCategory::Greeting);
        assert_eq!(classify("Hi!", english()), IntentCategory::Greeting);
        // "this" must not trigger the "hi" greeting word
        assert_eq!(classify("just think about this", english()), IntentCategory::Casual);
    }

    #[test]
    fn test_thanks_beats_reaction_and_question() {
        assert_eq!(
            classify("thanks, that's great, how are you?", english()),
            IntentCategory::Thanks
        );
        assert_eq!(classify("Thank you so much!", english()), IntentCategory::Thanks);
    }

    #[test]
    fn test_help_request() {
        assert_eq!(
            classify("can you assist me with this", english()),
            IntentCategory::HelpRequest
        );
        assert_eq!(
            classify("tolong saya sikit", LanguageId::Malay.profile()),
            IntentCategory::HelpRequest
        );
    }

    #[test]
    fn test_reaction_needed() {
        assert_eq!(classify("I'm stuck on this bug", english()), IntentCategory::ReactionNeeded);
        assert_eq!(classify("that was terrible", english()), IntentCategory::ReactionNeeded);
    }

    #[test]
    fn test_question_via_mark_and_word() {
        assert_eq!(classify("is it raining today?", english()), IntentCategory::Question);
        assert_eq!(
            classify("gapo cerito demo", LanguageId::Kelantan.profile()),
            IntentCategory::Question
        );
    }

    #[test]
    fn test_casual_default() {
        assert_eq!(classify("just chilling at home", english()), IntentCategory::Casual);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let message = "hello, how are you?";
        let first = classify(message, english());
        let second = classify(message, english());
        assert_eq!(first, second);
    }

    #[test]
    fn test_mood_hints() {
        assert_eq!(derive_mood("I'm so happy today"), Mood::Cheerful);
        assert_eq!(derive_mood("I have a problem"), Mood::Supportive);
        assert_eq!(derive_mood("where is it?"), Mood::Curious);
        assert_eq!(derive_mood("Thank you so much!"), Mood::Friendly);
    }

    #[test]
    fn test_topic_hints() {
        assert_eq!(extract_topic("my job is exhausting"), Topic::Work);
        assert_eq!(extract_topic("jom makan"), Topic::Food);
        assert_eq!(extract_topic("nothing much"), Topic::General);
    }
}
