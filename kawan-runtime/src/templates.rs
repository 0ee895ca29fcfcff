//! Template tier
//!
//! The terminal fallback: canned responses keyed by (language, intent),
//! embedded as TOML files and validated at startup. Selection among
//! same-key alternatives is pseudo-random to avoid repetitive output, and
//! `Question` picks an opener plus a contextual tail. Once constructed,
//! selection is total - it can never fail.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;

use kawan_core::{IntentCategory, LanguageId};

/// Errors detected while loading template pools. These are configuration
/// bugs and must abort startup, never a request.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to parse template pool for {language}: {source}")]
    Parse {
        language: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("empty template list `{list}` for language {language}")]
    EmptyList {
        language: &'static str,
        list: &'static str,
    },
}

/// One language's canned responses
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatePool {
    greetings: Vec<String>,
    thanks: Vec<String>,
    help: Vec<String>,
    reactions: Vec<String>,
    questions: Vec<String>,
    casual: Vec<String>,
    /// Tails appended to question openers
    contextual: Vec<String>,
}

impl TemplatePool {
    fn list(&self, intent: IntentCategory) -> &[String] {
        match intent {
            IntentCategory::Greeting => &self.greetings,
            IntentCategory::Thanks => &self.thanks,
            IntentCategory::HelpRequest => &self.help,
            IntentCategory::ReactionNeeded => &self.reactions,
            IntentCategory::Question => &self.questions,
            IntentCategory::Casual => &self.casual,
        }
    }

    fn validate(&self, language: &'static str) -> Result<(), TemplateError> {
        let lists: [(&'static str, &[String]); 7] = [
            ("greetings", &self.greetings),
            ("thanks", &self.thanks),
            ("help", &self.help),
            ("reactions", &self.reactions),
            ("questions", &self.questions),
            ("casual", &self.casual),
            ("contextual", &self.contextual),
        ];
        for (name, list) in lists {
            if list.is_empty() || list.iter().any(|s| s.trim().is_empty()) {
                return Err(TemplateError::EmptyList {
                    language,
                    list: name,
                });
            }
        }
        Ok(())
    }
}

/// All template pools, one per supported language
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    pools: HashMap<LanguageId, TemplatePool>,
}

impl TemplateLibrary {
    /// Load the embedded pools. Fails fast on any empty or unparseable list.
    pub fn load_embedded() -> Result<Self, TemplateError> {
        let sources: [(LanguageId, &'static str, &'static str); 3] = [
            (
                LanguageId::English,
                "english",
                include_str!("../templates/english.toml"),
            ),
            (
                LanguageId::Malay,
                "ms",
                include_str!("../templates/malay.toml"),
            ),
            (
                LanguageId::Kelantan,
                "kelantan",
                include_str!("../templates/kelantan.toml"),
            ),
        ];

        let mut pools = HashMap::new();
        for (id, name, raw) in sources {
            let pool: TemplatePool = toml::from_str(raw).map_err(|source| TemplateError::Parse {
                language: name,
                source,
            })?;
            pool.validate(name)?;
            pools.insert(id, pool);
        }

        Ok(Self { pools })
    }

    /// Pick a canned response for (language, intent). Total by construction.
    pub fn pick(&self, language: LanguageId, intent: IntentCategory) -> String {
        let pool = self
            .pools
            .get(&language)
            .unwrap_or_else(|| &self.pools[&LanguageId::English]);

        let mut rng = rand::thread_rng();
        let opener = pool
            .list(intent)
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default();

        if intent == IntentCategory::Question {
            let tail = pool.contextual.choose(&mut rng).cloned().unwrap_or_default();
            return format!("{} {}", opener, tail);
        }
        opener
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_pools_load_and_validate() {
        let library = TemplateLibrary::load_embedded().unwrap();
        assert_eq!(library.pools.len(), 3);
    }

    #[test]
    fn test_pick_is_never_empty() {
        let library = TemplateLibrary::load_embedded().unwrap();
        let intents = [
            IntentCategory::Greeting,
            IntentCategory::Thanks,
            IntentCategory::HelpRequest,
            IntentCategory::ReactionNeeded,
            IntentCategory::Question,
            IntentCategory::Casual,
        ];
        for language in [LanguageId::English, LanguageId::Malay, LanguageId::Kelantan] {
            for intent in intents {
                let text = library.pick(language, intent);
                assert!(!text.trim().is_empty(), "{:?}/{:?} gave empty text", language, intent);
            }
        }
    }

    #[test]
    fn test_question_gets_contextual_tail() {
        let library = TemplateLibrary::load_embedded().unwrap();
        let text = library.pick(LanguageId::English, IntentCategory::Question);
        // Opener plus tail is always longer than any single opener
        assert!(text.contains(' '));
        assert!(text.len() > 30);
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let raw = r#"
            greetings = []
            thanks = ["x"]
            help = ["x"]
            reactions = ["x"]
            questions = ["x"]
            casual = ["x"]
            contextual = ["x"]
        "#;
        let pool: TemplatePool = toml::from_str(raw).unwrap();
        assert!(pool.validate("english").is_err());
    }
}
