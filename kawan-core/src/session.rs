//! Dialogue turns and session keys
//!
//! A session is identified by `(language, session_id)`. Turns are owned by
//! their session and only ever appended by the orchestrator after a
//! response text is finalized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::LanguageId;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One utterance in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl DialogueTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Key for the conversation memory map
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub language: LanguageId,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(language: LanguageId, session_id: impl Into<String>) -> Self {
        Self {
            language,
            session_id: session_id.into(),
        }
    }
}
