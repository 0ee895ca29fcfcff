//! Conversation memory
//!
//! In-process keyed store of recent dialogue turns. Constructed once at
//! startup and injected into the orchestrator. Growth is bounded two ways:
//! sessions idle past the TTL are evicted, and when the session count
//! exceeds the cap the least-recently-active sessions are dropped first.
//!
//! DashMap's entry API locks one key at a time, which gives the
//! single-writer-per-key discipline the orchestrator relies on.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use kawan_core::{DialogueTurn, SessionKey};

/// Default cap on concurrently tracked sessions
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Default idle TTL before a session is evicted
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Turns kept per session
const MAX_TURNS_PER_SESSION: usize = 50;

/// One session's turn buffer
#[derive(Debug, Clone)]
pub struct ConversationSession {
    turns: VecDeque<DialogueTurn>,
    last_active: DateTime<Utc>,
}

impl ConversationSession {
    fn new() -> Self {
        Self {
            turns: VecDeque::new(),
            last_active: Utc::now(),
        }
    }

    fn push(&mut self, turn: DialogueTurn) {
        if self.turns.len() == MAX_TURNS_PER_SESSION {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
        self.last_active = Utc::now();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Bounded, keyed store of recent conversation turns
#[derive(Debug)]
pub struct ConversationMemory {
    sessions: DashMap<SessionKey, ConversationSession>,
    max_sessions: usize,
    session_ttl: Duration,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL)
    }

    pub fn with_limits(max_sessions: usize, session_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: max_sessions.max(1),
            session_ttl,
        }
    }

    /// Append one turn to a session, creating it lazily
    pub fn append(&self, key: &SessionKey, turn: DialogueTurn) {
        self.sessions
            .entry(key.clone())
            .or_insert_with(ConversationSession::new)
            .push(turn);
        self.evict_if_needed();
    }

    /// Append a user/assistant turn pair in order
    pub fn append_exchange(&self, key: &SessionKey, user_text: &str, assistant_text: &str) {
        {
            let mut session = self
                .sessions
                .entry(key.clone())
                .or_insert_with(ConversationSession::new);
            session.push(DialogueTurn::user(user_text));
            session.push(DialogueTurn::assistant(assistant_text));
        }
        self.evict_if_needed();
    }

    /// The last `n` turns for a key, most-recent-last.
    /// Unknown keys yield an empty history.
    pub fn recent(&self, key: &SessionKey, n: usize) -> Vec<DialogueTurn> {
        match self.sessions.get(key) {
            Some(session) => {
                let skip = session.turns.len().saturating_sub(n);
                session.turns.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Number of tracked sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop idle sessions, then oldest-first until under the cap
    fn evict_if_needed(&self) {
        let ttl = chrono::Duration::from_std(self.session_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(1));
        let cutoff = Utc::now() - ttl;

        self.sessions.retain(|_, s| s.last_active >= cutoff);

        let overflow = self.sessions.len().saturating_sub(self.max_sessions);
        if overflow == 0 {
            return;
        }

        let mut by_age: Vec<(SessionKey, DateTime<Utc>)> = self
            .sessions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().last_active))
            .collect();
        by_age.sort_by_key(|(_, last_active)| *last_active);

        for (key, _) in by_age.into_iter().take(overflow) {
            self.sessions.remove(&key);
        }
        debug!("evicted {} sessions over cap", overflow);
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kawan_core::{LanguageId, Speaker};

    fn key(id: &str) -> SessionKey {
        SessionKey::new(LanguageId::English, id)
    }

    #[test]
    fn test_recent_returns_turns_in_order() {
        let memory = ConversationMemory::new();
        let k = key("s1");

        for i in 0..5 {
            memory.append(&k, DialogueTurn::user(format!("turn {}", i)));
        }

        let recent = memory.recent(&k, 5);
        assert_eq!(recent.len(), 5);
        for (i, turn) in recent.iter().enumerate() {
            assert_eq!(turn.text, format!("turn {}", i));
        }
    }

    #[test]
    fn test_recent_caps_at_n() {
        let memory = ConversationMemory::new();
        let k = key("s1");

        for i in 0..10 {
            memory.append(&k, DialogueTurn::user(format!("turn {}", i)));
        }

        let recent = memory.recent(&k, 3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].text, "turn 7");
        assert_eq!(recent[2].text, "turn 9");
    }

    #[test]
    fn test_unknown_key_is_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.recent(&key("missing"), 10).is_empty());
    }

    #[test]
    fn test_exchange_preserves_speaker_order() {
        let memory = ConversationMemory::new();
        let k = key("s1");

        memory.append_exchange(&k, "hello", "hi there!");

        let recent = memory.recent(&k, 2);
        assert_eq!(recent[0].speaker, Speaker::User);
        assert_eq!(recent[1].speaker, Speaker::Assistant);
    }

    #[test]
    fn test_lru_eviction_over_cap() {
        let memory = ConversationMemory::with_limits(2, Duration::from_secs(3600));

        memory.append(&key("a"), DialogueTurn::user("1"));
        memory.append(&key("b"), DialogueTurn::user("2"));
        memory.append(&key("c"), DialogueTurn::user("3"));

        assert_eq!(memory.session_count(), 2);
        // Oldest session went first
        assert!(memory.recent(&key("a"), 1).is_empty());
        assert!(!memory.recent(&key("c"), 1).is_empty());
    }

    #[test]
    fn test_ttl_eviction() {
        let memory = ConversationMemory::with_limits(10, Duration::from_secs(0));

        memory.append(&key("a"), DialogueTurn::user("1"));
        // Zero TTL: the next write sweeps everything idle
        std::thread::sleep(Duration::from_millis(5));
        memory.append(&key("b"), DialogueTurn::user("2"));

        assert!(memory.recent(&key("a"), 1).is_empty());
    }

    #[test]
    fn test_per_session_turn_cap() {
        let memory = ConversationMemory::new();
        let k = key("s1");

        for i in 0..(MAX_TURNS_PER_SESSION + 10) {
            memory.append(&k, DialogueTurn::user(format!("turn {}", i)));
        }

        let all = memory.recent(&k, usize::MAX);
        assert_eq!(all.len(), MAX_TURNS_PER_SESSION);
        assert_eq!(all[0].text, "turn 10");
    }
}
