//! Kawan Core - domain model for the personality-driven dialogue engine
//!
//! This crate provides the foundational primitives:
//! - Closed persona set with trait vectors and prompt styles
//! - Language profiles with dialect-marker detection
//! - Rule-based intent, mood, and topic classification
//! - The request/response wire contract
//! - Dialogue turns and session keys for conversation memory

pub mod persona;
pub mod language;
pub mod intent;
pub mod envelope;
pub mod session;

pub use persona::*;
pub use language::*;
pub use intent::*;
pub use envelope::*;
pub use session::*;

/// Baseline speech rate emitted for the voice synthesis layer
pub const BASE_SPEECH_RATE: f32 = 0.9;

/// Maximum recent turns fed back into prompt construction
pub const DEFAULT_CONTEXT_TURNS: usize = 6;
