//! Kawan provider adapters
//!
//! Each adapter is a thin, uniform wrapper around one LLM backend:
//! - **OpenAI-compatible**: OpenAI, xAI Grok, and local servers via base-URL
//!   override (async-openai)
//! - **Anthropic**: Claude messages API (reqwest)
//! - **Gemini**: Google generative language API (reqwest)
//!
//! Adapters translate the generic [`ProviderPrompt`] into the backend's
//! request shape and map every failure into a typed [`ProviderError`].
//! Nothing panics or throws past the adapter boundary, and adapters never
//! retry - retries and fallback belong to the orchestrator.

pub mod adapter;
pub mod openai;
pub mod anthropic;
pub mod gemini;

pub use adapter::*;
pub use openai::*;
pub use anthropic::*;
pub use gemini::*;
