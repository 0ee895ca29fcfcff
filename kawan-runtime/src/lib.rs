//! Kawan runtime
//!
//! The pipeline that turns a chat request into a response envelope:
//! - **ConversationMemory**: bounded per-session turn buffer (LRU + idle TTL)
//! - **PromptBuilder**: deterministic persona/language/intent prompt assembly
//! - **TemplateLibrary**: always-available canned response tier
//! - **Orchestrator**: provider cascade or fan-out race with template fallback
//! - **synthesize**: final envelope assembly with voice parameters

pub mod memory;
pub mod templates;
pub mod prompt;
pub mod orchestrator;
pub mod synthesizer;

pub use memory::*;
pub use templates::*;
pub use prompt::*;
pub use orchestrator::*;
pub use synthesizer::*;
