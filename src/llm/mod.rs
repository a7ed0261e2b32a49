//! Local language-model integration.
//!
//! Talks to a locally hosted Ollama endpoint for summaries and
//! context-grounded question answering. The context the model sees is an
//! explicit, caller-owned accumulator, not process-wide state.

pub mod client;
pub mod context;
pub mod prompt;

pub use client::{LlmConfig, OllamaClient};
pub use context::ContextStore;
