//! chatscope - browse chat conversations in the terminal and ask a locally
//! hosted language model about them.
//!
//! The library is organized around a few pieces:
//! - A dialog navigator and a scrollable message pager (`ui`), both built
//!   as pure state machines with separate renderers
//! - A growing, id-ordered message list model with load-older paging
//!   (`chat`)
//! - A streaming client for a local Ollama endpoint plus a caller-owned
//!   prompting context (`llm`)
//! - The outer command loop tying them together (`app`)
//!
//! The full-screen components never perform network I/O: they return a
//! control signal (`Quit`, `LoadOlder`, `Command(..)`, `Selected(..)`)
//! and the caller fetches data with the terminal released, then re-enters
//! with the scroll position preserved.

pub mod app;
pub mod chat;
pub mod commands;
pub mod llm;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::App;
pub use chat::{ChatStore, DialogEntry, LocalChatStore, Message, MessageList};
pub use llm::{ContextStore, LlmConfig, OllamaClient};
pub use ui::{NavSignal, PagerSignal};
