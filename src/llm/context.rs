//! Accumulated conversation context for LLM prompting.
//!
//! Messages the user adds with `/add` are kept here and embedded into
//! `/prompt` requests. The store is owned by the application and passed
//! into the handlers that need it.

use crate::chat::Message;

/// One remembered message, formatted once at insertion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub date: String,
    pub sender: String,
    pub text: String,
}

/// Caller-owned accumulator of chat messages used as model context.
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    entries: Vec<ContextEntry>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remember `messages`, returning how many were added.
    pub fn add_messages(&mut self, messages: &[Message]) -> usize {
        for msg in messages {
            self.entries.push(ContextEntry {
                date: msg.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                sender: msg.sender.clone(),
                text: msg.text.clone(),
            });
        }
        messages.len()
    }

    /// Forget everything, returning how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    /// Human-readable listing for `/show`.
    pub fn display(&self) -> String {
        if self.entries.is_empty() {
            return "Context is empty".to_string();
        }
        let mut out = String::new();
        out.push_str("Current context:\n");
        out.push_str(&format!("Total messages: {}\n", self.entries.len()));
        out.push_str(&"-".repeat(40));
        out.push('\n');
        for entry in &self.entries {
            out.push_str(&format!("[{}] {}: {}\n", entry.date, entry.sender, entry.text));
        }
        out.push_str(&"-".repeat(40));
        out
    }

    /// The context block embedded into prompts, one line per message.
    pub fn prompt_block(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("[{}] {}: {}", e.date, e.sender, e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
