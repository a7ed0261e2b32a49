//! Chat-service types and the backend contract.
//!
//! This module defines the message and dialog records the UI works with,
//! the [`MessageList`] model the pager scrolls over, and the [`ChatStore`]
//! trait that abstracts the messaging backend. Everything behind the trait
//! (authentication, sessions, the actual wire protocol) is the backend's
//! concern; the rest of the program only sees ordered batches of messages.

pub mod local;
pub mod model;

use anyhow::Result;
use chrono::{DateTime, Local};

pub use local::LocalChatStore;
pub use model::MessageList;

/// Identifier assigned by the backend, strictly ordered by arrival.
pub type MessageId = i64;

/// Identifier for a dialog (chat/channel/user conversation).
pub type DialogId = i64;

/// A single chat message. Immutable once constructed; the sender name is
/// resolved by the backend and never re-resolved here.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub date: DateTime<Local>,
    pub sender: String,
    pub text: String,
}

impl Message {
    /// One-line rendering used by the pager and transcripts.
    pub fn display_line(&self) -> String {
        format!("[{}] {}: {}", self.date.format("%H:%M:%S"), self.sender, self.text)
    }

    /// Full-timestamp rendering used for `/read` output and LLM transcripts.
    pub fn transcript_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.date.format("%Y-%m-%d %H:%M:%S"),
            self.sender,
            self.text
        )
    }
}

/// A selectable entry in the dialog list. Read-only for the duration of one
/// navigation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogEntry {
    pub id: DialogId,
    pub name: String,
    pub unread_count: u32,
}

/// The messaging backend, seen only at its interface boundary.
///
/// Batch contract: every returned sequence is ascending by message id, and
/// only messages with non-empty text are included. `fetch_before` returns
/// messages strictly older than `max_id_exclusive`; an empty result means
/// there is no more history.
pub trait ChatStore {
    /// List all dialogs available to the account.
    fn fetch_dialogs(&self) -> impl Future<Output = Result<Vec<DialogEntry>>> + Send;

    /// The newest `limit` messages of a dialog, ascending by id.
    fn fetch_recent(
        &self,
        dialog: DialogId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Message>>> + Send;

    /// Up to `limit` messages strictly older than `max_id_exclusive`,
    /// ascending by id. Empty result = no more history.
    fn fetch_before(
        &self,
        dialog: DialogId,
        max_id_exclusive: MessageId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Message>>> + Send;

    /// Send a message to a dialog.
    fn send_message(
        &self,
        dialog: DialogId,
        text: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}
