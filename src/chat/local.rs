//! Scripted in-memory chat backend.
//!
//! Stands in for a real messaging service: it serves ascending-id pages the
//! same way a network backend would, which is all the UI layer is allowed
//! to depend on. The binary uses it to seed demo conversations and the
//! tests use it as the store double.

use std::sync::Mutex;

use anyhow::{bail, Result};
use chrono::{Duration, Local};

use super::{ChatStore, DialogEntry, DialogId, Message, MessageId};

struct Dialog {
    entry: DialogEntry,
    /// Ascending by id.
    messages: Vec<Message>,
    next_id: MessageId,
}

/// In-memory [`ChatStore`] with a fixed set of dialogs.
pub struct LocalChatStore {
    dialogs: Mutex<Vec<Dialog>>,
}

impl LocalChatStore {
    pub fn new() -> Self {
        Self { dialogs: Mutex::new(Vec::new()) }
    }

    /// A store pre-filled with a few conversations of varying length, long
    /// enough to exercise load-older paging.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        store.add_dialog("family group", 3, &["mom", "dad", "sis"], 140);
        store.add_dialog("project alpha", 0, &["lena", "marco", "you"], 52);
        store.add_dialog("bookclub", 12, &["priya", "tom"], 7);
        store
    }

    /// Add a dialog with `count` generated messages.
    pub fn add_dialog(&self, name: &str, unread: u32, senders: &[&str], count: usize) {
        let mut dialogs = lock(&self.dialogs);
        let id = dialogs.len() as DialogId + 1;
        let base = Local::now() - Duration::minutes(count as i64 * 3);
        let messages: Vec<Message> = (0..count)
            .map(|i| Message {
                id: i as MessageId + 1,
                date: base + Duration::minutes(i as i64 * 3),
                sender: senders[i % senders.len()].to_string(),
                text: format!("{} line {} in {}", senders[i % senders.len()], i + 1, name),
            })
            .collect();
        let next_id = messages.last().map(|m| m.id + 1).unwrap_or(1);
        dialogs.push(Dialog {
            entry: DialogEntry { id, name: name.to_string(), unread_count: unread },
            messages,
            next_id,
        });
    }
}

impl Default for LocalChatStore {
    fn default() -> Self {
        Self::with_demo_data()
    }
}

fn lock(dialogs: &Mutex<Vec<Dialog>>) -> std::sync::MutexGuard<'_, Vec<Dialog>> {
    dialogs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ChatStore for LocalChatStore {
    async fn fetch_dialogs(&self) -> Result<Vec<DialogEntry>> {
        Ok(lock(&self.dialogs).iter().map(|d| d.entry.clone()).collect())
    }

    async fn fetch_recent(&self, dialog: DialogId, limit: usize) -> Result<Vec<Message>> {
        let dialogs = lock(&self.dialogs);
        let Some(d) = dialogs.iter().find(|d| d.entry.id == dialog) else {
            bail!("unknown dialog id {dialog}");
        };
        let start = d.messages.len().saturating_sub(limit);
        Ok(d.messages[start..].to_vec())
    }

    async fn fetch_before(
        &self,
        dialog: DialogId,
        max_id_exclusive: MessageId,
        limit: usize,
    ) -> Result<Vec<Message>> {
        let dialogs = lock(&self.dialogs);
        let Some(d) = dialogs.iter().find(|d| d.entry.id == dialog) else {
            bail!("unknown dialog id {dialog}");
        };
        let older: Vec<Message> = d
            .messages
            .iter()
            .filter(|m| m.id < max_id_exclusive)
            .cloned()
            .collect();
        let start = older.len().saturating_sub(limit);
        Ok(older[start..].to_vec())
    }

    async fn send_message(&self, dialog: DialogId, text: &str) -> Result<()> {
        let mut dialogs = lock(&self.dialogs);
        let Some(d) = dialogs.iter_mut().find(|d| d.entry.id == dialog) else {
            bail!("unknown dialog id {dialog}");
        };
        let id = d.next_id;
        d.next_id += 1;
        d.messages.push(Message {
            id,
            date: Local::now(),
            sender: "you".to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}
