//! The growing message list the pager scrolls over.
//!
//! Messages are kept ascending by id. New history arrives in two shapes:
//! the initial batch (appended at construction time) and older pages
//! prepended when the user scrolls past the oldest loaded message. Batches
//! that would break the ordering invariant are rejected rather than
//! silently corrupting the sort order.

use anyhow::{bail, Result};

use super::{Message, MessageId};

/// Ordered sequence of messages, ascending by id, no duplicates.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from an initial batch (must already be ascending).
    pub fn from_batch(batch: Vec<Message>) -> Result<Self> {
        let mut list = Self::new();
        list.append_batch(batch)?;
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Minimum id currently held, or `None` if empty. This is the
    /// `max_id_exclusive` cursor for the next `fetch_before` call.
    pub fn oldest_id(&self) -> Option<MessageId> {
        self.messages.first().map(|m| m.id)
    }

    pub fn newest_id(&self) -> Option<MessageId> {
        self.messages.last().map(|m| m.id)
    }

    /// Messages in ascending-id order.
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Append a newer batch. The batch must be ascending and every id must
    /// be strictly greater than the current maximum.
    pub fn append_batch(&mut self, batch: Vec<Message>) -> Result<()> {
        ensure_ascending(&batch)?;
        if let (Some(newest), Some(first)) = (self.newest_id(), batch.first()) {
            if first.id <= newest {
                bail!(
                    "append batch out of order: id {} not greater than current newest {}",
                    first.id,
                    newest
                );
            }
        }
        self.messages.extend(batch);
        Ok(())
    }

    /// Prepend an older batch, returning how many messages were added.
    ///
    /// The batch must be ascending and every id strictly less than the
    /// current minimum. An empty batch is reported as `Ok(0)` so the caller
    /// can treat "no more history" as a non-event.
    pub fn prepend_batch(&mut self, batch: Vec<Message>) -> Result<usize> {
        if batch.is_empty() {
            return Ok(0);
        }
        ensure_ascending(&batch)?;
        if let (Some(oldest), Some(last)) = (self.oldest_id(), batch.last()) {
            if last.id >= oldest {
                bail!(
                    "prepend batch out of order: id {} not less than current oldest {}",
                    last.id,
                    oldest
                );
            }
        }
        let added = batch.len();
        let mut merged = batch;
        merged.append(&mut self.messages);
        self.messages = merged;
        Ok(added)
    }
}

fn ensure_ascending(batch: &[Message]) -> Result<()> {
    for pair in batch.windows(2) {
        if pair[1].id <= pair[0].id {
            bail!(
                "batch not strictly ascending: id {} followed by {}",
                pair[0].id,
                pair[1].id
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn msg(id: MessageId) -> Message {
        Message {
            id,
            date: chrono::Local.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
            sender: format!("user{}", id % 3),
            text: format!("message {}", id),
        }
    }

    fn msgs(ids: std::ops::RangeInclusive<MessageId>) -> Vec<Message> {
        ids.map(msg).collect()
    }

    #[test]
    fn test_append_then_oldest_and_len() {
        let list = MessageList::from_batch(msgs(16..=25)).unwrap();
        assert_eq!(list.len(), 10);
        assert_eq!(list.oldest_id(), Some(16));
        assert_eq!(list.newest_id(), Some(25));
    }

    #[test]
    fn test_empty_list() {
        let list = MessageList::new();
        assert_eq!(list.len(), 0);
        assert_eq!(list.oldest_id(), None);
    }

    #[test]
    fn test_prepend_updates_oldest_and_len() {
        let mut list = MessageList::from_batch(msgs(11..=20)).unwrap();
        let added = list.prepend_batch(msgs(1..=10)).unwrap();
        assert_eq!(added, 10);
        assert_eq!(list.len(), 20);
        assert_eq!(list.oldest_id(), Some(1));
        // Order is ascending end-to-end after the merge.
        let ids: Vec<_> = list.as_slice().iter().map(|m| m.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_prepend_empty_batch_is_a_noop() {
        let mut list = MessageList::from_batch(msgs(5..=9)).unwrap();
        assert_eq!(list.prepend_batch(vec![]).unwrap(), 0);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_rejects_unsorted_batch() {
        let mut list = MessageList::new();
        let batch = vec![msg(3), msg(2)];
        assert!(list.append_batch(batch).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_rejects_overlapping_prepend() {
        let mut list = MessageList::from_batch(msgs(10..=12)).unwrap();
        // id 10 is already held, the batch is not strictly older.
        assert!(list.prepend_batch(msgs(8..=10)).is_err());
        assert_eq!(list.len(), 3);
        assert_eq!(list.oldest_id(), Some(10));
    }

    #[test]
    fn test_rejects_stale_append() {
        let mut list = MessageList::from_batch(msgs(10..=12)).unwrap();
        assert!(list.append_batch(msgs(12..=14)).is_err());
        assert_eq!(list.newest_id(), Some(12));
    }
}
