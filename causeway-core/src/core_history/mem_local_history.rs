/*
    mem_local_history.rs - Bounded in-memory channel history

    Insertion-ordered buffer of the most recent messages in a channel,
    capped at a configured maximum size. This is the working set used
    for causal reconstruction and deduplication.

    Eviction is strict FIFO by insertion time and runs after every
    individual append, so pushing a batch that exceeds the cap yields
    the same final state as pushing the same messages one at a time.
*/

use crate::core_history::model::{ContentMessage, MessageId};
use std::collections::{HashMap, VecDeque};

/// Bounded, insertion-ordered history of a single channel.
///
/// Pure bounded buffer: never raises, never deduplicates. Duplicate
/// suppression, if wanted, is layered by the caller via
/// [`has_message`](MemLocalHistory::has_message) before adding.
#[derive(Debug, Clone)]
pub struct MemLocalHistory {
    max_size: usize,
    messages: VecDeque<ContentMessage>,

    /// Retained-id refcounts for O(1) membership tests. Counts, not a
    /// set: duplicates are allowed, and evicting one copy must not
    /// hide a still-retained duplicate.
    retained_ids: HashMap<MessageId, usize>,
}

impl MemLocalHistory {
    /// Create a history retaining at most `max_size` messages.
    /// A cap of 0 retains nothing.
    pub fn new(max_size: usize) -> Self {
        MemLocalHistory {
            max_size,
            messages: VecDeque::new(),
            retained_ids: HashMap::new(),
        }
    }

    /// Append messages in call order, evicting the oldest retained
    /// entries whenever the buffer exceeds the cap.
    pub fn add_messages<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = ContentMessage>,
    {
        for message in messages {
            *self
                .retained_ids
                .entry(message.message_id.clone())
                .or_insert(0) += 1;
            self.messages.push_back(message);

            while self.messages.len() > self.max_size {
                self.evict_oldest();
            }
        }
    }

    /// True iff a message with this id is currently retained
    pub fn has_message(&self, message_id: &MessageId) -> bool {
        self.retained_ids.contains_key(message_id)
    }

    /// Number of retained messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Configured capacity
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Retained messages from `start` to the end, in insertion order.
    /// Indices are relative to the current buffer: after eviction,
    /// index 0 is the oldest retained message. Out-of-range `start`
    /// yields an empty vec.
    pub fn slice(&self, start: usize) -> Vec<ContentMessage> {
        self.messages.iter().skip(start).cloned().collect()
    }

    /// Iterate retained messages oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &ContentMessage> {
        self.messages.iter()
    }

    fn evict_oldest(&mut self) {
        if let Some(evicted) = self.messages.pop_front() {
            if let Some(count) = self.retained_ids.get_mut(&evicted.message_id) {
                *count -= 1;
                if *count == 0 {
                    self.retained_ids.remove(&evicted.message_id);
                }
            }
        }
    }
}
