/*
    message.rs - Content message model with causal metadata

    Represents a single application message in a channel, together with
    the causal metadata the sync layer attaches to it.

    Causal model:
    - message_id: unique within the channel (dedup key)
    - causal_history: pointers to the messages this one depends on
    - lamport_timestamp: sender's logical clock at send time
    - bloom_filter: opaque summary of recently seen ids (gap-detection
      hint, carried byte-for-byte, never interpreted here)
    - retrieval_hint: opaque locator for out-of-band re-fetch
*/

use super::types::{ChannelId, LamportTimestamp, MessageId, SenderId};
use serde::{Deserialize, Serialize};

/// Causal dependency pointer: "this message depends on `message_id`,
/// optionally retrievable via `retrieval_hint`".
///
/// An entry never points at its own message; cycle prevention is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Id of the message depended upon
    pub message_id: MessageId,

    /// Opaque bytes letting a collaborator fetch the message
    /// out-of-band if it is missing locally
    pub retrieval_hint: Option<Vec<u8>>,
}

impl HistoryEntry {
    pub fn new(message_id: MessageId) -> Self {
        HistoryEntry {
            message_id,
            retrieval_hint: None,
        }
    }

    pub fn with_retrieval_hint(message_id: MessageId, retrieval_hint: Vec<u8>) -> Self {
        HistoryEntry {
            message_id,
            retrieval_hint: Some(retrieval_hint),
        }
    }
}

/// Message in a channel
///
/// Immutable once constructed; the history buffer owns its copy and
/// eviction destroys it without invalidating the id for consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMessage {
    /// Unique message id within the channel
    pub message_id: MessageId,

    /// Channel this message belongs to
    pub channel_id: ChannelId,

    /// Node that sent this message
    pub sender_id: SenderId,

    /// Ordered causal dependencies (possibly empty)
    pub causal_history: Vec<HistoryEntry>,

    /// Sender's logical clock at send time. Stored, never enforced:
    /// the buffer keeps arrival order, not clock order.
    pub lamport_timestamp: LamportTimestamp,

    /// Opaque bloom filter over recently seen message ids, if the
    /// sender attached one
    pub bloom_filter: Option<Vec<u8>>,

    /// Opaque application payload
    pub content: Vec<u8>,

    /// Opaque locator for re-fetching this message out-of-band
    pub retrieval_hint: Option<Vec<u8>>,
}

impl ContentMessage {
    /// Create a new message with no optional fields set
    pub fn new(
        message_id: MessageId,
        channel_id: ChannelId,
        sender_id: SenderId,
        causal_history: Vec<HistoryEntry>,
        lamport_timestamp: LamportTimestamp,
        content: Vec<u8>,
    ) -> Self {
        ContentMessage {
            message_id,
            channel_id,
            sender_id,
            causal_history,
            lamport_timestamp,
            bloom_filter: None,
            content,
            retrieval_hint: None,
        }
    }

    /// Attach a bloom filter blob
    pub fn with_bloom_filter(mut self, bloom_filter: Vec<u8>) -> Self {
        self.bloom_filter = Some(bloom_filter);
        self
    }

    /// Attach a retrieval hint
    pub fn with_retrieval_hint(mut self, retrieval_hint: Vec<u8>) -> Self {
        self.retrieval_hint = Some(retrieval_hint);
        self
    }

    /// The causal-history entry a later message would use to point at
    /// this one (id plus retrieval hint, if any)
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            message_id: self.message_id.clone(),
            retrieval_hint: self.retrieval_hint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str) -> ContentMessage {
        ContentMessage::new(
            MessageId::new(id),
            ChannelId::new("c"),
            SenderId::new("a"),
            vec![],
            1,
            vec![1],
        )
    }

    #[test]
    fn test_message_creation() {
        let msg = message("m1");
        assert_eq!(msg.message_id, MessageId::new("m1"));
        assert_eq!(msg.channel_id, ChannelId::new("c"));
        assert_eq!(msg.sender_id, SenderId::new("a"));
        assert!(msg.causal_history.is_empty());
        assert_eq!(msg.lamport_timestamp, 1);
        assert!(msg.bloom_filter.is_none());
        assert!(msg.retrieval_hint.is_none());
    }

    #[test]
    fn test_message_builders() {
        let msg = message("m1")
            .with_bloom_filter(vec![0xaa])
            .with_retrieval_hint(vec![0xbb, 0xcc]);
        assert_eq!(msg.bloom_filter, Some(vec![0xaa]));
        assert_eq!(msg.retrieval_hint, Some(vec![0xbb, 0xcc]));
    }

    #[test]
    fn test_history_entry_from_message() {
        let msg = message("m1").with_retrieval_hint(vec![7]);
        let entry = msg.history_entry();
        assert_eq!(entry.message_id, MessageId::new("m1"));
        assert_eq!(entry.retrieval_hint, Some(vec![7]));
    }

    #[test]
    fn test_history_entry_without_hint() {
        let entry = HistoryEntry::new(MessageId::new("dep"));
        assert!(entry.retrieval_hint.is_none());

        let entry = HistoryEntry::with_retrieval_hint(MessageId::new("dep"), vec![1, 2]);
        assert_eq!(entry.retrieval_hint, Some(vec![1, 2]));
    }

    #[test]
    fn test_causal_history_order_preserved() {
        let deps = vec![
            HistoryEntry::new(MessageId::new("d1")),
            HistoryEntry::new(MessageId::new("d2")),
            HistoryEntry::new(MessageId::new("d3")),
        ];
        let msg = ContentMessage::new(
            MessageId::new("m1"),
            ChannelId::new("c"),
            SenderId::new("a"),
            deps.clone(),
            9,
            vec![],
        );
        assert_eq!(msg.causal_history, deps);
    }
}
