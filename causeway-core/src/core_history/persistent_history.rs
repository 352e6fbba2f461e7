/*
    persistent_history.rs - Storage-backed channel history

    Wraps MemLocalHistory with load-at-construction and save-on-mutation
    against an injected storage backend, one key per channel. Every
    mutation writes the full post-eviction buffer snapshot, so the
    persisted state always matches what a fresh construction reproduces.

    Degrades transparently:
    - no backend: identical observable behavior to MemLocalHistory
    - corrupt persisted blob: start empty and delete the key, so bad
      state never poisons future reads
    - backend I/O failure: logged, in-memory buffer stays authoritative
*/

use crate::core_history::codec;
use crate::core_history::errors::{HistoryError, HistoryResult};
use crate::core_history::mem_local_history::MemLocalHistory;
use crate::core_history::model::{ChannelId, ContentMessage, MessageId};
use crate::core_history::storage::HistoryStorage;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Namespace prefix for channel history keys
pub const STORAGE_PREFIX: &str = "causeway:history:";

/// Default retained-message cap for a channel
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Configuration for a channel history
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Channel whose history this instance owns. Supplied by the
    /// caller, never inferred from message content.
    pub channel_id: ChannelId,

    /// Maximum number of retained messages
    pub max_size: usize,
}

impl HistoryConfig {
    pub fn new(channel_id: ChannelId) -> Self {
        HistoryConfig {
            channel_id,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

/// Channel history that survives process restarts.
///
/// Single logical writer per channel; no internal locking. Callers
/// needing concurrent access serialize calls externally.
pub struct PersistentHistory {
    channel_id: ChannelId,
    local: MemLocalHistory,
    storage: Option<Arc<dyn HistoryStorage>>,
    storage_key: String,
}

impl PersistentHistory {
    /// Construct a history for a channel, seeding from the backend if
    /// one is supplied and it holds a readable snapshot.
    pub fn new(
        config: HistoryConfig,
        storage: Option<Arc<dyn HistoryStorage>>,
    ) -> HistoryResult<Self> {
        if config.channel_id.as_str().is_empty() {
            return Err(HistoryError::InvalidConfig(
                "channel id must not be empty".to_string(),
            ));
        }

        let storage_key = storage_key(&config.channel_id);
        let mut local = MemLocalHistory::new(config.max_size);

        if let Some(backend) = &storage {
            match backend.get(&storage_key) {
                Ok(Some(blob)) => match codec::decode_messages(&blob) {
                    Ok(messages) => {
                        // Seeding through add_messages keeps only the
                        // newest max_size entries when a persisted
                        // buffer is longer than the current cap.
                        local.add_messages(messages);
                    }
                    Err(e) => {
                        warn!(
                            channel_id = %config.channel_id,
                            "Corrupt persisted history, starting empty: {}", e
                        );
                        if let Err(e) = backend.remove(&storage_key) {
                            error!(
                                channel_id = %config.channel_id,
                                "Failed to clear corrupt history key: {}", e
                            );
                        }
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    error!(
                        channel_id = %config.channel_id,
                        "Failed to load history from storage: {}", e
                    );
                }
            }
        } else {
            info!(
                channel_id = %config.channel_id,
                "No storage backend; messages will not persist across restarts"
            );
        }

        Ok(PersistentHistory {
            channel_id: config.channel_id,
            local,
            storage,
            storage_key,
        })
    }

    /// Append one message, then mirror the buffer to storage
    pub fn push(&mut self, message: ContentMessage) {
        self.add_messages([message]);
    }

    /// Append messages in call order, then mirror the buffer to
    /// storage. Eviction semantics are those of MemLocalHistory.
    pub fn add_messages<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = ContentMessage>,
    {
        self.local.add_messages(messages);
        self.save();
    }

    /// True iff a message with this id is currently retained
    pub fn has_message(&self, message_id: &MessageId) -> bool {
        self.local.has_message(message_id)
    }

    /// Number of retained messages; never touches the backend
    pub fn len(&self) -> usize {
        self.local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    /// Retained messages from `start` to the end, in insertion order;
    /// never touches the backend
    pub fn slice(&self, start: usize) -> Vec<ContentMessage> {
        self.local.slice(start)
    }

    /// Channel this history belongs to
    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Write the full current buffer snapshot under the channel key.
    /// Any failure is logged and the in-memory buffer stays
    /// authoritative; the next mutation re-attempts the snapshot.
    fn save(&self) {
        let Some(backend) = &self.storage else {
            return;
        };

        let blob = match codec::encode_messages(&self.local.slice(0)) {
            Ok(blob) => blob,
            Err(e) => {
                error!(
                    channel_id = %self.channel_id,
                    "Failed to serialize history: {}", e
                );
                return;
            }
        };

        if let Err(e) = backend.set(&self.storage_key, &blob) {
            error!(
                channel_id = %self.channel_id,
                "Failed to save history to storage: {}", e
            );
        }
    }
}

/// Backend key for a channel's history. Distinct channel ids never
/// collide because the id is appended verbatim to a fixed prefix.
fn storage_key(channel_id: &ChannelId) -> String {
    format!("{}{}", STORAGE_PREFIX, channel_id)
}
