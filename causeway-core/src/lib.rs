/*
    causeway-core - Per-channel causal message history

    The history subsystem of the Causeway peer-to-peer pub/sub
    protocol: causal message model, bounded in-memory buffer, durable
    codec, and storage-backed persistence with self-healing recovery.
*/

pub mod core_history;
pub mod logging;

pub use core_history::{
    ChannelId, ContentMessage, HistoryConfig, HistoryEntry, HistoryError, HistoryResult,
    HistoryStorage, LamportTimestamp, MemLocalHistory, MemoryStorage, MessageId,
    PersistentHistory, SenderId, StorageError,
};
pub use logging::{init_logging, LogLevel};
