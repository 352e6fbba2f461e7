/*
    core_history - Per-channel causal message history

    What a node consults and updates to reconstruct causal order,
    detect gaps, and survive restarts. Handles:
    - Data model (content messages, causal-history pointers)
    - Bounded in-memory history with deterministic FIFO eviction
    - Durable textual codec (hex byte fields, decimal Lamport clock)
    - Storage-backed persistence with self-healing corruption recovery

    Transport, sync/retransmission, rate-limit proofs and the concrete
    storage backend all live outside this subsystem.
*/

pub mod codec;
pub mod errors;
pub mod mem_local_history;
pub mod model;
pub mod persistent_history;
pub mod storage;

#[cfg(test)]
pub mod tests;

// Re-export commonly used types
pub use errors::{HistoryError, HistoryResult, StorageError};
pub use mem_local_history::MemLocalHistory;
pub use model::{
    ChannelId, ContentMessage, HistoryEntry, LamportTimestamp, MessageId, SenderId,
};
pub use persistent_history::{
    HistoryConfig, PersistentHistory, DEFAULT_MAX_SIZE, STORAGE_PREFIX,
};
pub use storage::{HistoryStorage, MemoryStorage};
