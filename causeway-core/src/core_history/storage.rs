/*
    storage.rs - Storage backend capability interface

    The history core persists through this minimal surface and never
    depends on a concrete backend type. Any key-value store that can
    get/set/remove string values qualifies: an in-memory map, a file,
    browser storage behind FFI, a remote KV.

    An absent key (Ok(None)) and a present empty value are distinct
    signals: "never persisted" vs "persisted empty list".
*/

use crate::core_history::errors::StorageError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Minimal synchronous key-value surface consumed by PersistentHistory
pub trait HistoryStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any prior value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Lock-poison message shared by the MemoryStorage accessors
fn poison_message<T>(_err: PoisonError<T>) -> String {
    "Lock poisoned: a thread panicked while holding the lock".to_string()
}

/// In-process reference backend.
///
/// Backs tests and single-process deployments; state does not survive
/// the process. Interior mutability so one backend can be shared by
/// several channel histories.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl HistoryStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .read()
            .map_err(|e| StorageError::ReadFailed(poison_message(e)))?
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .map_err(|e| StorageError::WriteFailed(poison_message(e)))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .map_err(|e| StorageError::RemoveFailed(poison_message(e)))?
            .remove(key);
        Ok(())
    }
}
