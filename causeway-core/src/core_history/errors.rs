/*
    errors.rs - Error types for the history subsystem

    Defines all error types that can occur in:
    - History construction (caller misuse)
    - Codec encode/decode
    - Storage backend I/O
*/

use thiserror::Error;

/// Errors that can occur in the history subsystem
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Conflicting or invalid configuration supplied at construction.
    /// Programmer error, surfaced fast rather than recovered.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The persisted blob could not be decoded at all
    #[error("Corrupted data: {0}")]
    CorruptedData(String),

    /// Storage backend I/O error
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors raised by a storage backend implementation
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend read failed
    #[error("Storage read failed: {0}")]
    ReadFailed(String),

    /// Backend write failed
    #[error("Storage write failed: {0}")]
    WriteFailed(String),

    /// Backend delete failed
    #[error("Storage remove failed: {0}")]
    RemoveFailed(String),
}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        HistoryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_error_display() {
        let err = HistoryError::InvalidConfig("empty channel id".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: empty channel id");
    }

    #[test]
    fn test_storage_error_conversion() {
        let storage_err = StorageError::WriteFailed("disk full".to_string());
        let err: HistoryError = storage_err.into();
        assert!(matches!(err, HistoryError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_corrupted_data_display() {
        let err = HistoryError::CorruptedData("not json".to_string());
        assert!(err.to_string().contains("Corrupted data"));
    }
}
