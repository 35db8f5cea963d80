//! The key-value storage abstraction.
//!
//! The ranking store is storage-backend-agnostic: anything that can read
//! and write string values under string keys can hold the leaderboard.
//! Writes are synchronous; there is no background flushing.

use thiserror::Error;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed to read or write.
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is unavailable (full, locked, or simulated as such).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A minimal synchronous key-value store.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
