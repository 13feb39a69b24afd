use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Key, Value};

use super::iter::StateIterator;

/// Errors surfaced by world-state implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("key must not be empty")]
    EmptyKey,
    #[error("world state unavailable: {0}")]
    Unavailable(String),
    #[error("world state is corrupted: {0}")]
    CorruptedState(String),
}

/// Contract for the externally owned key-value world state.
///
/// Implementations own every byte written through them. Range scans return
/// entries in the store's natural key order; both bundled stores order keys
/// lexicographically by their UTF-8 bytes.
#[async_trait]
pub trait WorldState: Send + Sync {
    /// Returns the value stored at `key`, or `None` when the key was never written.
    async fn get(&self, key: &Key) -> Result<Option<Value>, StorageError>;

    /// Writes `value` at `key`, replacing whatever was there.
    async fn put(&self, key: Key, value: Value) -> Result<(), StorageError>;

    /// Writes `value` only if no non-empty value is stored at `key`.
    ///
    /// Returns `false` without writing when the key is already taken. The
    /// check and the write happen under one critical section.
    async fn put_if_absent(&self, key: Key, value: Value) -> Result<bool, StorageError>;

    /// Opens a scan over `[start, end)`. An empty bound leaves that side open,
    /// so `scan_range("", "")` covers the whole keyspace.
    async fn scan_range(&self, start: &str, end: &str) -> Result<StateIterator, StorageError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::EmptyKey);
    }
    Ok(())
}
