use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::types::{Key, Value};

use super::engine::{StorageError, WorldState, validate_key};
use super::iter::{ScanTracker, StateIterator, collect_range};

/// In-memory implementation of the `WorldState` trait backed by an ordered map.
#[derive(Debug, Default)]
pub struct InMemoryWorldState {
    entries: RwLock<BTreeMap<Key, Value>>,
    scans: ScanTracker,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of range scans opened against this store that are still held.
    pub fn open_scans(&self) -> usize {
        self.scans.open_scans()
    }
}

#[async_trait::async_trait]
impl WorldState for InMemoryWorldState {
    async fn get(&self, key: &Key) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: Key, value: Value) -> Result<(), StorageError> {
        validate_key(&key)?;
        let mut entries = self.entries.write().await;
        entries.insert(key, value);
        Ok(())
    }

    async fn put_if_absent(&self, key: Key, value: Value) -> Result<bool, StorageError> {
        validate_key(&key)?;
        let mut entries = self.entries.write().await;
        if entries.get(&key).is_some_and(|existing| !existing.is_empty()) {
            return Ok(false);
        }
        entries.insert(key, value);
        Ok(true)
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<StateIterator, StorageError> {
        let entries = self.entries.read().await;
        Ok(StateIterator::open(
            collect_range(&entries, start, end),
            &self.scans,
        ))
    }
}
