use std::path::Path;

use crate::config::{StorageBackend, StorageConfig};
use crate::storage::{
    InMemoryWorldState, OnDiskWorldState, StateIterator, StorageError, WorldState,
};
use crate::types::{Key, Value};

/// Runtime-selectable world state so binaries can switch between memory and disk.
pub enum StorageAdapter {
    Memory(InMemoryWorldState),
    Disk(OnDiskWorldState),
}

impl StorageAdapter {
    pub fn memory() -> Self {
        Self::Memory(InMemoryWorldState::new())
    }

    pub fn disk(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::Disk(OnDiskWorldState::open(path)?))
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        match (&config.backend, &config.path) {
            (StorageBackend::Memory, _) => Ok(Self::memory()),
            (StorageBackend::Disk, Some(path)) => Self::disk(path),
            (StorageBackend::Disk, None) => Err(StorageError::Unavailable(
                "disk backend requires a path".to_string(),
            )),
        }
    }

    pub fn open_scans(&self) -> usize {
        match self {
            StorageAdapter::Memory(inner) => inner.open_scans(),
            StorageAdapter::Disk(inner) => inner.open_scans(),
        }
    }
}

#[async_trait::async_trait]
impl WorldState for StorageAdapter {
    async fn get(&self, key: &Key) -> Result<Option<Value>, StorageError> {
        match self {
            StorageAdapter::Memory(inner) => inner.get(key).await,
            StorageAdapter::Disk(inner) => inner.get(key).await,
        }
    }

    async fn put(&self, key: Key, value: Value) -> Result<(), StorageError> {
        match self {
            StorageAdapter::Memory(inner) => inner.put(key, value).await,
            StorageAdapter::Disk(inner) => inner.put(key, value).await,
        }
    }

    async fn put_if_absent(&self, key: Key, value: Value) -> Result<bool, StorageError> {
        match self {
            StorageAdapter::Memory(inner) => inner.put_if_absent(key, value).await,
            StorageAdapter::Disk(inner) => inner.put_if_absent(key, value).await,
        }
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<StateIterator, StorageError> {
        match self {
            StorageAdapter::Memory(inner) => inner.scan_range(start, end).await,
            StorageAdapter::Disk(inner) => inner.scan_range(start, end).await,
        }
    }
}
