use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use agriledger::StorageConfig;
use agriledger::storage::{
    InMemoryWorldState, StateIterator, StorageAdapter, StorageError, WorldState,
};
use agriledger::{Key, Value};
use tempfile::TempDir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Disk,
}

pub fn all_backends() -> [BackendKind; 2] {
    [BackendKind::Memory, BackendKind::Disk]
}

/// Holds storage state and keeps tempdirs alive for disk-backed runs.
#[allow(dead_code)]
pub struct TestStorage {
    backend: BackendKind,
    storage_path: Option<PathBuf>,
    _guard: Option<TempDir>,
}

#[allow(dead_code)]
impl TestStorage {
    pub fn new(backend: BackendKind) -> Self {
        match backend {
            BackendKind::Memory => Self {
                backend,
                storage_path: None,
                _guard: None,
            },
            BackendKind::Disk => {
                let dir = TempDir::new().expect("create temp dir for disk storage");
                let storage_path = dir.path().join("world_state");
                Self {
                    backend,
                    storage_path: Some(storage_path),
                    _guard: Some(dir),
                }
            }
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    pub fn storage(&self) -> Arc<StorageAdapter> {
        Arc::new(StorageAdapter::from_config(&self.storage_config()).expect("open storage"))
    }

    pub fn storage_config(&self) -> StorageConfig {
        match self.backend {
            BackendKind::Memory => StorageConfig::memory(),
            BackendKind::Disk => StorageConfig::disk(self.storage_path.as_ref().expect("path")),
        }
    }

    /// Reopen storage using the same path (used for persistence tests).
    pub fn reopen(&self) -> Arc<StorageAdapter> {
        self.storage()
    }
}

/// World state that starts rejecting writes after a fixed number of puts.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingWorldState {
    inner: InMemoryWorldState,
    writes_allowed: AtomicUsize,
    fail_reads: bool,
}

#[allow(dead_code)]
impl FailingWorldState {
    pub fn failing_writes_after(writes_allowed: usize) -> Self {
        Self {
            writes_allowed: AtomicUsize::new(writes_allowed),
            ..Self::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            writes_allowed: AtomicUsize::new(usize::MAX),
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &InMemoryWorldState {
        &self.inner
    }

    fn take_write_slot(&self) -> Result<(), StorageError> {
        self.writes_allowed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .map(|_| ())
            .map_err(|_| StorageError::Unavailable("injected write failure".to_string()))
    }

    fn check_read(&self) -> Result<(), StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("injected read failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorldState for FailingWorldState {
    async fn get(&self, key: &Key) -> Result<Option<Value>, StorageError> {
        self.check_read()?;
        self.inner.get(key).await
    }

    async fn put(&self, key: Key, value: Value) -> Result<(), StorageError> {
        self.take_write_slot()?;
        self.inner.put(key, value).await
    }

    async fn put_if_absent(&self, key: Key, value: Value) -> Result<bool, StorageError> {
        self.take_write_slot()?;
        self.inner.put_if_absent(key, value).await
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<StateIterator, StorageError> {
        self.check_read()?;
        self.inner.scan_range(start, end).await
    }
}

/// World state whose point reads always miss, so existence checks pass and
/// writes go straight to `put_if_absent` against whatever the inner store holds.
#[allow(dead_code)]
#[derive(Default)]
pub struct StaleReadWorldState {
    inner: InMemoryWorldState,
}

#[allow(dead_code)]
impl StaleReadWorldState {
    pub fn inner(&self) -> &InMemoryWorldState {
        &self.inner
    }
}

#[async_trait::async_trait]
impl WorldState for StaleReadWorldState {
    async fn get(&self, _key: &Key) -> Result<Option<Value>, StorageError> {
        Ok(None)
    }

    async fn put(&self, key: Key, value: Value) -> Result<(), StorageError> {
        self.inner.put(key, value).await
    }

    async fn put_if_absent(&self, key: Key, value: Value) -> Result<bool, StorageError> {
        self.inner.put_if_absent(key, value).await
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<StateIterator, StorageError> {
        self.inner.scan_range(start, end).await
    }
}
