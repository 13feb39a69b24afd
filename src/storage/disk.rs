use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::storage::{StateIterator, StorageError, WorldState};
use crate::types::{Key, Value};

use super::engine::validate_key;
use super::iter::{ScanTracker, collect_range};

/// Simple file-backed world state implementing the `WorldState` trait.
///
/// The whole keyspace is rewritten on every put. This is intended for local
/// runs and tests, not for production durability guarantees.
pub struct OnDiskWorldState {
    data_file: PathBuf,
    state: RwLock<StoredState>,
    scans: ScanTracker,
}

impl OnDiskWorldState {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(to_unavailable)?;
        let data_file = dir.join("world_state.json");
        let state = if data_file.exists() {
            let bytes = fs::read(&data_file).map_err(to_unavailable)?;
            serde_json::from_slice(&bytes).map_err(to_corrupted)?
        } else {
            StoredState::default()
        };
        debug!(path = %data_file.display(), "opened on-disk world state");

        Ok(Self {
            data_file,
            state: RwLock::new(state),
            scans: ScanTracker::default(),
        })
    }

    pub fn open_scans(&self) -> usize {
        self.scans.open_scans()
    }

    fn persist(&self, state: &StoredState) -> Result<(), StorageError> {
        let serialized = serde_json::to_vec(state).map_err(to_corrupted)?;
        let tmp = self.data_file.with_extension("tmp");
        fs::write(&tmp, serialized).map_err(to_unavailable)?;
        fs::rename(tmp, &self.data_file).map_err(to_unavailable)?;
        Ok(())
    }

    /// Inserts and persists; the in-memory map is restored if persisting fails
    /// so a failed put never becomes visible.
    fn insert_persisted(
        &self,
        state: &mut StoredState,
        key: Key,
        value: Value,
    ) -> Result<(), StorageError> {
        let previous = state.entries.insert(key.clone(), value);
        if let Err(err) = self.persist(state) {
            match previous {
                Some(previous) => state.entries.insert(key, previous),
                None => state.entries.remove(&key),
            };
            return Err(err);
        }
        Ok(())
    }
}

#[derive(Default, Serialize, Deserialize)]
struct StoredState {
    entries: BTreeMap<Key, Value>,
}

#[async_trait::async_trait]
impl WorldState for OnDiskWorldState {
    async fn get(&self, key: &Key) -> Result<Option<Value>, StorageError> {
        validate_key(key)?;
        let state = self.state.read().await;
        Ok(state.entries.get(key).cloned())
    }

    async fn put(&self, key: Key, value: Value) -> Result<(), StorageError> {
        validate_key(&key)?;
        let mut state = self.state.write().await;
        self.insert_persisted(&mut state, key, value)
    }

    async fn put_if_absent(&self, key: Key, value: Value) -> Result<bool, StorageError> {
        validate_key(&key)?;
        let mut state = self.state.write().await;
        if state
            .entries
            .get(&key)
            .is_some_and(|existing| !existing.is_empty())
        {
            return Ok(false);
        }
        self.insert_persisted(&mut state, key, value)?;
        Ok(true)
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<StateIterator, StorageError> {
        let state = self.state.read().await;
        Ok(StateIterator::open(
            collect_range(&state.entries, start, end),
            &self.scans,
        ))
    }
}

fn to_unavailable(err: impl ToString) -> StorageError {
    StorageError::Unavailable(err.to_string())
}

fn to_corrupted(err: impl ToString) -> StorageError {
    StorageError::CorruptedState(err.to_string())
}
