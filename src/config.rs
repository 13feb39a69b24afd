use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ledger configuration loaded at startup.
///
/// Selects the world-state backend the host adapter opens and whether the
/// bootstrap records are written when the ledger is opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Storage backend configuration.
    pub storage: StorageConfig,
    /// Write the bootstrap records on open, overwriting them if present.
    #[serde(default)]
    pub seed_on_open: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LedgerConfig {
    pub fn new(storage: StorageConfig) -> Self {
        Self {
            storage,
            seed_on_open: false,
        }
    }

    pub fn with_seed_on_open(mut self, seed_on_open: bool) -> Self {
        self.seed_on_open = seed_on_open;
        self
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(StorageConfig::memory())
    }
}

/// Supported storage backends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Disk,
}

/// Storage configuration specifying the backend and optional path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: None,
        }
    }

    pub fn disk(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::Disk,
            path: Some(path.into()),
        }
    }
}
