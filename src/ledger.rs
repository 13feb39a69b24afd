//! Record store façade over a [`WorldState`].
//!
//! Every operation reads or writes through to the store; nothing is cached
//! between calls. Records move from absent to present exactly once and are
//! never updated or deleted here.
//!
//! `create` checks existence and then writes with
//! [`WorldState::put_if_absent`], so two invocations racing on the same id
//! cannot both succeed even if the host runs them concurrently. The façade
//! itself takes no locks and performs no retries.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::context::InvocationContext;
use crate::provenance;
use crate::record::{self, CodecError, TransactionDraft, TransactionRecord};
use crate::storage::{StateIterator, StorageError, WorldState};
use crate::types::Key;

/// Errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("transaction {id} already exists")]
    AlreadyExists { id: Key },
    #[error("transaction {id} does not exist")]
    NotFound { id: Key },
    #[error("{operation}: failed to read {key:?} from world state: {source}")]
    StoreRead {
        operation: &'static str,
        key: Key,
        #[source]
        source: StorageError,
    },
    #[error("{operation}: failed to write {key:?} to world state: {source}")]
    StoreWrite {
        operation: &'static str,
        key: Key,
        #[source]
        source: StorageError,
    },
    #[error("stored record {key:?} is malformed: {source}")]
    Decoding {
        key: Key,
        #[source]
        source: CodecError,
    },
    #[error("record {key:?} cannot be encoded: {source}")]
    Encoding {
        key: Key,
        #[source]
        source: CodecError,
    },
}

/// Records written by [`RecordLedger::seed`].
pub fn bootstrap_records() -> Vec<TransactionRecord> {
    vec![
        TransactionDraft::new("TXN001", "2024-01-01", "FMR001", "PRD001", 100.0, 50000.0)
            .into_record("init_hash_1".to_string()),
        TransactionDraft::new("TXN002", "2024-01-02", "FMR002", "PRD002", 200.0, 120000.0)
            .into_record("init_hash_2".to_string()),
    ]
}

/// Create-once store of transaction records over a world state.
///
/// Holds no record state of its own; every call goes through to the store.
pub struct RecordLedger<S: WorldState> {
    storage: Arc<S>,
}

impl<S: WorldState> RecordLedger<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Writes the bootstrap records unconditionally, overwriting those keys.
    ///
    /// Stops at the first failed write. Records written before the failure
    /// stay in the store.
    pub async fn seed(&self) -> Result<(), LedgerError> {
        for record in bootstrap_records() {
            let bytes = record::serialize(&record).map_err(|source| LedgerError::Encoding {
                key: record.id.clone(),
                source,
            })?;
            self.storage
                .put(record.id.clone(), bytes)
                .await
                .map_err(|source| LedgerError::StoreWrite {
                    operation: "seed",
                    key: record.id.clone(),
                    source,
                })?;
            debug!(id = %record.id, "seeded record");
        }
        info!("seeded bootstrap records");
        Ok(())
    }

    /// Creates a new record under `draft.id`, stamping it with a provenance
    /// mark built from the context's timestamp.
    pub async fn create(
        &self,
        ctx: &InvocationContext,
        draft: TransactionDraft,
    ) -> Result<TransactionRecord, LedgerError> {
        if self.exists(&draft.id).await? {
            warn!(id = %draft.id, txn_id = %ctx.txn_id(), "create rejected: record exists");
            return Err(LedgerError::AlreadyExists { id: draft.id });
        }

        let mark = provenance::generate(&draft.id, &draft.farmer_id, ctx.timestamp());
        let record = draft.into_record(mark);
        let bytes = record::serialize(&record).map_err(|source| LedgerError::Encoding {
            key: record.id.clone(),
            source,
        })?;

        let inserted = self
            .storage
            .put_if_absent(record.id.clone(), bytes)
            .await
            .map_err(|source| LedgerError::StoreWrite {
                operation: "create",
                key: record.id.clone(),
                source,
            })?;
        if !inserted {
            warn!(id = %record.id, txn_id = %ctx.txn_id(), "create lost race for id");
            return Err(LedgerError::AlreadyExists { id: record.id });
        }

        info!(id = %record.id, txn_id = %ctx.txn_id(), "created record");
        Ok(record)
    }

    pub async fn read(&self, id: &str) -> Result<TransactionRecord, LedgerError> {
        let bytes = self
            .storage
            .get(&id.to_string())
            .await
            .map_err(|source| LedgerError::StoreRead {
                operation: "read",
                key: id.to_string(),
                source,
            })?;

        match bytes {
            Some(bytes) if !bytes.is_empty() => {
                record::deserialize(&bytes).map_err(|source| LedgerError::Decoding {
                    key: id.to_string(),
                    source,
                })
            }
            _ => Err(LedgerError::NotFound { id: id.to_string() }),
        }
    }

    /// Whether a non-empty value is stored at `id`.
    pub async fn exists(&self, id: &str) -> Result<bool, LedgerError> {
        let bytes = self
            .storage
            .get(&id.to_string())
            .await
            .map_err(|source| LedgerError::StoreRead {
                operation: "exists",
                key: id.to_string(),
                source,
            })?;
        Ok(bytes.is_some_and(|bytes| !bytes.is_empty()))
    }

    /// Lazily enumerates every record in the store's key order.
    pub async fn list_all(&self) -> Result<RecordIter, LedgerError> {
        let scan = self
            .storage
            .scan_range("", "")
            .await
            .map_err(|source| LedgerError::StoreRead {
                operation: "list_all",
                key: Key::new(),
                source,
            })?;
        Ok(RecordIter { scan })
    }

    /// Collects [`list_all`](Self::list_all), failing on the first bad entry.
    pub async fn all_records(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        self.list_all().await?.collect()
    }

    /// Whether the record stored at `id` carries exactly `mark`.
    pub async fn verify_mark(&self, id: &str, mark: &str) -> Result<bool, LedgerError> {
        let record = self.read(id).await?;
        let matches = record.provenance_mark == mark;
        if !matches {
            warn!(id, stored = %record.provenance_mark, supplied = mark, "provenance mark mismatch");
        }
        Ok(matches)
    }
}

/// Iterator returned by [`RecordLedger::list_all`].
///
/// Entries with an empty value are treated as absent and skipped. The first
/// entry that fails to decode is yielded as [`LedgerError::Decoding`] and
/// ends the iteration. The underlying scan is closed on exhaustion, on a
/// decode failure, and on drop.
#[derive(Debug)]
pub struct RecordIter {
    scan: StateIterator,
}

impl RecordIter {
    pub fn close(&mut self) {
        self.scan.close();
    }

    pub fn is_closed(&self) -> bool {
        self.scan.is_closed()
    }
}

impl Iterator for RecordIter {
    type Item = Result<TransactionRecord, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(entry) = self.scan.next() else {
                self.scan.close();
                return None;
            };
            if entry.value.is_empty() {
                continue;
            }

            return match record::deserialize(&entry.value) {
                Ok(record) => Some(Ok(record)),
                Err(source) => {
                    self.scan.close();
                    Some(Err(LedgerError::Decoding {
                        key: entry.key,
                        source,
                    }))
                }
            };
        }
    }
}
