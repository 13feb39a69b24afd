//! Core crate exports for agriledger.
//!
//! The modules exposed here separate the record model, provenance marks, the
//! world-state contract with its bundled backends, and the record ledger that
//! mediates between callers and the store.

pub mod config;
pub mod context;
pub mod ledger;
pub mod provenance;
pub mod record;
pub mod storage;
pub mod types;

pub use config::{LedgerConfig, StorageBackend, StorageConfig};
pub use context::InvocationContext;
pub use ledger::{LedgerError, RecordIter, RecordLedger, bootstrap_records};
pub use record::{CodecError, TransactionDraft, TransactionRecord};
pub use types::{Key, TxnId, Value};
