use chrono::{SecondsFormat, Utc};

use crate::types::TxnId;

/// Per-invocation metadata handed to ledger operations by the host.
///
/// The timestamp is captured once when the context is built, so every
/// operation within one invocation observes the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    txn_id: TxnId,
    timestamp: String,
}

impl InvocationContext {
    /// Context stamped with the current UTC wall-clock time (RFC 3339).
    pub fn now() -> Self {
        Self::at(Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true))
    }

    /// Context with a caller-chosen timestamp. Useful for tests and replays.
    pub fn at(timestamp: impl Into<String>) -> Self {
        Self {
            txn_id: TxnId::random(),
            timestamp: timestamp.into(),
        }
    }

    pub fn with_txn_id(mut self, txn_id: TxnId) -> Self {
        self.txn_id = txn_id;
        self
    }

    pub fn txn_id(&self) -> &TxnId {
        &self.txn_id
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
