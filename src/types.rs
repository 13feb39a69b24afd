use std::fmt;

use uuid::Uuid;

/// Key into the world state. Record ids are used as keys directly.
pub type Key = String;
/// Raw value bytes held by the world state.
pub type Value = Vec<u8>;

/// Tags every log line emitted while serving one ledger invocation.
///
/// Only used for correlation; it is never written into a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxnId(Uuid);

impl TxnId {
    /// Fresh v4 id, drawn once per invocation.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TxnId {
    fn default() -> Self {
        Self::random()
    }
}

impl From<Uuid> for TxnId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
