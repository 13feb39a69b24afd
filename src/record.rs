//! Transaction record shape and its canonical byte encoding.
//!
//! Records are stored as compact JSON with a fixed key order:
//! `ID`, `date`, `farmerID`, `productID`, `quantity`, `amount`,
//! `provenanceMark`. Every key is required when decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Key;

/// A single agricultural sale as held in the world state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    #[serde(rename = "ID")]
    pub id: Key,
    pub date: String,
    #[serde(rename = "farmerID")]
    pub farmer_id: String,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub quantity: f64,
    pub amount: f64,
    #[serde(rename = "provenanceMark")]
    pub provenance_mark: String,
}

/// Caller-supplied fields of a record that has not been created yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub id: Key,
    pub date: String,
    pub farmer_id: String,
    pub product_id: String,
    pub quantity: f64,
    pub amount: f64,
}

impl TransactionDraft {
    pub fn new(
        id: impl Into<Key>,
        date: impl Into<String>,
        farmer_id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: f64,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            farmer_id: farmer_id.into(),
            product_id: product_id.into(),
            quantity,
            amount,
        }
    }

    pub fn into_record(self, provenance_mark: String) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            date: self.date,
            farmer_id: self.farmer_id,
            product_id: self.product_id,
            quantity: self.quantity,
            amount: self.amount,
            provenance_mark,
        }
    }
}

/// Errors produced while encoding or decoding a record.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("field `{field}` is not a finite number")]
    NonFinite { field: &'static str },
    #[error("encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("decoding failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl CodecError {
    pub fn is_encode(&self) -> bool {
        matches!(self, CodecError::NonFinite { .. } | CodecError::Encode(_))
    }
}

/// Encodes a record into its canonical bytes.
///
/// JSON has no representation for NaN or infinities, so those are rejected
/// instead of being written as `null`.
pub fn serialize(record: &TransactionRecord) -> Result<Vec<u8>, CodecError> {
    if !record.quantity.is_finite() {
        return Err(CodecError::NonFinite { field: "quantity" });
    }
    if !record.amount.is_finite() {
        return Err(CodecError::NonFinite { field: "amount" });
    }
    serde_json::to_vec(record).map_err(CodecError::Encode)
}

pub fn deserialize(bytes: &[u8]) -> Result<TransactionRecord, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}
