//! Document and batch-result records
//!
//! A [`Document`] is one stored JSON tree plus its metadata. The `cas`
//! (compare-and-swap token) increments once per versioned update: an upsert,
//! or a mutation batch in which at least one operation applied. Callers can
//! hand the token back on the next mutation to make it conditional.
//!
//! [`MultiResult`] is what the store returns for an executed batch: one
//! [`OpResult`] per submitted operation, in submission order, plus the
//! document cas observed (lookups) or produced (mutations) by the call.

use crate::operation::OpKind;
use crate::status::{BatchStatus, OpStatus};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

/// A stored document with version metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document unique identifier
    pub id: String,
    /// The JSON content (root of document)
    pub content: Value,
    /// Compare-and-swap token (increments on any change)
    pub cas: u64,
    /// Creation timestamp (millis since epoch)
    pub created_at: i64,
    /// Last modification timestamp (millis since epoch)
    pub updated_at: i64,
}

impl Document {
    /// Create a new document with initial content
    ///
    /// Initializes cas to 1 and sets timestamps to current time.
    pub fn new(id: impl Into<String>, content: Value) -> Self {
        let now = now_millis();

        Document {
            id: id.into(),
            content,
            cas: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Increment cas and update timestamp
    ///
    /// Call this after any modification to the document.
    pub fn touch(&mut self) {
        self.cas += 1;
        self.updated_at = now_millis();
    }
}

/// Result of a single operation within an executed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpResult {
    /// The path exactly as submitted
    pub path: String,
    /// The kind of operation that produced this result
    pub kind: OpKind,
    /// Per-path outcome
    pub status: OpStatus,
    /// Payload, when the operation produces one
    ///
    /// `Get` carries the value read, `Exists` a boolean, `Counter` the
    /// post-operation integer. Pure mutations carry nothing.
    pub value: Option<Value>,
}

/// Result of an executed batch, one entry per submitted operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiResult {
    /// The target document id
    pub id: String,
    /// Document cas after the call
    pub cas: u64,
    /// Per-operation results in submission order
    pub results: Vec<OpResult>,
}

impl MultiResult {
    /// Overall outcome: success only if every operation succeeded
    pub fn batch_status(&self) -> BatchStatus {
        if self.results.iter().all(|r| r.status.is_success()) {
            BatchStatus::Success
        } else {
            BatchStatus::MultiPathFailure
        }
    }
}
