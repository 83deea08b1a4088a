//! Per-path and batch-level status codes
//!
//! Failures in a sub-document call land on one of two tiers. A batch-level
//! failure (missing document, unknown bucket, CAS conflict) aborts the whole
//! call and surfaces as an [`Error`](crate::error::Error). A per-path failure
//! affects only its own operation and is recorded as an [`OpStatus`] on the
//! result fragment, so one bad path never hides the results of its siblings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single operation within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpStatus {
    /// The operation applied (or the lookup found its target)
    Success,
    /// A referenced key or element does not exist
    PathNotFound,
    /// Insert target already present, or ArrayAddUnique found a duplicate
    PathExists,
    /// Document structure conflicts with the path or the operation
    PathMismatch,
    /// The path string does not parse or is not legal for this operation
    PathInvalid,
    /// Explicit array index outside the valid range, or growth past the
    /// array length limit
    IndexOutOfBounds,
    /// Counter would overflow the 64-bit integer range
    DeltaOutOfRange,
    /// The mutation would nest the document past the depth limit
    ValueTooDeep,
}

impl OpStatus {
    /// Check if this status is a success
    pub fn is_success(&self) -> bool {
        matches!(self, OpStatus::Success)
    }

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OpStatus::Success => "Success",
            OpStatus::PathNotFound => "PathNotFound",
            OpStatus::PathExists => "PathExists",
            OpStatus::PathMismatch => "PathMismatch",
            OpStatus::PathInvalid => "PathInvalid",
            OpStatus::IndexOutOfBounds => "IndexOutOfBounds",
            OpStatus::DeltaOutOfRange => "DeltaOutOfRange",
            OpStatus::ValueTooDeep => "ValueTooDeep",
        }
    }
}

impl fmt::Display for OpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall outcome of a batch
///
/// `MultiPathFailure` means at least one operation in the batch did not
/// succeed; the per-path statuses say which and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Every operation in the batch succeeded
    Success,
    /// At least one operation failed
    MultiPathFailure,
}

impl BatchStatus {
    /// Check if every operation succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, BatchStatus::Success)
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Success => write!(f, "Success"),
            BatchStatus::MultiPathFailure => write!(f, "MultiPathFailure"),
        }
    }
}
