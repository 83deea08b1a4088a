//! Error types for subdoc
//!
//! This module defines all batch-level error types used throughout the
//! system. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Per-path failures are NOT errors: they are [`OpStatus`] codes carried on
//! the result fragment. Only conditions that abort an entire call (or a
//! fragment access that cannot be answered) surface here.

use crate::status::OpStatus;
use thiserror::Error;

/// Result type alias for subdoc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Batch-level error types for the sub-document API
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The target document does not exist
    #[error("document '{id}' not found in bucket '{bucket}'")]
    DocumentNotFound {
        /// Bucket name
        bucket: String,
        /// Document id
        id: String,
    },

    /// The named bucket was never provisioned
    #[error("bucket '{0}' not found")]
    BucketNotFound(String),

    /// The cluster has been closed
    #[error("cluster is closed")]
    ClusterClosed,

    /// Execute was called on a builder with no operations
    #[error("batch contains no operations")]
    EmptyBatch,

    /// CAS precondition failed (for versioned mutations)
    #[error("cas mismatch: expected {expected}, got {actual}")]
    CasMismatch {
        /// Expected cas value
        expected: u64,
        /// Actual cas value found
        actual: u64,
    },

    /// Document exceeds the configured size limit
    #[error("document size {size} bytes exceeds maximum of {max} bytes")]
    DocumentTooLarge {
        /// Serialized size of the document
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Fragment access for a path that was never submitted
    #[error("path '{0}' was not requested in this batch")]
    PathNotRequested(String),

    /// Fragment content access for an operation that did not succeed
    #[error("operation at path '{path}' failed with status {status}")]
    OpFailed {
        /// The submitted path
        path: String,
        /// The per-path status
        status: OpStatus,
    },

    /// Fragment content access for an operation that carries no payload
    #[error("operation at path '{0}' produced no content")]
    NoContent(String),

    /// Payload encoding or decoding failed
    #[error("decode error: {0}")]
    Decode(String),
}
