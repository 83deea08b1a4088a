//! Core types for the subdoc document store
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: tagged payload variant for document content and fragments
//! - Path/Segment: sub-document path expressions with dot/bracket parsing
//! - Operation/OpKind: path-addressed operation records
//! - OpStatus/BatchStatus: per-path and batch-level outcome codes
//! - Document/MultiResult: stored documents and batch results
//! - Error: batch-level error hierarchy
//! - Limits: document and path resource limits
//! - DocumentStore: the store trait the API layer executes against

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod document;
pub mod error;
pub mod limits;
pub mod operation;
pub mod path;
pub mod status;
pub mod traits;
pub mod value;

// Re-export commonly used types and traits
pub use document::{now_millis, Document, MultiResult, OpResult};
pub use error::{Error, Result};
pub use limits::{
    Limits, MAX_ARRAY_SIZE, MAX_DOCUMENT_SIZE, MAX_NESTING_DEPTH, MAX_PATH_SEGMENTS,
};
pub use operation::{OpKind, Operation};
pub use path::{Path, PathParseError, Segment};
pub use status::{BatchStatus, OpStatus};
pub use traits::DocumentStore;
pub use value::Value;
