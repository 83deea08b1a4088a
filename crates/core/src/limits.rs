//! Resource limits for documents and paths
//!
//! This module defines configurable limits that the store enforces at its
//! boundary. A document that would exceed [`Limits::max_document_bytes`]
//! after a write aborts the whole call; depth and path-length violations
//! surface as per-path statuses so they never abort sibling operations.
//!
//! ## Contract
//!
//! The default limits are FROZEN and cannot change without a major version
//! bump. Custom limits can be set at cluster open time.

/// Default maximum serialized document size (16MB)
pub const MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Default maximum nesting depth of a document (100 levels)
pub const MAX_NESTING_DEPTH: usize = 100;

/// Default maximum number of path segments (256)
pub const MAX_PATH_SEGMENTS: usize = 256;

/// Default maximum array length (1M elements)
pub const MAX_ARRAY_SIZE: usize = 1_000_000;

/// Resource limits enforced by the store
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum serialized document size in bytes (default: 16MB)
    pub max_document_bytes: usize,

    /// Maximum nesting depth of a document (default: 100)
    pub max_nesting_depth: usize,

    /// Maximum number of segments in one path (default: 256)
    pub max_path_segments: usize,

    /// Maximum array length (default: 1M elements)
    pub max_array_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_document_bytes: MAX_DOCUMENT_SIZE,
            max_nesting_depth: MAX_NESTING_DEPTH,
            max_path_segments: MAX_PATH_SEGMENTS,
            max_array_len: MAX_ARRAY_SIZE,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// This is useful for unit tests that need to test limit enforcement
    /// without creating extremely large documents.
    pub fn with_small_limits() -> Self {
        Limits {
            max_document_bytes: 2000,
            max_nesting_depth: 10,
            max_path_segments: 8,
            max_array_len: 100,
        }
    }
}
