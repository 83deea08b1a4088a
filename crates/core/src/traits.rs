//! Store abstraction behind the sub-document API
//!
//! This module defines the DocumentStore trait that the builders execute
//! against. The embedded in-memory implementation lives in its own crate;
//! swapping in a remote implementation must not break the API layer.

use crate::document::{Document, MultiResult};
use crate::error::Result;
use crate::operation::Operation;
use crate::value::Value;

/// Document store abstraction
///
/// One round-trip per call: a batch of operations against one document in
/// one bucket. Per-path failures are carried inside the returned
/// [`MultiResult`]; only call-level failures (missing document, unknown
/// bucket, CAS conflict, size limit) surface as errors.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Batches against the same
/// document must be atomic with respect to each other; no ordering is
/// guaranteed across documents.
pub trait DocumentStore: Send + Sync {
    /// Create or replace a whole document
    ///
    /// Returns the new cas.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket does not exist or the document would
    /// exceed the size limit.
    fn upsert(&self, bucket: &str, id: &str, content: Value) -> Result<u64>;

    /// Fetch a whole document
    ///
    /// Returns None if the document doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket does not exist.
    fn get(&self, bucket: &str, id: &str) -> Result<Option<Document>>;

    /// Check whether a document exists
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket does not exist.
    fn exists(&self, bucket: &str, id: &str) -> Result<bool>;

    /// Remove a whole document
    ///
    /// Returns true if the document existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket does not exist.
    fn remove(&self, bucket: &str, id: &str) -> Result<bool>;

    /// Execute a batch of lookup operations against one document
    ///
    /// Read-only: the document is unaffected. Every submitted operation
    /// produces one result entry, in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket or the document does not exist, or if
    /// `ops` is empty.
    fn lookup_batch(&self, bucket: &str, id: &str, ops: &[Operation]) -> Result<MultiResult>;

    /// Execute a batch of mutation operations against one document
    ///
    /// The batch is one versioned update: operations apply in order to a
    /// working copy; an operation that fails skips only itself. If at least
    /// one operation applied, the copy commits and the cas increments
    /// exactly once; if none applied, the document is unchanged.
    ///
    /// `cas: Some(expected)` makes the batch conditional on the document's
    /// current cas.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket or the document does not exist, `ops`
    /// is empty, the cas precondition fails, or the committed document would
    /// exceed the size limit (in which case nothing is applied).
    fn mutate_batch(
        &self,
        bucket: &str,
        id: &str,
        ops: &[Operation],
        cas: Option<u64>,
    ) -> Result<MultiResult>;
}
