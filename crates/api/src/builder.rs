//! Fluent batch builders
//!
//! A builder accumulates path-addressed operations against one document and
//! sends them to the store as a single call. Append methods take `mut self`
//! and return `Self`, so chains read naturally; `execute` consumes the
//! builder, which makes use-after-execute a compile error instead of a
//! runtime state check.
//!
//! Builders never validate paths or bounds. A malformed path or an
//! out-of-range index is accepted here and comes back as a per-path status
//! on the fragment.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use subdoc_core::{DocumentStore, Error, Operation, Result, Value};
use tracing::debug;

use crate::fragment::DocumentFragment;

/// Accumulates lookup operations against one document
///
/// Obtained from [`Bucket::lookup_in`](crate::cluster::Bucket::lookup_in).
pub struct LookupInBuilder {
    bucket: String,
    id: String,
    store: Arc<dyn DocumentStore>,
    closed: Arc<AtomicBool>,
    ops: Vec<Operation>,
}

impl LookupInBuilder {
    pub(crate) fn new(
        bucket: String,
        id: String,
        store: Arc<dyn DocumentStore>,
        closed: Arc<AtomicBool>,
    ) -> Self {
        LookupInBuilder {
            bucket,
            id,
            store,
            closed,
            ops: Vec::new(),
        }
    }

    /// Read the value at `path`
    ///
    /// The empty path reads the whole document.
    pub fn get(mut self, path: impl Into<String>) -> Self {
        self.ops.push(Operation::get(path));
        self
    }

    /// Check whether `path` exists in the document
    pub fn exists(mut self, path: impl Into<String>) -> Self {
        self.ops.push(Operation::exists(path));
        self
    }

    /// Number of accumulated operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if no operations have been accumulated
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Execute the accumulated batch as one store call
    ///
    /// # Errors
    ///
    /// [`Error::EmptyBatch`] if nothing was accumulated,
    /// [`Error::ClusterClosed`] after the owning cluster closed, and
    /// whatever `lookup_batch` reports (unknown bucket, missing document).
    /// Per-path failures do not error; they ride back on the fragment.
    pub fn execute(self) -> Result<DocumentFragment> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::ClusterClosed);
        }
        if self.ops.is_empty() {
            return Err(Error::EmptyBatch);
        }

        debug!(
            target: "subdoc::api",
            bucket = %self.bucket,
            id = %self.id,
            ops = self.ops.len(),
            "Executing lookup batch"
        );
        let result = self.store.lookup_batch(&self.bucket, &self.id, &self.ops)?;
        Ok(DocumentFragment::new(result))
    }
}

/// Accumulates mutation operations against one document
///
/// Obtained from [`Bucket::mutate_in`](crate::cluster::Bucket::mutate_in).
/// The whole batch commits as one versioned update; see
/// [`DocumentStore::mutate_batch`] for the commit rules.
pub struct MutateInBuilder {
    bucket: String,
    id: String,
    store: Arc<dyn DocumentStore>,
    closed: Arc<AtomicBool>,
    ops: Vec<Operation>,
    cas: Option<u64>,
}

impl MutateInBuilder {
    pub(crate) fn new(
        bucket: String,
        id: String,
        store: Arc<dyn DocumentStore>,
        closed: Arc<AtomicBool>,
    ) -> Self {
        MutateInBuilder {
            bucket,
            id,
            store,
            closed,
            ops: Vec::new(),
            cas: None,
        }
    }

    /// Add a new object member at `path`
    ///
    /// Fails per-path with `PathExists` if the member is already there.
    /// With `create_parents`, missing intermediate containers on the way to
    /// the target are created.
    pub fn insert(
        mut self,
        path: impl Into<String>,
        value: impl Into<Value>,
        create_parents: bool,
    ) -> Self {
        self.ops
            .push(Operation::insert(path, value.into(), create_parents));
        self
    }

    /// Replace the existing value at `path`
    pub fn replace(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ops.push(Operation::replace(path, value.into()));
        self
    }

    /// Remove the key or array element at `path`
    pub fn remove(mut self, path: impl Into<String>) -> Self {
        self.ops.push(Operation::remove(path));
        self
    }

    /// Push a value onto the back of the array at `path`
    pub fn array_append(
        mut self,
        path: impl Into<String>,
        value: impl Into<Value>,
        create_parents: bool,
    ) -> Self {
        self.ops
            .push(Operation::array_append(path, value.into(), create_parents));
        self
    }

    /// Insert a value at the front of the array at `path`
    pub fn array_prepend(
        mut self,
        path: impl Into<String>,
        value: impl Into<Value>,
        create_parents: bool,
    ) -> Self {
        self.ops
            .push(Operation::array_prepend(path, value.into(), create_parents));
        self
    }

    /// Insert a value at an explicit position, e.g. `toys[2]`
    ///
    /// The path must end in an index segment naming the position; the index
    /// may equal the current length (append). Bounds are checked by the
    /// store, not here.
    pub fn array_insert(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ops.push(Operation::array_insert(path, value.into()));
        self
    }

    /// Append a value only if it is not already in the array at `path`
    pub fn array_add_unique(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ops
            .push(Operation::array_add_unique(path, value.into()));
        self
    }

    /// Add a signed delta to the integer leaf at `path`
    ///
    /// An absent leaf under an existing object starts from zero. The
    /// fragment carries the post-operation value.
    pub fn counter(mut self, path: impl Into<String>, delta: i64) -> Self {
        self.ops.push(Operation::counter(path, delta));
        self
    }

    /// Make the batch conditional on the document's current cas
    pub fn cas(mut self, expected: u64) -> Self {
        self.cas = Some(expected);
        self
    }

    /// Number of accumulated operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if no operations have been accumulated
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Execute the accumulated batch as one store call
    ///
    /// # Errors
    ///
    /// [`Error::EmptyBatch`] if nothing was accumulated,
    /// [`Error::ClusterClosed`] after the owning cluster closed, and
    /// whatever `mutate_batch` reports (unknown bucket, missing document,
    /// cas mismatch, document over the size limit). Per-path failures do
    /// not error; they ride back on the fragment.
    pub fn execute(self) -> Result<DocumentFragment> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::ClusterClosed);
        }
        if self.ops.is_empty() {
            return Err(Error::EmptyBatch);
        }

        debug!(
            target: "subdoc::api",
            bucket = %self.bucket,
            id = %self.id,
            ops = self.ops.len(),
            cas = ?self.cas,
            "Executing mutation batch"
        );
        let result = self
            .store
            .mutate_batch(&self.bucket, &self.id, &self.ops, self.cas)?;
        Ok(DocumentFragment::new(result))
    }
}
