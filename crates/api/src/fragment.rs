//! Result fragment returned by an executed batch
//!
//! A [`DocumentFragment`] wraps the store's per-operation results and gives
//! path-addressed access to statuses and content. It is immutable: every
//! accessor returns the same answer no matter how often or in what order it
//! is called.

use subdoc_core::{BatchStatus, Error, MultiResult, OpKind, OpResult, OpStatus, Result, Value};

/// Per-path results of one executed batch
///
/// Two access policies exist side by side. Path-addressed accessors
/// validate: a path that was never submitted is [`Error::PathNotRequested`],
/// distinct from every per-path failure of a path that *was* submitted.
/// Positional accessors are raw: they report what the store returned at
/// that slot without judging it.
///
/// When the same path was submitted more than once, path-addressed
/// accessors answer for the **last** matching operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFragment {
    result: MultiResult,
}

impl DocumentFragment {
    pub(crate) fn new(result: MultiResult) -> Self {
        DocumentFragment { result }
    }

    /// The target document id
    pub fn id(&self) -> &str {
        &self.result.id
    }

    /// Document cas observed (lookup) or produced (mutation) by the call
    pub fn cas(&self) -> u64 {
        self.result.cas
    }

    /// Overall outcome: success only if every operation succeeded
    pub fn status(&self) -> BatchStatus {
        self.result.batch_status()
    }

    /// Number of operations in the executed batch
    pub fn count(&self) -> usize {
        self.result.results.len()
    }

    /// Check if the fragment carries no results
    pub fn is_empty(&self) -> bool {
        self.result.results.is_empty()
    }

    /// All per-operation results in submission order
    pub fn results(&self) -> &[OpResult] {
        &self.result.results
    }

    fn find(&self, path: &str) -> Option<&OpResult> {
        self.result.results.iter().rfind(|r| r.path == path)
    }

    /// Status of the last operation submitted for `path`
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotRequested`] if no operation in the batch
    /// used this path.
    pub fn op_status(&self, path: &str) -> Result<OpStatus> {
        self.find(path)
            .map(|r| r.status)
            .ok_or_else(|| Error::PathNotRequested(path.to_string()))
    }

    /// Status of the operation at `index`, in submission order
    pub fn op_status_at(&self, index: usize) -> Option<OpStatus> {
        self.result.results.get(index).map(|r| r.status)
    }

    /// Content produced by the last operation submitted for `path`
    ///
    /// `Exists` answers with its boolean even when the path was absent from
    /// the document; every other kind requires the operation to have
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotRequested`] if the path was never submitted,
    /// [`Error::OpFailed`] if the operation did not succeed, and
    /// [`Error::NoContent`] if it succeeded but produces no payload.
    pub fn content(&self, path: &str) -> Result<&Value> {
        let r = self
            .find(path)
            .ok_or_else(|| Error::PathNotRequested(path.to_string()))?;

        if r.kind != OpKind::Exists && !r.status.is_success() {
            return Err(Error::OpFailed {
                path: r.path.clone(),
                status: r.status,
            });
        }
        r.value.as_ref().ok_or_else(|| Error::NoContent(r.path.clone()))
    }

    /// Raw payload of the operation at `index`, if it carries one
    pub fn content_at(&self, index: usize) -> Option<&Value> {
        self.result.results.get(index).and_then(|r| r.value.as_ref())
    }

    /// Content at `path` decoded into a concrete type
    ///
    /// # Errors
    ///
    /// Everything [`content`](Self::content) returns, plus
    /// [`Error::Decode`] when the value does not fit `T`.
    pub fn content_as<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.content(path)?.deserialize_into()
    }

    /// Check whether `path` was submitted and its operation succeeded
    pub fn exists(&self, path: &str) -> bool {
        matches!(self.find(path), Some(r) if r.status.is_success())
    }
}

impl<'a> IntoIterator for &'a DocumentFragment {
    type Item = &'a OpResult;
    type IntoIter = std::slice::Iter<'a, OpResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.result.results.iter()
    }
}
