//! Embedded in-memory document store
//!
//! [`MemoryStore`] keeps documents in sharded concurrent maps, one per
//! bucket. Buckets are provisioned up front; the `default` bucket always
//! exists. Per-document entry locking makes each batch atomic with respect
//! to concurrent batches on the same document, with no ordering guarantee
//! across documents.
//!
//! Size limits are enforced at the boundary: a whole-document write or a
//! committed mutation batch that would push the encoded document past
//! `max_document_bytes` is rejected with the document unchanged. Nesting
//! depth and path length are per-path concerns and surface as statuses on
//! the result fragment, not as errors here.

use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use dashmap::DashMap;
use subdoc_core::{
    Document, Error, Limits, MultiResult, OpResult, Operation, Result, Value,
};
use tracing::debug;

use crate::apply;

/// Name of the bucket that every store starts with
pub const DEFAULT_BUCKET: &str = "default";

/// In-memory document store backing the sub-document API
///
/// Documents live in a two-level map, bucket name to document id. The
/// concurrent map shards both levels, so batches against different
/// documents never contend and batches against the same document serialize
/// on its entry lock.
#[derive(Debug)]
pub struct MemoryStore {
    /// Bucket name to that bucket's documents
    buckets: DashMap<String, DashMap<String, Document>>,
    limits: Limits,
}

impl MemoryStore {
    /// Create a store with only the `default` bucket and default limits
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create a store with only the `default` bucket and the given limits
    pub fn with_limits(limits: Limits) -> Self {
        let store = MemoryStore {
            buckets: DashMap::new(),
            limits,
        };
        store
            .buckets
            .insert(DEFAULT_BUCKET.to_string(), DashMap::new());
        store
    }

    /// Create a store provisioned with the given buckets
    ///
    /// The `default` bucket is always present, listed or not.
    pub fn with_buckets<I, S>(names: I, limits: Limits) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::with_limits(limits);
        for name in names {
            store.buckets.entry(name.into()).or_default();
        }
        store
    }

    /// Check whether a bucket was provisioned
    pub fn has_bucket(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// The limits this store enforces
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    fn bucket(&self, name: &str) -> Result<Ref<'_, String, DashMap<String, Document>>> {
        self.buckets
            .get(name)
            .ok_or_else(|| Error::BucketNotFound(name.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoded byte size of a document tree
///
/// Measures the natural JSON text, not the in-memory representation.
fn encoded_size(content: &Value) -> Result<usize> {
    let json: serde_json::Value = content.clone().into();
    let bytes = serde_json::to_vec(&json).map_err(|e| Error::Decode(e.to_string()))?;
    Ok(bytes.len())
}

impl crate::DocumentStore for MemoryStore {
    fn upsert(&self, bucket: &str, id: &str, content: Value) -> Result<u64> {
        let docs = self.bucket(bucket)?;

        let size = encoded_size(&content)?;
        if size > self.limits.max_document_bytes {
            return Err(Error::DocumentTooLarge {
                size,
                max: self.limits.max_document_bytes,
            });
        }

        let cas = match docs.entry(id.to_string()) {
            Entry::Occupied(mut occupied) => {
                let doc = occupied.get_mut();
                doc.content = content;
                doc.touch();
                doc.cas
            }
            Entry::Vacant(vacant) => vacant.insert(Document::new(id, content)).cas,
        };

        debug!(target: "subdoc::store", bucket, id, cas, size, "Document upserted");
        Ok(cas)
    }

    fn get(&self, bucket: &str, id: &str) -> Result<Option<Document>> {
        let docs = self.bucket(bucket)?;
        Ok(docs.get(id).map(|entry| entry.value().clone()))
    }

    fn exists(&self, bucket: &str, id: &str) -> Result<bool> {
        let docs = self.bucket(bucket)?;
        Ok(docs.contains_key(id))
    }

    fn remove(&self, bucket: &str, id: &str) -> Result<bool> {
        let docs = self.bucket(bucket)?;
        let removed = docs.remove(id).is_some();
        if removed {
            debug!(target: "subdoc::store", bucket, id, "Document removed");
        }
        Ok(removed)
    }

    fn lookup_batch(&self, bucket: &str, id: &str, ops: &[Operation]) -> Result<MultiResult> {
        if ops.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let docs = self.bucket(bucket)?;
        let entry = docs.get(id).ok_or_else(|| Error::DocumentNotFound {
            bucket: bucket.to_string(),
            id: id.to_string(),
        })?;
        let doc = entry.value();

        let mut results = Vec::with_capacity(ops.len());
        for op in ops {
            let outcome = apply::lookup(&doc.content, op, &self.limits);
            results.push(OpResult {
                path: op.path.clone(),
                kind: op.kind,
                status: outcome.status,
                value: outcome.value,
            });
        }

        debug!(
            target: "subdoc::store",
            bucket,
            id,
            ops = ops.len(),
            cas = doc.cas,
            "Lookup batch executed"
        );

        Ok(MultiResult {
            id: id.to_string(),
            cas: doc.cas,
            results,
        })
    }

    fn mutate_batch(
        &self,
        bucket: &str,
        id: &str,
        ops: &[Operation],
        cas: Option<u64>,
    ) -> Result<MultiResult> {
        if ops.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let docs = self.bucket(bucket)?;
        let mut entry = docs.get_mut(id).ok_or_else(|| Error::DocumentNotFound {
            bucket: bucket.to_string(),
            id: id.to_string(),
        })?;
        let doc = entry.value_mut();

        if let Some(expected) = cas {
            if doc.cas != expected {
                return Err(Error::CasMismatch {
                    expected,
                    actual: doc.cas,
                });
            }
        }

        // Operations apply in order to a working copy; the stored document
        // only changes if the whole batch commits
        let mut working = doc.content.clone();
        let mut results = Vec::with_capacity(ops.len());
        let mut applied = 0usize;

        for op in ops {
            let outcome = apply::mutate(&mut working, op, &self.limits);
            if outcome.mutated {
                applied += 1;
            }
            results.push(OpResult {
                path: op.path.clone(),
                kind: op.kind,
                status: outcome.status,
                value: outcome.value,
            });
        }

        if applied > 0 {
            let size = encoded_size(&working)?;
            if size > self.limits.max_document_bytes {
                return Err(Error::DocumentTooLarge {
                    size,
                    max: self.limits.max_document_bytes,
                });
            }
            doc.content = working;
            doc.touch();
        }

        debug!(
            target: "subdoc::store",
            bucket,
            id,
            ops = ops.len(),
            applied,
            cas = doc.cas,
            "Mutation batch executed"
        );

        Ok(MultiResult {
            id: id.to_string(),
            cas: doc.cas,
            results,
        })
    }
}
