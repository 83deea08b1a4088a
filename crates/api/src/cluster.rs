//! Cluster facade and bucket handles
//!
//! [`Cluster::open`] provisions the embedded store with the configured
//! buckets; [`Cluster::bucket`] hands out named [`Bucket`] handles carrying
//! `Arc<dyn DocumentStore>`, so the API layer never depends on the concrete
//! store type. Handles stay bound to the cluster's lifecycle: after
//! [`Cluster::close`], every call through any handle fails with
//! [`Error::ClusterClosed`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use subdoc_core::{Document, DocumentStore, Error, Limits, Result, Value};
use subdoc_store::{MemoryStore, DEFAULT_BUCKET};
use tracing::info;

use crate::builder::{LookupInBuilder, MutateInBuilder};

/// Connection-time configuration
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Buckets to provision; `default` always exists, listed or not
    pub buckets: Vec<String>,
    /// Limits the store enforces
    pub limits: Limits,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            buckets: vec![DEFAULT_BUCKET.to_string()],
            limits: Limits::default(),
        }
    }
}

/// Handle to an open embedded cluster
///
/// Cheap to clone; clones share the store and the closed flag.
#[derive(Clone)]
pub struct Cluster {
    store: Arc<MemoryStore>,
    closed: Arc<AtomicBool>,
}

impl Cluster {
    /// Open a cluster provisioned per `config`
    pub fn open(config: ClusterConfig) -> Result<Cluster> {
        let store = MemoryStore::with_buckets(config.buckets.iter().cloned(), config.limits);
        info!(
            target: "subdoc::cluster",
            buckets = config.buckets.len(),
            "Cluster opened"
        );
        Ok(Cluster {
            store: Arc::new(store),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get a handle to a provisioned bucket
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClusterClosed`] after close, or
    /// [`Error::BucketNotFound`] for a name the configuration never listed.
    pub fn bucket(&self, name: &str) -> Result<Bucket> {
        if self.is_closed() {
            return Err(Error::ClusterClosed);
        }
        if !self.store.has_bucket(name) {
            return Err(Error::BucketNotFound(name.to_string()));
        }
        Ok(Bucket {
            name: name.to_string(),
            store: self.store.clone(),
            closed: self.closed.clone(),
        })
    }

    /// Close the cluster
    ///
    /// Idempotent. Buckets and builders obtained earlier fail their next
    /// call with [`Error::ClusterClosed`]; data stays in memory until the
    /// store is dropped.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!(target: "subdoc::cluster", "Cluster closed");
        }
    }

    /// Check whether close has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Named bucket handle
///
/// Carries the store as a trait object plus the owning cluster's closed
/// flag. Full-document operations live here; path-level batches start at
/// [`lookup_in`](Self::lookup_in) and [`mutate_in`](Self::mutate_in).
#[derive(Clone)]
pub struct Bucket {
    name: String,
    store: Arc<dyn DocumentStore>,
    closed: Arc<AtomicBool>,
}

// Manual impl: `dyn DocumentStore` carries no `Debug` bound
impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Bucket {
    /// This bucket's name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(Error::ClusterClosed)
        } else {
            Ok(())
        }
    }

    /// Create or replace a whole document, returning the new cas
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is closed or the document would
    /// exceed the size limit.
    pub fn upsert(&self, id: &str, content: impl Into<Value>) -> Result<u64> {
        self.ensure_open()?;
        self.store.upsert(&self.name, id, content.into())
    }

    /// Fetch a whole document
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is closed.
    pub fn get(&self, id: &str) -> Result<Option<Document>> {
        self.ensure_open()?;
        self.store.get(&self.name, id)
    }

    /// Check whether a document exists
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is closed.
    pub fn exists(&self, id: &str) -> Result<bool> {
        self.ensure_open()?;
        self.store.exists(&self.name, id)
    }

    /// Remove a whole document, returning true if it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is closed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        self.ensure_open()?;
        self.store.remove(&self.name, id)
    }

    /// Start a lookup batch against one document
    pub fn lookup_in(&self, id: &str) -> LookupInBuilder {
        LookupInBuilder::new(
            self.name.clone(),
            id.to_string(),
            self.store.clone(),
            self.closed.clone(),
        )
    }

    /// Start a mutation batch against one document
    pub fn mutate_in(&self, id: &str) -> MutateInBuilder {
        MutateInBuilder::new(
            self.name.clone(),
            id.to_string(),
            self.store.clone(),
            self.closed.clone(),
        )
    }
}
