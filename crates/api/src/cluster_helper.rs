//! Process-wide cluster slot
//!
//! Mirrors the connect-once pattern of applications that keep a single
//! shared cluster handle: [`initialize`] opens it, [`get_bucket`] hands out
//! bucket handles from anywhere in the process, [`close`] tears it down.
//!
//! Uses `parking_lot::RwLock` instead of `std::sync::RwLock` to avoid
//! cascading panics from lock poisoning.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use subdoc_core::{Error, Result};

use crate::cluster::{Bucket, Cluster, ClusterConfig};

/// The process-wide cluster (empty until `initialize`)
static CLUSTER: Lazy<RwLock<Option<Cluster>>> = Lazy::new(|| RwLock::new(None));

/// Open the shared cluster with the given configuration
///
/// A cluster already in the slot is closed and replaced.
///
/// # Errors
///
/// Propagates any error from [`Cluster::open`].
pub fn initialize(config: ClusterConfig) -> Result<()> {
    let cluster = Cluster::open(config)?;
    let mut slot = CLUSTER.write();
    if let Some(previous) = slot.take() {
        previous.close();
    }
    *slot = Some(cluster);
    Ok(())
}

/// Get a bucket handle from the shared cluster
///
/// # Errors
///
/// Returns [`Error::ClusterClosed`] when the slot is empty (never
/// initialized, or closed), or [`Error::BucketNotFound`] for an
/// unprovisioned name.
pub fn get_bucket(name: &str) -> Result<Bucket> {
    let slot = CLUSTER.read();
    match slot.as_ref() {
        Some(cluster) => cluster.bucket(name),
        None => Err(Error::ClusterClosed),
    }
}

/// Close and drop the shared cluster
///
/// Idempotent; a later [`initialize`] starts fresh.
pub fn close() {
    let mut slot = CLUSTER.write();
    if let Some(cluster) = slot.take() {
        cluster.close();
    }
}
