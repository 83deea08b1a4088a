//! Public API layer for the sub-document engine
//!
//! This crate provides the caller-facing surface:
//! - **Cluster facade**: open a cluster, get bucket handles, close
//! - **Fluent builders**: accumulate path operations, execute as one batch
//! - **DocumentFragment**: per-path statuses and content of the result
//!
//! ## One call per batch
//!
//! Every `execute` desugars to exactly one store call (`lookup_batch` or
//! `mutate_batch`). No hidden round trips, no per-operation calls.
//!
//! ## Two error tiers
//!
//! Batch-level failures (missing document, unknown bucket, closed cluster,
//! cas conflict, size limit) come back as `Err`. Per-path failures come
//! back *inside* the fragment as statuses, so one bad path never aborts its
//! siblings. Check both before trusting content.
//!
//! ## Quick start
//!
//! ```
//! use subdoc_api::{Cluster, ClusterConfig};
//!
//! let cluster = Cluster::open(ClusterConfig::default())?;
//! let bucket = cluster.bucket("default")?;
//!
//! bucket.upsert("pet_1", serde_json::json!({
//!     "name": "Fido",
//!     "toys": ["squeaker", "ball"]
//! }))?;
//!
//! let frag = bucket
//!     .lookup_in("pet_1")
//!     .get("name")
//!     .exists("microchip")
//!     .execute()?;
//! assert_eq!(frag.content_as::<String>("name")?, "Fido");
//!
//! let frag = bucket
//!     .mutate_in("pet_1")
//!     .array_append("toys", "bone", false)
//!     .counter("visits", 1)
//!     .execute()?;
//! assert_eq!(frag.cas(), 2);
//! # Ok::<(), subdoc_api::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod cluster;
pub mod cluster_helper;
pub mod fragment;

pub use builder::{LookupInBuilder, MutateInBuilder};
pub use cluster::{Bucket, Cluster, ClusterConfig};
pub use fragment::DocumentFragment;

// Core vocabulary, re-exported so callers need only this crate
pub use subdoc_core::{
    BatchStatus, Document, DocumentStore, Error, Limits, MultiResult, OpKind, OpResult, OpStatus,
    Operation, Path, PathParseError, Result, Segment, Value,
};

// Embedded store, for callers that want one without a cluster
pub use subdoc_store::{MemoryStore, DEFAULT_BUCKET};
