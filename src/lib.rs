//! Subdoc - Embedded JSON document store with a path-addressed sub-document API
//!
//! Subdoc stores JSON documents in named buckets and lets callers read and
//! mutate fragments of a document by path instead of shipping the whole
//! document back and forth. Lookups and mutations are batched through fluent
//! builders and applied in one atomic, versioned call.
//!
//! # Quick Start
//!
//! ```ignore
//! use subdoc::{Cluster, ClusterConfig};
//!
//! let cluster = Cluster::open(ClusterConfig::default())?;
//! let bucket = cluster.bucket("default")?;
//!
//! bucket.upsert("user:123", serde_json::json!({ "name": "Alice", "logins": 0 }))?;
//!
//! // Read two fragments in one call
//! let fragment = bucket
//!     .lookup_in("user:123")
//!     .get("name")
//!     .exists("email")
//!     .execute()?;
//!
//! // Mutate two paths under one version bump
//! bucket
//!     .mutate_in("user:123")
//!     .counter("logins", 1)
//!     .insert("email", "alice@example.com", false)
//!     .execute()?;
//! ```
//!
//! # Architecture
//!
//! All operations go through a [`Bucket`] handle, whose builders submit
//! batches to the document store. The store applies each batch under one
//! entry lock, so a batch is never observed half-applied.
//!
//! Internal implementation details (the store engine, path evaluation) are
//! not exposed - only the API layer is public.

// Re-export the public API from subdoc-api
pub use subdoc_api::*;
