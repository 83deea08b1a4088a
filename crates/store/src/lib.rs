//! Embedded document store for the sub-document API
//!
//! This crate implements the store side of the batch contract:
//! - MemoryStore: bucketed in-memory documents over sharded concurrent maps
//! - apply: per-operation path resolution and mutation semantics
//!
//! Lookups read under a shared entry guard; mutation batches hold the
//! document's entry lock for the whole batch, so a batch is atomic with
//! respect to concurrent batches on the same document.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod apply;
pub mod store;

pub use apply::OpOutcome;
pub use store::{MemoryStore, DEFAULT_BUCKET};

pub use subdoc_core::DocumentStore;
