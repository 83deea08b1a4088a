//! Sub-document API comprehensive test suite
//!
//! End-to-end coverage of the public surface: cluster and bucket lifecycle,
//! fluent batch builders, per-path statuses on the result fragment, and the
//! store's batch commit rules.
//!
//! ## Modules
//!
//! - `lookup_ops`: Get and Exists through the lookup builder
//! - `mutate_ops`: the eight mutation kinds through the mutation builder
//! - `batches`: ordering, commit and cas rules, the two error tiers
//! - `fragment_access`: the fragment accessor contract
//! - `limits_and_errors`: size, depth and path limits at the boundary
//! - `concurrency`: batches racing on shared and distinct documents
//! - `properties`: generated round-trip and idempotence checks
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test subdoc_api_comprehensive
//!
//! # Run one module
//! cargo test --test subdoc_api_comprehensive lookup_ops::
//!
//! # Run with output
//! cargo test --test subdoc_api_comprehensive -- --nocapture
//! ```

use subdoc::{Bucket, Cluster, ClusterConfig, Value};

/// Id of the well-known test document
pub const PUPPY_ID: &str = "puppy";

/// The well-known test document
///
/// A dog-adoption record exercising every shape the path language can
/// address: nested objects, arrays of scalars, booleans and integers.
pub fn puppy() -> Value {
    serde_json::json!({
        "type": "dog",
        "breed": "Pitbull/Chihuahua",
        "name": "Puppy",
        "toys": ["squeaker", "ball", "shoe"],
        "owner": {
            "type": "servant",
            "name": "Don Knotts",
            "age": 63
        },
        "attributes": {
            "fleas": true,
            "color": "white",
            "eyeColor": "brown",
            "age": 5,
            "dirty": true,
            "sex": "female"
        },
        "counts": [1]
    })
    .into()
}

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Open a fresh cluster and return its default bucket
pub fn open_bucket() -> Bucket {
    let cluster = Cluster::open(ClusterConfig::default()).expect("Failed to open cluster");
    cluster.bucket("default").expect("Failed to get default bucket")
}

/// Default bucket pre-loaded with the puppy document
pub fn bucket_with_puppy() -> Bucket {
    let bucket = open_bucket();
    bucket
        .upsert(PUPPY_ID, puppy())
        .expect("Failed to load test document");
    bucket
}

// Test modules by area
pub mod batches;
pub mod lookup_ops;
pub mod properties;
