//! Lookup operations through the fluent builder
//!
//! Covers Get and Exists: chained accumulation, content retrieval, and the
//! per-path statuses a lookup can produce.

use crate::*;
use subdoc::{BatchStatus, OpStatus};

// =============================================================================
// Chained Lookups
// =============================================================================

/// A chained lookup reads several paths in one execute
#[test]
fn test_lookup_chaining() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .get("type")
        .get("name")
        .get("owner")
        .exists("notfound")
        .execute()
        .unwrap();

    assert_eq!(fragment.op_status("type").unwrap(), OpStatus::Success);
    assert_eq!(fragment.content("type").unwrap(), &Value::from("dog"));
    assert_eq!(fragment.content("name").unwrap(), &Value::from("Puppy"));

    let owner = fragment.content("owner").unwrap().as_object().unwrap();
    assert_eq!(owner.get("name"), Some(&Value::from("Don Knotts")));
    assert_eq!(owner.get("age"), Some(&Value::Int(63)));

    // The absent path degrades its own status, not the call
    assert_eq!(fragment.op_status("notfound").unwrap(), OpStatus::PathNotFound);
    assert_eq!(fragment.status(), BatchStatus::MultiPathFailure);
}

/// One Get on a single path, content read back directly
#[test]
fn test_get_single_path() {
    let bucket = bucket_with_puppy();

    let fragment = bucket.lookup_in(PUPPY_ID).get("owner").execute().unwrap();

    let owner = fragment.content("owner").unwrap();
    assert_eq!(
        owner.as_object().unwrap().get("type"),
        Some(&Value::from("servant"))
    );
}

/// Nested keys and array indices resolve through one path string
#[test]
fn test_get_nested_and_indexed_paths() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .get("owner.name")
        .get("toys[0]")
        .get("toys[2]")
        .get("attributes.eyeColor")
        .get("counts[0]")
        .execute()
        .unwrap();

    assert_eq!(fragment.status(), BatchStatus::Success);
    assert_eq!(fragment.content("owner.name").unwrap(), &Value::from("Don Knotts"));
    assert_eq!(fragment.content("toys[0]").unwrap(), &Value::from("squeaker"));
    assert_eq!(fragment.content("toys[2]").unwrap(), &Value::from("shoe"));
    assert_eq!(
        fragment.content("attributes.eyeColor").unwrap(),
        &Value::from("brown")
    );
    assert_eq!(fragment.content("counts[0]").unwrap(), &Value::Int(1));
}

/// The empty path reads the whole document
#[test]
fn test_get_root_returns_whole_document() {
    let bucket = bucket_with_puppy();

    let fragment = bucket.lookup_in(PUPPY_ID).get("").execute().unwrap();

    assert_eq!(fragment.content("").unwrap(), &puppy());
}

// =============================================================================
// Exists
// =============================================================================

/// Exists answers true for present paths
#[test]
fn test_exists_present_path() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .exists("breed")
        .exists("owner.age")
        .exists("toys[1]")
        .execute()
        .unwrap();

    assert_eq!(fragment.status(), BatchStatus::Success);
    assert_eq!(fragment.content("breed").unwrap(), &Value::Bool(true));
    assert_eq!(fragment.content("owner.age").unwrap(), &Value::Bool(true));
    assert_eq!(fragment.content("toys[1]").unwrap(), &Value::Bool(true));
}

/// Exists on an absent path still carries its boolean answer
#[test]
fn test_exists_absent_path_carries_false() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .exists("microchip")
        .execute()
        .unwrap();

    assert_eq!(fragment.op_status("microchip").unwrap(), OpStatus::PathNotFound);
    // Content is readable despite the failure status
    assert_eq!(fragment.content("microchip").unwrap(), &Value::Bool(false));
}

/// Exists does not distinguish a scalar in the way from a missing key
#[test]
fn test_exists_through_scalar_is_false() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .exists("name.first")
        .execute()
        .unwrap();

    assert_eq!(fragment.op_status("name.first").unwrap(), OpStatus::PathNotFound);
    assert_eq!(fragment.content("name.first").unwrap(), &Value::Bool(false));
}

// =============================================================================
// Per-Path Failures
// =============================================================================

/// Batch and per-path statuses are reported on separate tiers
#[test]
fn test_error_surface_generic_and_specific() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .get("type")
        .get("somepaththatdoesntexist")
        .get("owner")
        .execute()
        .unwrap();

    // Generic tier: at least one path failed
    assert_eq!(fragment.status(), BatchStatus::MultiPathFailure);
    // Specific tier, by position and by path
    assert_eq!(fragment.op_status_at(1), Some(OpStatus::PathNotFound));
    assert_eq!(
        fragment.op_status("somepaththatdoesntexist").unwrap(),
        OpStatus::PathNotFound
    );
    // Sibling operations are unaffected
    assert_eq!(fragment.content("type").unwrap(), &Value::from("dog"));
    assert!(fragment.content("owner").is_ok());
}

/// Traversing through a scalar is a mismatch, not a missing path
#[test]
fn test_get_through_scalar_is_path_mismatch() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .get("name.first")
        .get("toys.first")
        .execute()
        .unwrap();

    assert_eq!(fragment.op_status("name.first").unwrap(), OpStatus::PathMismatch);
    assert_eq!(fragment.op_status("toys.first").unwrap(), OpStatus::PathMismatch);
}

/// An index past the end of an array is a missing path
#[test]
fn test_get_index_past_end() {
    let bucket = bucket_with_puppy();

    let fragment = bucket.lookup_in(PUPPY_ID).get("toys[99]").execute().unwrap();

    assert_eq!(fragment.op_status("toys[99]").unwrap(), OpStatus::PathNotFound);
}

/// A path that does not parse is reported per-path, not at append time
#[test]
fn test_unparseable_path_is_path_invalid() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .get("toys[not-a-number]")
        .get("owner..name")
        .execute()
        .unwrap();

    assert_eq!(
        fragment.op_status("toys[not-a-number]").unwrap(),
        OpStatus::PathInvalid
    );
    assert_eq!(fragment.op_status("owner..name").unwrap(), OpStatus::PathInvalid);
}

// =============================================================================
// Read-Only Guarantee
// =============================================================================

/// Lookups never move the document or its cas
#[test]
fn test_lookup_leaves_document_untouched() {
    let bucket = bucket_with_puppy();

    for _ in 0..3 {
        let fragment = bucket
            .lookup_in(PUPPY_ID)
            .get("name")
            .get("nope")
            .execute()
            .unwrap();
        assert_eq!(fragment.cas(), 1);
    }

    let doc = bucket.get(PUPPY_ID).unwrap().unwrap();
    assert_eq!(doc.cas, 1);
    assert_eq!(doc.content, puppy());
}
