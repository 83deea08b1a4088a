//! Batch contract: ordering, versioning, and the two error tiers
//!
//! A batch either fails as a whole (document-level problems surface as
//! `Err` from `execute`) or returns one result per operation in
//! submission order, where individual paths may still have failed.

use crate::*;
use subdoc::{BatchStatus, Error, OpStatus};

// =============================================================================
// Ordering and per-path isolation
// =============================================================================

/// Results come back in submission order, one per operation
#[test]
fn test_results_follow_submission_order() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .insert("a", 1, false)
        .remove("microchip")
        .counter("b", 5)
        .execute()
        .unwrap();

    assert_eq!(fragment.count(), 3);
    let paths: Vec<&str> = fragment.into_iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["a", "microchip", "b"]);
}

/// A failing path does not abort its siblings
#[test]
fn test_failed_path_leaves_siblings_applied() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .insert("first", 1, false)
        .remove("microchip")
        .insert("second", 2, false)
        .execute()
        .unwrap();

    assert_eq!(fragment.status(), BatchStatus::MultiPathFailure);
    assert_eq!(fragment.op_status("first").unwrap(), OpStatus::Success);
    assert_eq!(
        fragment.op_status("microchip").unwrap(),
        OpStatus::PathNotFound
    );
    assert_eq!(fragment.op_status("second").unwrap(), OpStatus::Success);

    let check = bucket
        .lookup_in(PUPPY_ID)
        .get("first")
        .get("second")
        .execute()
        .unwrap();
    assert_eq!(check.content("first").unwrap(), &Value::Int(1));
    assert_eq!(check.content("second").unwrap(), &Value::Int(2));
}

/// Later operations in a batch see the effects of earlier ones
#[test]
fn test_later_ops_see_earlier_ops() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .insert("nicknames", serde_json::json!([]), false)
        .array_append("nicknames", "Fi", false)
        .array_append("nicknames", "Pup", false)
        .execute()
        .unwrap();

    assert_eq!(fragment.status(), BatchStatus::Success);

    let check = bucket.lookup_in(PUPPY_ID).get("nicknames").execute().unwrap();
    let nicknames = check.content("nicknames").unwrap().as_array().unwrap();
    assert_eq!(nicknames, &[Value::from("Fi"), Value::from("Pup")]);
}

/// The same path may appear more than once; each occurrence gets a result
#[test]
fn test_duplicate_paths_each_get_a_result() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .counter("likes", 1)
        .counter("likes", 1)
        .counter("likes", 1)
        .execute()
        .unwrap();

    assert_eq!(fragment.count(), 3);
    // Positional access sees every step
    assert_eq!(fragment.content_at(0), Some(&Value::Int(1)));
    assert_eq!(fragment.content_at(1), Some(&Value::Int(2)));
    assert_eq!(fragment.content_at(2), Some(&Value::Int(3)));
    // Path access resolves to the last occurrence
    assert_eq!(fragment.content("likes").unwrap(), &Value::Int(3));
}

// =============================================================================
// Versioning
// =============================================================================

/// One batch bumps the version once, however many paths it touches
#[test]
fn test_batch_bumps_cas_once() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .insert("a", 1, false)
        .insert("b", 2, false)
        .counter("c", 3)
        .execute()
        .unwrap();

    assert_eq!(fragment.cas(), 2);
    assert_eq!(bucket.get(PUPPY_ID).unwrap().unwrap().cas, 2);
}

/// A batch where nothing applied leaves the version alone
#[test]
fn test_all_failed_batch_keeps_cas() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .remove("microchip")
        .replace("collar", "red")
        .execute()
        .unwrap();

    assert_eq!(fragment.status(), BatchStatus::MultiPathFailure);
    assert_eq!(fragment.cas(), 1);
    assert_eq!(bucket.get(PUPPY_ID).unwrap().unwrap().cas, 1);
}

/// Lookups never move the version
#[test]
fn test_lookup_batch_keeps_cas() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .lookup_in(PUPPY_ID)
        .get("name")
        .exists("microchip")
        .execute()
        .unwrap();

    assert_eq!(fragment.cas(), 1);
}

/// A stale cas precondition fails the whole batch; retrying with the
/// current version succeeds
#[test]
fn test_cas_conflict_and_retry() {
    let bucket = bucket_with_puppy();

    // Another writer moves the document to cas 2
    bucket
        .mutate_in(PUPPY_ID)
        .counter("likes", 1)
        .execute()
        .unwrap();

    let err = bucket
        .mutate_in(PUPPY_ID)
        .cas(1)
        .counter("likes", 1)
        .execute()
        .unwrap_err();
    assert_eq!(
        err,
        Error::CasMismatch {
            expected: 1,
            actual: 2,
        }
    );

    // The failed attempt wrote nothing
    let check = bucket.lookup_in(PUPPY_ID).get("likes").execute().unwrap();
    assert_eq!(check.content("likes").unwrap(), &Value::Int(1));

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .cas(2)
        .counter("likes", 1)
        .execute()
        .unwrap();
    assert_eq!(fragment.content("likes").unwrap(), &Value::Int(2));
    assert_eq!(fragment.cas(), 3);
}

// =============================================================================
// Whole-batch failures
// =============================================================================

/// Executing an empty batch is a caller error, not an empty fragment
#[test]
fn test_empty_batches_are_rejected() {
    let bucket = bucket_with_puppy();

    let err = bucket.lookup_in(PUPPY_ID).execute().unwrap_err();
    assert_eq!(err, Error::EmptyBatch);

    let err = bucket.mutate_in(PUPPY_ID).execute().unwrap_err();
    assert_eq!(err, Error::EmptyBatch);
}

/// A missing document fails the batch before any path is considered
#[test]
fn test_missing_document_fails_whole_batch() {
    let bucket = open_bucket();

    let err = bucket
        .lookup_in("no_such_pet")
        .get("name")
        .execute()
        .unwrap_err();
    assert_eq!(
        err,
        Error::DocumentNotFound {
            bucket: "default".to_string(),
            id: "no_such_pet".to_string(),
        }
    );

    let err = bucket
        .mutate_in("no_such_pet")
        .insert("name", "Ghost", false)
        .execute()
        .unwrap_err();
    assert_eq!(
        err,
        Error::DocumentNotFound {
            bucket: "default".to_string(),
            id: "no_such_pet".to_string(),
        }
    );
}

/// Mixed outcomes still count as one fragment with per-path statuses
#[test]
fn test_mixed_batch_reports_both_tiers() {
    let bucket = bucket_with_puppy();

    let fragment = bucket
        .mutate_in(PUPPY_ID)
        .array_append("toys", "slipper", false)
        .array_add_unique("toys", "shoe")
        .counter("likes", 1)
        .execute()
        .unwrap();

    // The batch as a whole succeeded with a per-path failure inside
    assert_eq!(fragment.status(), BatchStatus::MultiPathFailure);
    assert_eq!(fragment.op_status_at(0), Some(OpStatus::Success));
    assert_eq!(fragment.op_status_at(1), Some(OpStatus::PathExists));
    assert_eq!(fragment.op_status_at(2), Some(OpStatus::Success));
    // Applied operations committed once, under a single new version
    assert_eq!(fragment.cas(), 2);
}
