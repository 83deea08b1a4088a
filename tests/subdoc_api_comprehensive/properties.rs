//! Randomized batch properties
//!
//! Generated values and deltas pushed through the full stack. Each case
//! opens a fresh cluster, so cases are independent.

use crate::*;
use proptest::prelude::*;
use subdoc::OpStatus;

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z0-9]{0,8}".prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..4).prop_map(Value::Object),
        ]
    })
}

proptest! {
    /// Counter batches accumulate like plain integer addition
    #[test]
    fn counter_accumulates_any_deltas(deltas in prop::collection::vec(-1000i64..=1000, 1..20)) {
        let bucket = open_bucket();
        bucket.upsert("doc", serde_json::json!({ "n": 0 })).unwrap();

        for delta in &deltas {
            let fragment = bucket
                .mutate_in("doc")
                .counter("n", *delta)
                .execute()
                .unwrap();
            prop_assert_eq!(fragment.op_status("n").unwrap(), OpStatus::Success);
        }

        let sum: i64 = deltas.iter().sum();
        let fragment = bucket.lookup_in("doc").get("n").execute().unwrap();
        prop_assert_eq!(fragment.content("n").unwrap(), &Value::Int(sum));
        prop_assert_eq!(fragment.cas(), 1 + deltas.len() as u64);
    }

    /// Whatever shape goes in at a path comes back unchanged
    #[test]
    fn insert_then_get_roundtrip(value in arb_value()) {
        let bucket = open_bucket();
        bucket.upsert("doc", serde_json::json!({})).unwrap();

        let fragment = bucket
            .mutate_in("doc")
            .insert("field", value.clone(), false)
            .execute()
            .unwrap();
        prop_assert_eq!(fragment.op_status("field").unwrap(), OpStatus::Success);

        let fragment = bucket.lookup_in("doc").get("field").execute().unwrap();
        prop_assert_eq!(fragment.content("field").unwrap(), &value);
    }

    /// Adding the same element twice grows the set exactly once
    #[test]
    fn add_unique_appends_exactly_once(value in arb_scalar()) {
        let bucket = open_bucket();
        bucket.upsert("doc", serde_json::json!({ "tags": [] })).unwrap();

        let fragment = bucket
            .mutate_in("doc")
            .array_add_unique("tags", value.clone())
            .execute()
            .unwrap();
        prop_assert_eq!(fragment.op_status("tags").unwrap(), OpStatus::Success);

        let fragment = bucket
            .mutate_in("doc")
            .array_add_unique("tags", value.clone())
            .execute()
            .unwrap();
        prop_assert_eq!(fragment.op_status("tags").unwrap(), OpStatus::PathExists);

        let fragment = bucket.lookup_in("doc").get("tags").execute().unwrap();
        let tags = fragment.content("tags").unwrap().as_array().unwrap();
        prop_assert_eq!(tags, &vec![value]);
    }

    /// Appends land in submission order
    #[test]
    fn append_preserves_submission_order(values in prop::collection::vec(arb_scalar(), 1..8)) {
        let bucket = open_bucket();
        bucket.upsert("doc", serde_json::json!({ "items": [] })).unwrap();

        let mut batch = bucket.mutate_in("doc");
        for value in &values {
            batch = batch.array_append("items", value.clone(), false);
        }
        batch.execute().unwrap();

        let fragment = bucket.lookup_in("doc").get("items").execute().unwrap();
        prop_assert_eq!(fragment.content("items").unwrap(), &Value::Array(values));
    }

    /// Removing an inserted member restores the original document
    #[test]
    fn insert_remove_restores_document(value in arb_value()) {
        let bucket = bucket_with_puppy();

        let fragment = bucket
            .mutate_in(PUPPY_ID)
            .insert("scratch", value, false)
            .execute()
            .unwrap();
        prop_assert_eq!(fragment.op_status("scratch").unwrap(), OpStatus::Success);

        let fragment = bucket
            .mutate_in(PUPPY_ID)
            .remove("scratch")
            .execute()
            .unwrap();
        prop_assert_eq!(fragment.op_status("scratch").unwrap(), OpStatus::Success);

        let doc = bucket.get(PUPPY_ID).unwrap().unwrap();
        prop_assert_eq!(doc.content, puppy());
    }
}
