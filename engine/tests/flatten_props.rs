//! Property tests for the tree flattener.

use proptest::collection::{btree_map, vec as prop_vec};
use proptest::prelude::*;
use serde_json::Value;
use waypost_engine::{flatten, Tree};

fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("location".to_string()),
        Just("currency".to_string()),
        Just("timezone".to_string()),
        Just("contacts".to_string()),
        Just("unknownField".to_string()),
    ]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::from(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

/// Objects up to two levels deep, scalar leaves, no arrays.
fn nested_object() -> impl Strategy<Value = Value> {
    let inner = btree_map(field_name(), scalar(), 0..4)
        .prop_map(|map| Value::Object(map.into_iter().collect()));
    btree_map(field_name(), prop_oneof![scalar(), inner], 0..5)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

fn paths() -> impl Strategy<Value = Vec<String>> {
    prop_vec(
        (field_name(), proptest::option::of(field_name())).prop_map(|(first, rest)| match rest {
            Some(rest) => format!("{first}.{rest}"),
            None => first,
        }),
        0..6,
    )
}

proptest! {
    /// Flattening an already-flattened result with the same paths is a
    /// no-op.
    #[test]
    fn flatten_is_idempotent(contents in nested_object(), fields in paths()) {
        let tree = Tree::from(contents);
        let once = flatten(&tree, &fields);
        let twice = flatten(&Tree::from(once.clone()), &fields);
        prop_assert_eq!(once, twice);
    }

    /// For a flat record and plain (undotted) paths, the projection holds
    /// exactly the requested keys that existed, with unchanged values.
    #[test]
    fn projection_is_an_exact_subset(
        contents in btree_map(field_name(), scalar(), 0..6),
        fields in prop_vec(field_name(), 0..6),
    ) {
        let record = Value::Object(contents.clone().into_iter().collect());
        let result = flatten(&Tree::from(record), &fields);

        let result = result.as_object().unwrap();
        for (key, value) in result {
            prop_assert!(fields.contains(key));
            prop_assert_eq!(Some(value), contents.get(key));
        }
        for field in &fields {
            prop_assert_eq!(result.contains_key(field), contents.contains_key(field));
        }
    }
}
