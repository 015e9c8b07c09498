// Copyright 2025 MLPerf Storage Reporting Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flattening of nested JSON for tabular output.
//!
//! Nested objects become dotted key paths (`parameters.reader.read_threads`).
//! Arrays are leaves and are kept whole. Keys come out sorted, so the same
//! input always flattens to the same record.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Separator placed between the segments of a flattened key.
pub const SEPARATOR: char = '.';

/// A single-level record of key path to leaf value.
pub type FlatRecord = BTreeMap<String, Value>;

/// Flatten a JSON value into a [`FlatRecord`].
///
/// A non-object root is stored under the key `value`. Empty nested objects
/// contribute no keys.
pub fn flatten(value: &Value) -> FlatRecord {
    let mut out = FlatRecord::new();
    match value {
        Value::Object(map) => flatten_map("", map, &mut out),
        other => {
            out.insert("value".to_string(), other.clone());
        }
    }
    out
}

fn flatten_map(prefix: &str, map: &Map<String, Value>, out: &mut FlatRecord) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{SEPARATOR}{key}")
        };
        match value {
            Value::Object(inner) => flatten_map(&path, inner, out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Drop every leaf holding the NaN sentinel.
///
/// Non-finite floats serialize to JSON `null`, so `null` leaves are what
/// remains of NaN metrics once a record has been converted to JSON.
pub fn remove_nan_values(record: FlatRecord) -> FlatRecord {
    record.into_iter().filter(|(_, v)| !v.is_null()).collect()
}

/// Rebuild the nested object a [`FlatRecord`] was produced from.
pub fn unflatten(record: &FlatRecord) -> Value {
    let mut root = Map::new();
    'paths: for (path, value) in record {
        let mut segments: Vec<&str> = path.split(SEPARATOR).collect();
        let Some(last) = segments.pop() else {
            continue;
        };
        let mut node = &mut root;
        for segment in segments {
            let entry = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry.as_object_mut() {
                Some(inner) => inner,
                None => continue 'paths,
            };
        }
        node.insert(last.to_string(), value.clone());
    }
    Value::Object(root)
}

/// Text written to a CSV cell for a leaf value.
///
/// Strings are written bare; arrays and objects as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_flatten_joins_nested_keys() {
        let flat = flatten(&json!({
            "run_id": "r1",
            "parameters": {"reader": {"read_threads": 8}, "workflow": {"train": true}},
            "metrics": {"throughput": [1.0, 2.0]},
        }));
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "metrics.throughput",
                "parameters.reader.read_threads",
                "parameters.workflow.train",
                "run_id"
            ]
        );
        assert_eq!(flat["metrics.throughput"], json!([1.0, 2.0]));
    }

    #[test]
    fn test_flatten_skips_empty_objects() {
        let flat = flatten(&json!({"a": {}, "b": 1}));
        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key("b"));
    }

    #[test]
    fn test_flatten_non_object_root() {
        let flat = flatten(&json!(5));
        assert_eq!(flat["value"], json!(5));
    }

    #[test]
    fn test_remove_nan_values_drops_null_leaves() {
        let flat = remove_nan_values(flatten(&json!({"a": null, "b": {"c": null, "d": 2}})));
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["b.d"], json!(2));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("h100")), "h100");
        assert_eq!(cell_text(&json!(91.5)), "91.5");
        assert_eq!(cell_text(&json!([1, 2])), "[1,2]");
        assert_eq!(cell_text(&json!(null)), "");
    }

    fn nested_object() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z0-9 ]{0,8}".prop_map(Value::String),
            any::<bool>().prop_map(Value::Bool),
            prop::collection::vec(any::<i32>(), 0..4).prop_map(|v| json!(v)),
        ];
        let tree = leaf.prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map("[a-z_]{1,6}", inner, 1..4)
                .prop_map(|m| Value::Object(m.into_iter().collect()))
        });
        prop::collection::btree_map("[a-z_]{1,6}", tree, 1..5)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    proptest! {
        #[test]
        fn prop_unflatten_restores_nested_objects(value in nested_object()) {
            let flat = flatten(&value);
            prop_assert_eq!(unflatten(&flat), value);
        }

        #[test]
        fn prop_flattened_keys_have_no_object_leaves(value in nested_object()) {
            let flat = flatten(&value);
            prop_assert!(flat.values().all(|v| !v.is_object()));
        }
    }
}
