//! Tree flattening: projecting a materialized record tree onto a set of
//! dotted field paths.
//!
//! The flattener descends one level per call. Paths are grouped by their
//! leading segment; a group with no remaining sub-path is copied verbatim
//! (unwrapping resolved pointers), a group with sub-paths recurses. When a
//! requested field is absent as a direct key but the current subtree is a
//! collection, the request projects the field across every element.

use crate::{FieldPath, Tree};
use serde_json::{Map, Value};

/// Extract exactly the requested paths from `contents`.
///
/// Missing fields are silently omitted. The result is plain JSON: no
/// pointer wrappers survive flattening, which makes the operation
/// idempotent for a fixed path set.
pub fn flatten(contents: &Tree, paths: &[FieldPath]) -> Value {
    let mut groups: Vec<(String, Option<Vec<String>>)> = Vec::new();
    for path in paths {
        match path.split_once('.') {
            Some((first, rest)) => match groups.iter_mut().find(|(name, _)| name == first) {
                Some((_, Some(subs))) => subs.push(rest.to_string()),
                Some(entry) => entry.1 = Some(vec![rest.to_string()]),
                None => groups.push((first.to_string(), Some(vec![rest.to_string()]))),
            },
            None => match groups.iter_mut().find(|(name, _)| name == path.as_str()) {
                Some(entry) => entry.1 = None,
                None => groups.push((path.clone(), None)),
            },
        }
    }

    let mut result = Value::Object(Map::new());
    for (field, sub) in &groups {
        if let Some(node) = contents.get(field) {
            let value = match sub {
                // Copy materialized content, never the pointer wrapper.
                None => node.to_value(),
                Some(subpaths) => flatten(search_space(node), subpaths),
            };
            if let Value::Object(map) = &mut result {
                map.insert(field.clone(), value);
            }
        } else {
            project_across(contents, field, &mut result);
        }
    }
    result
}

/// Unwrap a resolved pointer before descending; any other node is its own
/// search space.
fn search_space(node: &Tree) -> &Tree {
    match node {
        Tree::Pointer(pointer) => pointer.contents().unwrap_or(node),
        _ => node,
    }
}

/// Collection rule: the field is not a direct key, so project it across
/// every element of an array or mapping collection.
fn project_across(contents: &Tree, field: &str, result: &mut Value) {
    match contents {
        Tree::Array(elems) => match result {
            // Merge into the parallel array built by an earlier field.
            Value::Array(rows) if rows.len() == elems.len() => {
                for (row, elem) in rows.iter_mut().zip(elems) {
                    if let (Value::Object(row), Some(value)) = (row, elem.get(field)) {
                        row.insert(field.to_string(), value.to_value());
                    }
                }
            }
            Value::Object(map) if map.is_empty() => {
                *result = Value::Array(
                    elems
                        .iter()
                        .map(|elem| {
                            let mut row = Map::new();
                            if let Some(value) = elem.get(field) {
                                row.insert(field.to_string(), value.to_value());
                            }
                            Value::Object(row)
                        })
                        .collect(),
                );
            }
            _ => {}
        },
        Tree::Object(map) => {
            let Value::Object(out) = result else {
                return;
            };
            for (key, elem) in map {
                if let Some(value) = elem.get(field) {
                    let entry = out
                        .entry(key.clone())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(inner) = entry {
                        inner.insert(field.to_string(), value.to_value());
                    }
                }
            }
        }
        _ => {}
    }
}
