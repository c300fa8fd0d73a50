//! Materialized record trees.
//!
//! A record assembled from remote documents is a tree where some subtrees
//! live behind pointer-addressed documents. A [`Pointer`] is a tagged union:
//! either the document has been fetched ([`Pointer::Resolved`]) or only its
//! address is known ([`Pointer::Unresolved`]). Consumers unwrap pointers
//! explicitly instead of sniffing for wrapper-shaped objects.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque address of a remote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pointer-addressed document slot in a record tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Pointer {
    /// The document was not requested; only its address is known.
    Unresolved { reference: DocumentRef },
    /// The document has been fetched.
    Resolved { reference: DocumentRef, contents: Tree },
}

impl Pointer {
    pub fn unresolved(reference: impl Into<String>) -> Self {
        Self::Unresolved {
            reference: DocumentRef::new(reference),
        }
    }

    pub fn resolved(reference: impl Into<String>, contents: Tree) -> Self {
        Self::Resolved {
            reference: DocumentRef::new(reference),
            contents,
        }
    }

    /// The document address, resolved or not.
    pub fn document_ref(&self) -> &DocumentRef {
        match self {
            Self::Unresolved { reference } | Self::Resolved { reference, .. } => reference,
        }
    }

    /// Materialized contents, if the document has been fetched.
    pub fn contents(&self) -> Option<&Tree> {
        match self {
            Self::Unresolved { .. } => None,
            Self::Resolved { contents, .. } => Some(contents),
        }
    }
}

/// A materialized record tree.
///
/// Objects and arrays are represented structurally so that pointers can be
/// nested at any depth; [`Tree::Leaf`] holds scalar JSON values.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Leaf(Value),
    Object(BTreeMap<String, Tree>),
    Array(Vec<Tree>),
    Pointer(Box<Pointer>),
}

impl Tree {
    /// Build an object node from key/subtree pairs.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Tree)>) -> Self {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap a pointer as a tree node.
    pub fn pointer(pointer: Pointer) -> Self {
        Self::Pointer(Box::new(pointer))
    }

    /// Direct key lookup on an object node. Pointers are opaque here;
    /// callers unwrap them before descending.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Render the tree as plain JSON. Resolved pointers render as their
    /// contents; unresolved pointers render as their address string.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(value) => value.clone(),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            Self::Array(items) => Value::Array(items.iter().map(Tree::to_value).collect()),
            Self::Pointer(pointer) => match pointer.contents() {
                Some(contents) => contents.to_value(),
                None => Value::String(pointer.document_ref().to_string()),
            },
        }
    }
}

impl From<Value> for Tree {
    /// Lift plain JSON into a tree. The result contains no pointers.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            other => Self::Leaf(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_only_reads_objects() {
        let tree = Tree::object([("name", Tree::Leaf(json!("Grand Hotel")))]);
        assert_eq!(tree.get("name"), Some(&Tree::Leaf(json!("Grand Hotel"))));
        assert_eq!(tree.get("missing"), None);
        assert_eq!(Tree::Leaf(json!(42)).get("name"), None);
    }

    #[test]
    fn resolved_pointer_renders_contents() {
        let tree = Tree::pointer(Pointer::resolved(
            "json://desc",
            Tree::object([("name", Tree::Leaf(json!("Grand Hotel")))]),
        ));
        assert_eq!(tree.to_value(), json!({"name": "Grand Hotel"}));
    }

    #[test]
    fn unresolved_pointer_renders_address() {
        let tree = Tree::pointer(Pointer::unresolved("json://desc"));
        assert_eq!(tree.to_value(), json!("json://desc"));
    }

    #[test]
    fn value_roundtrip_on_pointer_free_trees() {
        let value = json!({
            "name": "Grand Hotel",
            "roomTypes": [{"name": "single"}, {"name": "double"}],
            "stars": 4,
        });
        assert_eq!(Tree::from(value.clone()).to_value(), value);
    }
}
