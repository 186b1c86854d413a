//! Ordered key/value documents produced by exporting values.
//!
//! Mapping keys keep their insertion order, both in memory and when the
//! document is serialized through serde. Downstream readers rely on that
//! order, so exporters must insert keys in their documented sequence.

use indexmap::IndexMap;
use serde::Serialize;

/// A node of an exported document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Node>),
    Mapping(IndexMap<String, Node>),
}

impl Node {
    /// Creates a mapping node from key/value pairs, preserving their order.
    pub fn mapping(entries: impl IntoIterator<Item = (&'static str, Node)>) -> Self {
        Node::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    /// Returns the keys of a mapping node in order, or an empty list.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Node::Mapping(entries) => entries.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Looks up a key in a mapping node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.get(key),
            _ => None,
        }
    }
}

impl From<i32> for Node {
    fn from(v: i32) -> Self {
        Node::Int(v.into())
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Int(v)
    }
}

impl From<f32> for Node {
    fn from(v: f32) -> Self {
        Node::Float(v.into())
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::String(v.to_string())
    }
}

/// A value that can be rendered into an export document.
pub trait Exportable {
    fn export(&self) -> Node;
}

impl<T: Exportable> Exportable for [T] {
    fn export(&self) -> Node {
        Node::Sequence(self.iter().map(Exportable::export).collect())
    }
}
