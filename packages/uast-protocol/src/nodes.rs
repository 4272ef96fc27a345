//! In-memory v2 tree and its payload codec
//!
//! The v2 service ships the tree as an opaque byte payload. On this side the
//! payload is MessagePack (`rmp-serde`) of [`Node`]; an empty payload means
//! "no tree" and decodes to [`Node::Null`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DecodeError;

/// Reserved object keys
pub const KEY_TYPE: &str = "@type";
pub const KEY_TOKEN: &str = "@token";
pub const KEY_ROLES: &str = "@role";
pub const KEY_POS: &str = "@pos";

/// Field map of an object node (ordered by key)
pub type Object = BTreeMap<String, Node>;

/// Generic v2 tree value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Array(Vec<Node>),
    Object(Object),
}

impl Node {
    /// Build an object node from `(key, value)` pairs
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Uint(_) => "uint",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Field lookup on object nodes; `None` for every other kind
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// `@type` of an object node
    pub fn node_type(&self) -> Option<&str> {
        self.get(KEY_TYPE).and_then(Node::as_str)
    }

    /// Number of object nodes in the tree, root included
    pub fn count_objects(&self) -> usize {
        match self {
            Node::Object(obj) => 1 + obj.values().map(Node::count_objects).sum::<usize>(),
            Node::Array(items) => items.iter().map(Node::count_objects).sum(),
            _ => 0,
        }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Int(v)
    }
}

impl From<u64> for Node {
    fn from(v: u64) -> Self {
        Node::Uint(v)
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Float(v)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

/// JSON integers become `Int` when they fit in `i64`, `Uint` otherwise.
impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Node::Uint(u)
                } else {
                    Node::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Object(fields) => {
                Node::Object(fields.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

/// Encode a tree into a v2 payload
pub fn encode(node: &Node) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    if node.is_null() {
        return Ok(Vec::new());
    }
    rmp_serde::to_vec(node)
}

/// Decode a v2 payload
pub fn decode(payload: &[u8]) -> Result<Node, DecodeError> {
    if payload.is_empty() {
        return Ok(Node::Null);
    }
    rmp_serde::from_slice(payload).map_err(|e| DecodeError::new(payload.len(), e.to_string()))
}
