//! Error types for uast-protocol

use std::fmt;
use thiserror::Error;

use crate::nodes::Node;

/// Tree payload could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode tree payload ({len} bytes): {message}")]
pub struct DecodeError {
    pub len: usize,
    pub message: String,
}

impl DecodeError {
    pub fn new(len: usize, message: impl Into<String>) -> Self {
        Self {
            len,
            message: message.into(),
        }
    }
}

/// The service parsed only part of the source.
///
/// Owns the partial tree so callers can keep working with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialParseError {
    pub language: String,
    pub errors: Vec<String>,
    tree: Node,
}

impl PartialParseError {
    pub fn new(tree: Node, language: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            language: language.into(),
            errors,
            tree,
        }
    }

    /// Partial tree recovered by the service
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn into_tree(self) -> Node {
        self.tree
    }
}

impl fmt::Display for PartialParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "partial parse");
        }
        write!(f, "partial parse: {}", self.errors.join("; "))
    }
}

impl std::error::Error for PartialParseError {}

/// Outcome of [`crate::v2::ParseResponse::nodes`] when no complete tree is available
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodesError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Partial(#[from] PartialParseError),
}

/// A v2 tree construct that has no v1 representation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("root must be an object, got {0}")]
    UnexpectedRoot(&'static str),

    #[error("field '{key}' must be {expected}, got {found}")]
    InvalidField {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("unsupported reserved key '{0}'")]
    ReservedKey(String),

    #[error("array '{key}' holds {found}, only objects can become children")]
    ArrayElement { key: String, found: &'static str },

    #[error("position '{key}': {reason}")]
    Position { key: String, reason: String },

    /// A child's own field clashes with the marker naming its parent field
    #[error("child under '{parent}' already has a '{key}' property")]
    PropertyCollision { key: String, parent: String },
}

/// Mode string outside the accepted vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported mode: {0:?}")]
pub struct UnsupportedModeError(pub String);
