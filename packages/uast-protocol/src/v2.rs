//! Current (v2) protocol messages

use serde::{Deserialize, Serialize};

use crate::error::{NodesError, PartialParseError};
use crate::mode::Mode;
use crate::nodes::{self, Node};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseRequest {
    pub filename: String,
    /// Empty: the service detects the language
    pub language: String,
    pub content: String,
    /// `None`: service default
    pub mode: Option<Mode>,
}

/// Parse error reported by the driver for the unparsed remainder
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseError {
    pub text: String,
}

impl ParseError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseResponse {
    pub language: String,
    pub filename: String,
    /// Encoded tree, see [`crate::nodes::decode`]
    pub uast: Vec<u8>,
    pub errors: Vec<ParseError>,
}

impl ParseResponse {
    /// Decode the tree payload.
    ///
    /// When the driver reported errors, the decoded tree is partial and comes
    /// back inside [`NodesError::Partial`].
    pub fn nodes(&self) -> Result<Node, NodesError> {
        let tree = nodes::decode(&self.uast)?;
        if !self.errors.is_empty() {
            let errors = self.errors.iter().map(|e| e.text.clone()).collect();
            return Err(PartialParseError::new(tree, self.language.clone(), errors).into());
        }
        Ok(tree)
    }
}
