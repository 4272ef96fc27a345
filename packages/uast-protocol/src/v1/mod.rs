//! Legacy (v1) protocol messages
//!
//! Every v1 response carries a [`Status`] and a list of error messages next
//! to its payload. `Fatal` means the service gave up; `Error` means it
//! answered but complained.

mod convert;
mod uast;

pub use convert::to_legacy;
pub use uast::{Node, Position, Role, INTERNAL_ROLE_KEY};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Ok,
    Error,
    Fatal,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Error => "error",
            Status::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text encoding of request content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    Base64,
}

// ═══════════════════════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseRequest {
    pub filename: String,
    /// Empty: the service detects the language
    pub language: String,
    pub content: String,
    pub encoding: Encoding,
    /// Zero: no timeout
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NativeParseRequest {
    pub filename: String,
    pub language: String,
    pub content: String,
    pub encoding: Encoding,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportedLanguagesRequest;

// ═══════════════════════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════════════════════

/// Access to the status envelope shared by all v1 responses
pub trait StatusResponse {
    fn status(&self) -> Status;
    fn errors(&self) -> &[String];
}

macro_rules! impl_status_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl StatusResponse for $ty {
                fn status(&self) -> Status {
                    self.status
                }

                fn errors(&self) -> &[String] {
                    &self.errors
                }
            }
        )+
    };
}

impl_status_response!(
    ParseResponse,
    NativeParseResponse,
    VersionResponse,
    SupportedLanguagesResponse,
);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseResponse {
    pub status: Status,
    pub errors: Vec<String>,
    pub elapsed: Duration,
    pub language: String,
    pub filename: String,
    pub uast: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NativeParseResponse {
    pub status: Status,
    pub errors: Vec<String>,
    pub elapsed: Duration,
    pub language: String,
    /// Driver-native tree, JSON text
    pub ast: String,
}

impl NativeParseResponse {
    pub fn ast_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.ast)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    pub status: Status,
    pub errors: Vec<String>,
    pub elapsed: Duration,
    pub version: String,
    pub build: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DriverManifest {
    pub name: String,
    pub language: String,
    pub version: String,
    pub status: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportedLanguagesResponse {
    pub status: Status,
    pub errors: Vec<String>,
    pub elapsed: Duration,
    pub languages: Vec<DriverManifest>,
}
