use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::UnsupportedModeError;

/// Transformation level applied to the returned tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Tree mirrors the driver's internal grammar
    Native,
    /// Native shape enriched with cross-language role annotations
    Annotated,
    /// Normalized, language-agnostic shape
    Semantic,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Native, Mode::Annotated, Mode::Semantic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Native => "native",
            Mode::Annotated => "annotated",
            Mode::Semantic => "semantic",
        }
    }

    /// Case-sensitive, no aliases.
    pub fn parse(s: &str) -> Result<Self, UnsupportedModeError> {
        match s {
            "native" => Ok(Mode::Native),
            "annotated" => Ok(Mode::Annotated),
            "semantic" => Ok(Mode::Semantic),
            _ => Err(UnsupportedModeError(s.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = UnsupportedModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::parse(s)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
