//! Client configuration (YAML)
//!
//! ```yaml
//! version: 1
//! timeout_ms: 5000     # default legacy timeout, 0 = none
//! encoding: utf8       # default legacy encoding
//! mode: semantic       # default mode for v2 requests only
//! ```
//!
//! `mode` never applies to legacy requests: bridging stays opt-in per request.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use uast_protocol::v1::Encoding;
use uast_protocol::Mode;

use crate::error::{ClientError, Result};

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Schema version (always 1)
    pub version: u32,

    #[serde(default)]
    pub timeout_ms: u64,

    #[serde(default)]
    pub encoding: Encoding,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            timeout_ms: 0,
            encoding: Encoding::default(),
            mode: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Rounded up to whole milliseconds so a non-zero timeout never becomes 0
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ClientError::config(format!(
                "unsupported configuration version {}, supported: {:?}",
                self.version, SUPPORTED_VERSIONS
            )));
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml).map_err(ClientError::config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ClientError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ClientError::config)
    }
}
