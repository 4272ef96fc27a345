//! UAST Protocol - message types for both service generations
//!
//! The parsing service speaks two wire generations:
//!
//! - **v1 (legacy)**: rich status/encoding envelope, fixed tree shape
//!   ([`v1::Node`]).
//! - **v2 (current)**: selectable transformation [`Mode`], narrow envelope,
//!   tree shipped as an encoded payload that decodes into [`nodes::Node`].
//!
//! This crate owns the messages, the tree payload codec and the
//! v2 → v1 tree conversion. It performs no I/O.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uast_protocol::{nodes, v1, v2, Mode};
//!
//! let resp = v2::ParseResponse {
//!     language: "python".into(),
//!     uast: nodes::encode(&tree)?,
//!     ..Default::default()
//! };
//! let tree = resp.nodes()?;
//! let legacy = v1::to_legacy(&tree)?;
//! ```

pub mod error;
pub mod mode;
pub mod nodes;
pub mod v1;
pub mod v2;

pub use error::{ConversionError, DecodeError, NodesError, PartialParseError, UnsupportedModeError};
pub use mode::Mode;
