//! UAST Client - request builders over the v1 and v2 parsing protocols
//!
//! A [`Client`] wraps one session serving two RPC surfaces: the legacy (v1)
//! surface and the current (v2) surface. Requests are built fluently and
//! executed asynchronously:
//!
//! ```rust,ignore
//! use uast_client::{Client, Context, Mode};
//!
//! let client = Client::from_session(session);
//!
//! // v1 request, executed on v1
//! let resp = client.new_parse_request().read_file("main.py").execute().await?;
//!
//! // v1 request, executed on v2 and converted back to the v1 shape
//! let resp = client
//!     .new_parse_request()
//!     .read_file("main.py")
//!     .mode(Mode::Semantic)
//!     .timeout(Duration::from_secs(5))
//!     .execute()
//!     .await?;
//!
//! // decoded v2 tree, partial trees survive syntax errors
//! match client.new_parse_request_v2().content(src).uast().await {
//!     Ok(parsed) => use_tree(parsed.tree),
//!     Err(err) if err.is_partial_parse() => use_tree(err.partial_tree().cloned().unwrap()),
//!     Err(err) => return Err(err),
//! }
//! ```
//!
//! Nothing is retried; every error goes back to the caller.

pub mod config;
pub mod context;
pub mod error;
pub mod infrastructure;
pub mod request;
pub mod session;

pub use config::ClientConfig;
pub use context::Context;
pub use error::{ClientError, ErrorKind, FatalError, LegacyResponse, Result};
pub use request::{
    NativeParseRequest, ParseRequest, ParseRequestV2, ParsedUast, SupportedLanguagesRequest,
    VersionRequest,
};
pub use session::{Client, CurrentService, LegacyService};

pub use tokio_util::sync::CancellationToken;
pub use uast_protocol::{self as protocol, nodes, v1, v2, Mode};

/// Parse a mode name (`native`, `annotated`, `semantic`)
pub fn parse_mode(mode: &str) -> Result<Mode> {
    Ok(Mode::parse(mode)?)
}
