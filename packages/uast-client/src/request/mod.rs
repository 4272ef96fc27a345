//! Request builders
//!
//! Builders are configured with by-value setters and executed through
//! `&self`, so a configured builder can be executed many times (each
//! execution is a fresh call) and concurrently. Setters that can fail
//! (`read_file`) store the first error; execution returns it without
//! contacting the service.

mod languages;
mod native;
mod parse;
mod parse_v2;
mod version;

pub use languages::SupportedLanguagesRequest;
pub use native::NativeParseRequest;
pub use parse::ParseRequest;
pub use parse_v2::ParseRequestV2;
pub use version::VersionRequest;

use std::path::Path;
use tracing::{debug, warn};
use uast_protocol::nodes::Node;
use uast_protocol::v1::StatusResponse;
use uast_protocol::{v1, v2, NodesError};

use crate::context::Context;
use crate::error::{ClientError, LegacyResponse, Result};
use crate::session::Client;

/// Decoded tree and the language the service resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUast {
    pub tree: Node,
    pub language: String,
}

#[derive(Debug)]
pub(crate) struct SourceFile {
    pub content: String,
    pub filename: String,
}

/// Read `path` into request content; filename is the base name
pub(crate) fn read_source(path: &Path) -> Result<SourceFile> {
    let bytes = std::fs::read(path).map_err(|e| ClientError::read_file(path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| {
        ClientError::read_file(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(SourceFile { content, filename })
}

/// `Fatal` status becomes an error carrying the raw response; every other
/// status (including `Error`) is returned as-is.
pub(crate) fn check_status<R>(operation: &'static str, response: R) -> Result<R>
where
    R: StatusResponse + Into<LegacyResponse>,
{
    if response.status() == v1::Status::Fatal {
        warn!(
            "{}: service returned fatal status with {} error(s)",
            operation,
            response.errors().len()
        );
        return Err(ClientError::fatal(response));
    }
    Ok(response)
}

/// Single v2 round trip under `ctx`
pub(crate) async fn send_current(
    client: &Client,
    ctx: &Context,
    req: &v2::ParseRequest,
) -> Result<v2::ParseResponse> {
    debug!(
        "v2 Parse: filename={:?} language={:?} mode={:?}",
        req.filename, req.language, req.mode
    );
    ctx.run(client.current().parse(ctx, req)).await
}

pub(crate) fn decode_tree(resp: v2::ParseResponse) -> Result<ParsedUast> {
    match resp.nodes() {
        Ok(tree) => Ok(ParsedUast {
            tree,
            language: resp.language,
        }),
        Err(NodesError::Partial(partial)) => {
            warn!(
                "partial parse of {:?} ({}): {} error(s)",
                resp.filename,
                partial.language,
                partial.errors.len()
            );
            Err(partial.into())
        }
        Err(NodesError::Decode(e)) => Err(ClientError::Decode {
            language: resp.language,
            message: e.to_string(),
        }),
    }
}
