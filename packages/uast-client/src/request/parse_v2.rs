use std::path::Path;
use uast_protocol::{v2, Mode};

use super::{decode_tree, read_source, send_current, ParsedUast};
use crate::context::Context;
use crate::error::{ClientError, Result};
use crate::session::Client;

/// Parse request on the current (v2) protocol
#[derive(Debug, Clone)]
pub struct ParseRequestV2 {
    internal: v2::ParseRequest,
    client: Client,
    err: Option<ClientError>,
}

impl ParseRequestV2 {
    pub(crate) fn new(client: Client) -> Self {
        let internal = v2::ParseRequest {
            mode: client.config().mode,
            ..Default::default()
        };
        Self {
            internal,
            client,
            err: None,
        }
    }

    /// Language of the source. If missing, the service guesses it from the
    /// filename and the content.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.internal.language = language.into();
        self
    }

    /// Loads a local file into the request content and sets the filename.
    pub fn read_file(mut self, path: impl AsRef<Path>) -> Self {
        match read_source(path.as_ref()) {
            Ok(source) => {
                self.internal.content = source.content;
                self.internal.filename = source.filename;
            }
            Err(e) => {
                self.err.get_or_insert(e);
            }
        }
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.internal.content = content.into();
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.internal.filename = filename.into();
        self
    }

    /// Level of transformation applied to the tree
    pub fn mode(mut self, mode: Mode) -> Self {
        self.internal.mode = Some(mode);
        self
    }

    /// Request that will be sent
    pub fn request(&self) -> &v2::ParseRequest {
        &self.internal
    }

    pub async fn execute(&self) -> Result<v2::ParseResponse> {
        self.execute_with_context(&Context::background()).await
    }

    pub async fn execute_with_context(&self, ctx: &Context) -> Result<v2::ParseResponse> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        send_current(&self.client, ctx, &self.internal).await
    }

    pub async fn uast(&self) -> Result<ParsedUast> {
        self.uast_with_context(&Context::background()).await
    }

    /// Sends the request and decodes the tree.
    ///
    /// On a syntax error in the source the result is
    /// `ClientError::PartialParse`, which still carries the partial tree.
    pub async fn uast_with_context(&self, ctx: &Context) -> Result<ParsedUast> {
        decode_tree(self.execute_with_context(ctx).await?)
    }
}
