use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uast_protocol::{v1, v2, Mode};

use super::{check_status, decode_tree, read_source, send_current, ParsedUast};
use crate::context::Context;
use crate::error::{ClientError, Result};
use crate::session::Client;

/// Parse request in the legacy (v1) shape.
///
/// Without a mode it runs on the v1 surface. Once [`ParseRequest::mode`] is
/// called it runs on the v2 surface and the response is converted back to
/// the v1 shape; the v1 surface is never contacted in that case.
///
/// Configure, then execute: setters consume the builder, so it cannot be
/// reconfigured while an execution borrows it.
#[derive(Debug, Clone)]
pub struct ParseRequest {
    internal: v1::ParseRequest,
    /// Set: bridge through v2
    mode: Option<Mode>,
    client: Client,
    err: Option<ClientError>,
}

impl ParseRequest {
    pub(crate) fn new(client: Client) -> Self {
        let config = client.config();
        let internal = v1::ParseRequest {
            encoding: config.encoding,
            timeout: config.timeout(),
            ..Default::default()
        };
        Self {
            internal,
            mode: None,
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

    pub fn encoding(mut self, encoding: v1::Encoding) -> Self {
        self.internal.encoding = encoding;
        self
    }

    /// Sent to the service and enforced locally as a deadline on the call,
    /// bridged or not. Zero disables it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.internal.timeout = timeout;
        self
    }

    /// Switches this request to the v2 protocol with the given transformation
    /// level. Responses are converted back to the v1 shape.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn request(&self) -> &v1::ParseRequest {
        &self.internal
    }

    pub fn is_bridged(&self) -> bool {
        self.mode.is_some()
    }

    pub async fn execute(&self) -> Result<v1::ParseResponse> {
        self.execute_with_context(&Context::background()).await
    }

    /// A `Fatal` status yields `ClientError::Fatal`; an `Error` status is
    /// returned as a normal response for the caller to inspect.
    pub async fn execute_with_context(&self, ctx: &Context) -> Result<v1::ParseResponse> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        if self.mode.is_some() {
            return self.bridge(ctx).await;
        }

        debug!(
            "v1 Parse: filename={:?} language={:?} timeout={:?}",
            self.internal.filename, self.internal.language, self.internal.timeout
        );
        let legacy = self.client.legacy();
        let resp = if self.internal.timeout.is_zero() {
            ctx.run(legacy.parse(ctx, &self.internal)).await?
        } else {
            let (bounded, _release) = ctx.with_timeout(self.internal.timeout);
            bounded.run(legacy.parse(&bounded, &self.internal)).await?
        };
        check_status("Parse", resp)
    }

    pub async fn uast(&self) -> Result<ParsedUast> {
        self.uast_with_context(&Context::background()).await
    }

    /// Always goes through v2, with or without an explicit mode.
    ///
    /// On a syntax error in the source the result is
    /// `ClientError::PartialParse`, which still carries the partial tree.
    pub async fn uast_with_context(&self, ctx: &Context) -> Result<ParsedUast> {
        decode_tree(self.round_trip(ctx).await?)
    }

    /// v2 round trip, then conversion to a v1 response
    async fn bridge(&self, ctx: &Context) -> Result<v1::ParseResponse> {
        let start = Instant::now();
        let resp = self.round_trip(ctx).await?;
        let elapsed = start.elapsed();

        let parsed = decode_tree(resp)?;
        let uast = v1::to_legacy(&parsed.tree)?;
        info!(
            "bridged parse of {:?} ({}) in {:?}",
            self.internal.filename, parsed.language, elapsed
        );

        Ok(v1::ParseResponse {
            status: v1::Status::Ok,
            errors: Vec::new(),
            elapsed,
            language: parsed.language,
            filename: self.internal.filename.clone(),
            uast,
        })
    }

    /// One v2 call built from the v1 fields. A non-zero timeout bounds the
    /// call with a derived deadline, released when this returns.
    async fn round_trip(&self, ctx: &Context) -> Result<v2::ParseResponse> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }

        let req = v2::ParseRequest {
            filename: self.internal.filename.clone(),
            language: self.internal.language.clone(),
            content: self.internal.content.clone(),
            mode: self.mode,
        };

        if self.internal.timeout.is_zero() {
            return send_current(&self.client, ctx, &req).await;
        }
        let (bounded, _release) = ctx.with_timeout(self.internal.timeout);
        send_current(&self.client, &bounded, &req).await
    }
}
