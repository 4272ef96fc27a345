use std::path::Path;
use std::time::Duration;
use tracing::debug;
use uast_protocol::v1;

use super::{check_status, read_source};
use crate::context::Context;
use crate::error::{ClientError, Result};
use crate::session::Client;

/// Request for the driver-native (untransformed) tree.
///
/// v1 only: the v2 surface has no native-parse operation.
#[derive(Debug, Clone)]
pub struct NativeParseRequest {
    internal: v1::NativeParseRequest,
    client: Client,
    err: Option<ClientError>,
}

impl NativeParseRequest {
    pub(crate) fn new(client: Client) -> Self {
        let config = client.config();
        let internal = v1::NativeParseRequest {
            encoding: config.encoding,
            timeout: config.timeout(),
            ..Default::default()
        };
        Self {
            internal,
            client,
            err: None,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.internal.language = language.into();
        self
    }

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

    /// Sent to the service and enforced locally as a deadline on the call.
    /// Zero disables it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.internal.timeout = timeout;
        self
    }

    pub fn request(&self) -> &v1::NativeParseRequest {
        &self.internal
    }

    pub async fn execute(&self) -> Result<v1::NativeParseResponse> {
        self.execute_with_context(&Context::background()).await
    }

    pub async fn execute_with_context(&self, ctx: &Context) -> Result<v1::NativeParseResponse> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }

        debug!(
            "v1 NativeParse: filename={:?} language={:?}",
            self.internal.filename, self.internal.language
        );
        let legacy = self.client.legacy();
        let resp = if self.internal.timeout.is_zero() {
            ctx.run(legacy.native_parse(ctx, &self.internal)).await?
        } else {
            let (bounded, _release) = ctx.with_timeout(self.internal.timeout);
            bounded
                .run(legacy.native_parse(&bounded, &self.internal))
                .await?
        };
        check_status("NativeParse", resp)
    }
}
