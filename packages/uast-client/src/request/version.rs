use tracing::debug;
use uast_protocol::v1;

use super::check_status;
use crate::context::Context;
use crate::error::Result;
use crate::session::Client;

/// Request for the server version
#[derive(Debug, Clone)]
pub struct VersionRequest {
    client: Client,
}

impl VersionRequest {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn execute(&self) -> Result<v1::VersionResponse> {
        self.execute_with_context(&Context::background()).await
    }

    pub async fn execute_with_context(&self, ctx: &Context) -> Result<v1::VersionResponse> {
        debug!("v1 Version");
        let resp = ctx
            .run(self.client.legacy().version(ctx, &v1::VersionRequest))
            .await?;
        check_status("Version", resp)
    }
}
