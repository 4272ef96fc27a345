use tracing::debug;
use uast_protocol::v1;

use super::check_status;
use crate::context::Context;
use crate::error::Result;
use crate::session::Client;

/// Request for the languages (drivers) the server supports
#[derive(Debug, Clone)]
pub struct SupportedLanguagesRequest {
    client: Client,
}

impl SupportedLanguagesRequest {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn execute(&self) -> Result<v1::SupportedLanguagesResponse> {
        self.execute_with_context(&Context::background()).await
    }

    pub async fn execute_with_context(
        &self,
        ctx: &Context,
    ) -> Result<v1::SupportedLanguagesResponse> {
        debug!("v1 SupportedLanguages");
        let resp = ctx
            .run(
                self.client
                    .legacy()
                    .supported_languages(ctx, &v1::SupportedLanguagesRequest),
            )
            .await?;
        check_status("SupportedLanguages", resp)
    }
}
