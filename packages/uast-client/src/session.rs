/*
 * Session - service ports and the Client handle
 *
 * PORTS:
 * - LegacyService: v1 surface (Parse, NativeParse, Version, SupportedLanguages)
 * - CurrentService: v2 surface (Parse)
 *
 * Transports implement the ports; request builders only see the Client.
 */

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use uast_protocol::{v1, v2};

use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::Result;
use crate::request::{
    NativeParseRequest, ParseRequest, ParseRequestV2, SupportedLanguagesRequest, VersionRequest,
};

/// Port: legacy (v1) RPC surface
///
/// Implementations report transport failures as `ClientError::Transport` and
/// may observe `ctx` to abort early; the caller enforces cancellation and
/// deadlines either way.
#[async_trait]
pub trait LegacyService: Send + Sync {
    async fn parse(&self, ctx: &Context, req: &v1::ParseRequest) -> Result<v1::ParseResponse>;

    async fn native_parse(
        &self,
        ctx: &Context,
        req: &v1::NativeParseRequest,
    ) -> Result<v1::NativeParseResponse>;

    async fn version(&self, ctx: &Context, req: &v1::VersionRequest)
        -> Result<v1::VersionResponse>;

    async fn supported_languages(
        &self,
        ctx: &Context,
        req: &v1::SupportedLanguagesRequest,
    ) -> Result<v1::SupportedLanguagesResponse>;
}

/// Port: current (v2) RPC surface
#[async_trait]
pub trait CurrentService: Send + Sync {
    async fn parse(&self, ctx: &Context, req: &v2::ParseRequest) -> Result<v2::ParseResponse>;
}

/// Handle over both service surfaces. Cheap to clone.
#[derive(Clone)]
pub struct Client {
    legacy: Arc<dyn LegacyService>,
    current: Arc<dyn CurrentService>,
    config: Arc<ClientConfig>,
}

impl Client {
    pub fn new(legacy: Arc<dyn LegacyService>, current: Arc<dyn CurrentService>) -> Self {
        Self {
            legacy,
            current,
            config: Arc::new(ClientConfig::default()),
        }
    }

    /// One session object serving both surfaces
    pub fn from_session<S>(session: Arc<S>) -> Self
    where
        S: LegacyService + CurrentService + 'static,
    {
        Self::new(session.clone(), session)
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn legacy(&self) -> &dyn LegacyService {
        self.legacy.as_ref()
    }

    pub(crate) fn current(&self) -> &dyn CurrentService {
        self.current.as_ref()
    }

    /// Legacy parse request (bridged to v2 once a mode is set)
    pub fn new_parse_request(&self) -> ParseRequest {
        ParseRequest::new(self.clone())
    }

    pub fn new_parse_request_v2(&self) -> ParseRequestV2 {
        ParseRequestV2::new(self.clone())
    }

    pub fn new_native_parse_request(&self) -> NativeParseRequest {
        NativeParseRequest::new(self.clone())
    }

    pub fn new_version_request(&self) -> VersionRequest {
        VersionRequest::new(self.clone())
    }

    pub fn new_supported_languages_request(&self) -> SupportedLanguagesRequest {
        SupportedLanguagesRequest::new(self.clone())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
