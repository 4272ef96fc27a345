//! In-memory scripted session (for testing)
//!
//! Serves both surfaces from canned responses, optionally after a fixed
//! latency, and records every call it receives. Unscripted operations fail
//! with a transport error. NOT a transport.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::time::Duration;
use uast_protocol::{v1, v2};

use crate::context::Context;
use crate::error::{ClientError, Result};
use crate::session::{CurrentService, LegacyService};

/// Protocol generation an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Legacy,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Parse,
    NativeParse,
    Version,
    SupportedLanguages,
    ParseV2,
}

impl Operation {
    pub fn surface(&self) -> Surface {
        match self {
            Operation::ParseV2 => Surface::Current,
            _ => Surface::Legacy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Parse => "v1.Parse",
            Operation::NativeParse => "v1.NativeParse",
            Operation::Version => "v1.Version",
            Operation::SupportedLanguages => "v1.SupportedLanguages",
            Operation::ParseV2 => "v2.Parse",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A call as received by the session
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Parse(v1::ParseRequest),
    NativeParse(v1::NativeParseRequest),
    Version,
    SupportedLanguages,
    ParseV2(v2::ParseRequest),
}

impl RecordedCall {
    pub fn operation(&self) -> Operation {
        match self {
            RecordedCall::Parse(_) => Operation::Parse,
            RecordedCall::NativeParse(_) => Operation::NativeParse,
            RecordedCall::Version => Operation::Version,
            RecordedCall::SupportedLanguages => Operation::SupportedLanguages,
            RecordedCall::ParseV2(_) => Operation::ParseV2,
        }
    }

    pub fn surface(&self) -> Surface {
        self.operation().surface()
    }
}

#[derive(Default)]
pub struct ScriptedSession {
    parse: Option<Result<v1::ParseResponse>>,
    native_parse: Option<Result<v1::NativeParseResponse>>,
    version: Option<Result<v1::VersionResponse>>,
    supported_languages: Option<Result<v1::SupportedLanguagesResponse>>,
    parse_v2: Option<Result<v2::ParseResponse>>,
    latency: Duration,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse(mut self, reply: Result<v1::ParseResponse>) -> Self {
        self.parse = Some(reply);
        self
    }

    pub fn with_native_parse(mut self, reply: Result<v1::NativeParseResponse>) -> Self {
        self.native_parse = Some(reply);
        self
    }

    pub fn with_version(mut self, reply: Result<v1::VersionResponse>) -> Self {
        self.version = Some(reply);
        self
    }

    pub fn with_supported_languages(
        mut self,
        reply: Result<v1::SupportedLanguagesResponse>,
    ) -> Self {
        self.supported_languages = Some(reply);
        self
    }

    pub fn with_parse_v2(mut self, reply: Result<v2::ParseResponse>) -> Self {
        self.parse_v2 = Some(reply);
        self
    }

    /// Every call sleeps this long before replying
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, surface: Surface) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.surface() == surface)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    async fn reply<T: Clone>(&self, call: RecordedCall, scripted: &Option<Result<T>>) -> Result<T> {
        let operation = call.operation();
        self.calls.lock().push(call);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        scripted.clone().unwrap_or_else(|| {
            Err(ClientError::transport(format!(
                "no scripted response for {}",
                operation
            )))
        })
    }
}

#[async_trait]
impl LegacyService for ScriptedSession {
    async fn parse(&self, _ctx: &Context, req: &v1::ParseRequest) -> Result<v1::ParseResponse> {
        self.reply(RecordedCall::Parse(req.clone()), &self.parse)
            .await
    }

    async fn native_parse(
        &self,
        _ctx: &Context,
        req: &v1::NativeParseRequest,
    ) -> Result<v1::NativeParseResponse> {
        self.reply(RecordedCall::NativeParse(req.clone()), &self.native_parse)
            .await
    }

    async fn version(
        &self,
        _ctx: &Context,
        _req: &v1::VersionRequest,
    ) -> Result<v1::VersionResponse> {
        self.reply(RecordedCall::Version, &self.version).await
    }

    async fn supported_languages(
        &self,
        _ctx: &Context,
        _req: &v1::SupportedLanguagesRequest,
    ) -> Result<v1::SupportedLanguagesResponse> {
        self.reply(RecordedCall::SupportedLanguages, &self.supported_languages)
            .await
    }
}

#[async_trait]
impl CurrentService for ScriptedSession {
    async fn parse(&self, _ctx: &Context, req: &v2::ParseRequest) -> Result<v2::ParseResponse> {
        self.reply(RecordedCall::ParseV2(req.clone()), &self.parse_v2)
            .await
    }
}
