use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use uast_protocol::nodes::Node;
use uast_protocol::v1;
use uast_protocol::{ConversionError, PartialParseError, UnsupportedModeError};

pub type Result<T> = std::result::Result<T, ClientError>;

type BoxError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Messages of a response that came back with `Fatal` status.
///
/// Renders the messages one per line; an empty list renders a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FatalError(pub Vec<String>);

impl FatalError {
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "fatal error");
        }
        write!(f, "{}", self.0.join("\n"))
    }
}

impl std::error::Error for FatalError {}

/// Raw legacy response kept alongside a fatal error
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyResponse {
    Parse(v1::ParseResponse),
    NativeParse(v1::NativeParseResponse),
    Version(v1::VersionResponse),
    SupportedLanguages(v1::SupportedLanguagesResponse),
}

macro_rules! legacy_response_from {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for LegacyResponse {
                fn from(resp: $ty) -> Self {
                    LegacyResponse::$variant(resp)
                }
            }
        )+
    };
}

legacy_response_from!(
    Parse => v1::ParseResponse,
    NativeParse => v1::NativeParseResponse,
    Version => v1::VersionResponse,
    SupportedLanguages => v1::SupportedLanguagesResponse,
);

/// Error kinds, used for classification (retry decisions, metrics labels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Builder configuration failed before any call (e.g. unreadable file)
    Configuration,
    /// The call could not complete
    Transport,
    /// Caller cancelled the context
    Cancelled,
    /// Context deadline passed
    DeadlineExceeded,
    /// Service reported `Fatal`
    Fatal,
    /// Service parsed part of the input; tree available
    PartialParse,
    /// Tree payload undecodable
    Decode,
    /// v2 tree not expressible in the legacy shape
    Bridge,
    /// Mode string outside the vocabulary
    UnsupportedMode,
    /// Client configuration could not be loaded
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Transport => "transport",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::DeadlineExceeded => "deadline_exceeded",
            ErrorKind::Fatal => "fatal",
            ErrorKind::PartialParse => "partial_parse",
            ErrorKind::Decode => "decode",
            ErrorKind::Bridge => "bridge",
            ErrorKind::UnsupportedMode => "unsupported_mode",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client error type.
///
/// `Clone` so a builder can hand out its stored configuration error on
/// every execution.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("cannot read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("{error}")]
    Fatal {
        error: FatalError,
        response: Box<LegacyResponse>,
    },

    #[error(transparent)]
    PartialParse(#[from] PartialParseError),

    #[error("cannot decode the uast (language {language:?}): {message}")]
    Decode { language: String, message: String },

    #[error("cannot convert to v1 uast: {0}")]
    Bridge(#[from] ConversionError),

    #[error(transparent)]
    UnsupportedMode(#[from] UnsupportedModeError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    pub fn fatal(response: impl v1::StatusResponse + Into<LegacyResponse>) -> Self {
        let error = FatalError::new(response.errors().to_vec());
        Self::Fatal {
            error,
            response: Box::new(response.into()),
        }
    }

    pub fn config<E: fmt::Display>(e: E) -> Self {
        Self::Config(e.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::ReadFile { .. } => ErrorKind::Configuration,
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Cancelled => ErrorKind::Cancelled,
            ClientError::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            ClientError::Fatal { .. } => ErrorKind::Fatal,
            ClientError::PartialParse(_) => ErrorKind::PartialParse,
            ClientError::Decode { .. } => ErrorKind::Decode,
            ClientError::Bridge(_) => ErrorKind::Bridge,
            ClientError::UnsupportedMode(_) => ErrorKind::UnsupportedMode,
            ClientError::Config(_) => ErrorKind::Config,
        }
    }

    /// Cancelled or deadline exceeded
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ClientError::Cancelled | ClientError::DeadlineExceeded)
    }

    pub fn is_partial_parse(&self) -> bool {
        matches!(self, ClientError::PartialParse(_))
    }

    /// Tree recovered from a partial parse
    pub fn partial_tree(&self) -> Option<&Node> {
        match self {
            ClientError::PartialParse(partial) => Some(partial.tree()),
            _ => None,
        }
    }

    /// Raw response of a `Fatal` status
    pub fn fatal_response(&self) -> Option<&LegacyResponse> {
        match self {
            ClientError::Fatal { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }
}
