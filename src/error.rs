use serde_json::Value;
use thiserror::Error;

/// Failure category reported by the platform, used for caller-side
/// discrimination. No kind carries behavior beyond the shared
/// [`ApiFailure`] payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401 — the API key was rejected.
    Authentication,
    /// 403 — the key is valid but not allowed to do this.
    Permission,
    /// 404 — the addressed resource does not exist.
    NotFound,
    /// 429 — the platform is throttling this key.
    RateLimit,
    /// 5xx — the platform failed on its side.
    Server,
    /// The request never reached the platform.
    Connection,
    /// The bounded request timeout elapsed.
    Timeout,
    /// Any other non-2xx status.
    Other,
}

/// Payload shared by every platform failure: the classification tag, a
/// human-readable message, the HTTP status (absent for connection and
/// timeout failures), and the error body as the server sent it — parsed
/// JSON when possible, otherwise the raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status_code: Option<u16>,
    pub body: Option<Value>,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(status) => write!(f, "{:?} ({status}): {}", self.kind, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("VoxHub API error: {0}")]
    Api(ApiFailure),

    /// Rejected before any network call (e.g. a missing required field).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP client error: {0}")]
    Http(reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to parse or serialize JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Header error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("The connection was closed unexpectedly")]
    ConnectionClosed,
}

impl Error {
    /// The platform failure classification, if this is an API failure.
    #[must_use]
    pub const fn kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(failure) => Some(failure.kind),
            _ => None,
        }
    }

    /// The HTTP status carried by an API failure.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(failure) => failure.status_code,
            _ => None,
        }
    }

    /// The error body carried by an API failure.
    #[must_use]
    pub const fn error_body(&self) -> Option<&Value> {
        match self {
            Self::Api(failure) => failure.body.as_ref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
