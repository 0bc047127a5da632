//! Error types for intellirank.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, IrError>;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("ranking service unreachable: {0}")]
    Unreachable(String),

    #[error("ranking service returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a failure, used to tell the user where to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeout or connection failure.
    Unavailable,
    /// The service answered with a body we could not interpret.
    Malformed,
    /// The service answered with a non-success status.
    Server,
    /// Failure on our side of the boundary (config, io, terminal).
    Local,
}

impl IrError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout(_) | Self::Unreachable(_) => ErrorKind::Unavailable,
            Self::MalformedResponse(_) | Self::Json(_) => ErrorKind::Malformed,
            Self::Http { .. } => ErrorKind::Server,
            Self::Config(_) | Self::MissingConfig(_) | Self::Terminal(_) | Self::Io(_) => {
                ErrorKind::Local
            }
        }
    }

    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::MissingConfig(_) => "missing_config",
            Self::Timeout(_) => "timeout",
            Self::Unreachable(_) => "unreachable",
            Self::Http { .. } => "http",
            Self::MalformedResponse(_) | Self::Json(_) => "malformed_response",
            Self::Terminal(_) => "terminal",
            Self::Io(_) => "io",
        }
    }
}

impl From<reqwest::Error> for IrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return Self::MalformedResponse(err.to_string());
        }
        Self::Unreachable(err.to_string())
    }
}
