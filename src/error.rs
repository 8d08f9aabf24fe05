//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Bad port, empty domain name, unsupported key encoding, malformed key hex.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-zero `error_code`.
    #[error("Protocol error {code}: {message}")]
    Protocol { code: i64, message: String },

    #[error("Signing error: {0}")]
    Signing(String),

    /// Operation invoked before a session was established.
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed JSON that breaks a protocol invariant.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Transport-layer errors.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Request failed: {0}")]
    Network(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(e.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        SdkError::Transport(e.into())
    }
}

/// Result type alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
