//! Client Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A client error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never got a response (DNS, TLS, connection reset, ...).
    #[display("network error requesting {_0}")]
    Network(#[error(not(source))] String),
    /// The server answered with a non-success status code.
    #[display("unexpected HTTP status: {_0}")]
    Status(#[error(not(source))] u16),
    /// The response body was not a revisions page.
    #[display("malformed revisions response")]
    Decode,
    /// The endpoint URL could not be built from the API base.
    #[display("invalid endpoint: {_0}")]
    InvalidEndpoint(#[error(not(source))] String),
    /// The HTTP client could not be constructed.
    #[display("HTTP client unavailable")]
    Client,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(code) => *code >= 500 || *code == 429,
            Self::Decode | Self::InvalidEndpoint(_) | Self::Client => false,
        }
    }
}
