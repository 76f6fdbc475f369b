//! Error types for the Access SDK

use std::fmt;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client-side contract violation; fix the input
    InvalidData,
    /// Transport failure; retrying later may succeed
    NetworkError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidData => write!(f, "INVALID_DATA"),
            ErrorKind::NetworkError => write!(f, "NETWORK_ERROR"),
        }
    }
}

/// Access SDK error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Malformed construction arguments, request fields, URL or response body
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Non-200 status, unknown host or I/O failure
    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    /// Error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidData(_) => ErrorKind::InvalidData,
            Error::Network(_) => ErrorKind::NetworkError,
        }
    }

    /// Human-readable message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Error::InvalidData(msg) | Error::Network(msg) => msg,
        }
    }

    /// True for `ErrorKind::InvalidData`
    pub fn is_invalid_data(&self) -> bool {
        self.kind() == ErrorKind::InvalidData
    }

    /// True for `ErrorKind::NetworkError`
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::NetworkError
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidData(msg.into())
    }

    pub(crate) fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }
}
