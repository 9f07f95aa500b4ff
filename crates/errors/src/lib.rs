#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for apkget
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone so they can travel through event
//! channels and streaming bodies.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod network;
pub mod resolve;
pub mod transfer;

// Re-export all error types at the root
pub use config::ConfigError;
pub use network::NetworkError;
pub use resolve::ResolveError;
pub use transfer::TransferError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

/// Coarse classification used at the outer boundaries (CLI exit, HTTP status).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The listing page for the package could not be reached.
    NotFound,
    /// Markup did not contain an expected element.
    ParseFailure,
    /// The resolved URL served an HTML document instead of a binary.
    InvalidArtifact,
    /// The binary fetch returned a non-success status.
    DownloadFailed,
    /// Anything else.
    UnknownError,
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    /// Map this error onto the pipeline's failure taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Resolve(ResolveError::NotFound { .. }) => ErrorKind::NotFound,
            Error::Resolve(ResolveError::ParseFailure { .. }) => ErrorKind::ParseFailure,
            Error::Transfer(TransferError::InvalidArtifact { .. }) => ErrorKind::InvalidArtifact,
            Error::Transfer(TransferError::DownloadFailed { .. }) => ErrorKind::DownloadFailed,
            _ => ErrorKind::UnknownError,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

/// Result type alias for apkget operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Network(err) => err.user_message(),
            Error::Resolve(err) => err.user_message(),
            Error::Transfer(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Io { message, .. } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_hint(),
            Error::Resolve(err) => err.user_hint(),
            Error::Transfer(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(err) => err.is_retryable(),
            Error::Transfer(err) => err.is_retryable(),
            Error::Io { .. } => true,
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_code(),
            Error::Resolve(err) => err.user_code(),
            Error::Transfer(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
            Error::Io { .. } => Some("error.io"),
        }
    }
}
