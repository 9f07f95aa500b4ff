//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("failed to read response body from {url}: {message}")]
    BodyRead { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl NetworkError {
    /// Classify a transport-level reqwest failure
    #[must_use]
    pub fn from_transport(url: &str, message: String, is_timeout: bool, is_connect: bool) -> Self {
        if is_timeout {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if is_connect {
            Self::ConnectionRefused(message)
        } else {
            Self::RequestFailed(message)
        }
    }
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } => {
                Some("The origin site did not answer in time. Check your connection and retry.")
            }
            Self::ConnectionRefused(_) => Some("Check that the origin site is reachable."),
            Self::InvalidUrl(_) => Some("Check the configured origin URLs."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ConnectionRefused(_) | Self::BodyRead { .. }
        )
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Timeout { .. } => "network.timeout",
            Self::RequestFailed(_) => "network.request_failed",
            Self::ConnectionRefused(_) => "network.connection_refused",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::BodyRead { .. } => "network.body_read",
            Self::ClientBuild(_) => "network.client_build",
        })
    }
}
