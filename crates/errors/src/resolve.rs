//! Link-resolution error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("application not found: {package} ({url} returned {status})")]
    NotFound {
        package: String,
        url: String,
        status: u16,
    },

    /// Page body held no parseable markup. Absorbed by the resolver chain.
    #[error("could not parse {url}: {reason}")]
    ParseFailure { url: String, reason: String },

    #[error("package identifier must not be empty")]
    EmptyIdentifier,
}

impl UserFacingError for ResolveError {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Self::NotFound { package, .. } => Cow::Owned(format!("application not found: {package}")),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Check the package identifier, e.g. `com.example.app`.")
            }
            Self::EmptyIdentifier => Some("Pass a package identifier such as `com.example.app`."),
            Self::ParseFailure { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NotFound { .. } => "resolve.not_found",
            Self::ParseFailure { .. } => "resolve.parse_failure",
            Self::EmptyIdentifier => "resolve.empty_identifier",
        })
    }
}
