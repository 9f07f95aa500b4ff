//! Artifact transfer error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TransferError {
    #[error("invalid download link: {url} served {content_type}")]
    InvalidArtifact { url: String, content_type: String },

    #[error("download failed: {url} returned {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("stream interrupted after {bytes} bytes: {message}")]
    StreamInterrupted { bytes: u64, message: String },

    #[error("sink closed after {bytes} bytes: {message}")]
    SinkClosed { bytes: u64, message: String },
}

impl UserFacingError for TransferError {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Self::InvalidArtifact { .. } => Cow::Borrowed("invalid download link"),
            Self::DownloadFailed { .. } => Cow::Borrowed("download failed"),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArtifact { .. } => Some(
                "The origin site returned a web page instead of the package. It may require a browser visit first.",
            ),
            Self::SinkClosed { .. } => Some("Ensure the output directory is writable."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::StreamInterrupted { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidArtifact { .. } => "transfer.invalid_artifact",
            Self::DownloadFailed { .. } => "transfer.download_failed",
            Self::StreamInterrupted { .. } => "transfer.stream_interrupted",
            Self::SinkClosed { .. } => "transfer.sink_closed",
        })
    }
}
