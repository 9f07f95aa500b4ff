//! Transfer metadata and delivery mode

use serde::{Deserialize, Serialize};

/// Upper bound for a single chunk handed to the consumer
pub const CHUNK_SIZE: usize = 8192;

/// Media type used when forwarding artifacts to HTTP clients
pub const ARTIFACT_MEDIA_TYPE: &str = "application/vnd.android.package-archive";

/// How the artifact body is handed to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Pull-based chunks, never holding the whole body
    #[default]
    Stream,
    /// Whole body concatenated in memory
    Buffer,
}

impl TransferMode {
    /// Map the service's `stream=bool` query flag
    #[must_use]
    pub fn from_stream_flag(stream: bool) -> Self {
        if stream {
            Self::Stream
        } else {
            Self::Buffer
        }
    }
}

/// Metadata derived from the artifact response headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferMetadata {
    pub filename: String,
    pub content_type: String,
    /// Upstream value in stream mode, exact body length in buffer mode
    pub content_length: Option<u64>,
    /// Whether the `.apk` extension was rewritten to a bundle extension
    pub extension_corrected: bool,
}
