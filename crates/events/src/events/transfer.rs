use serde::{Deserialize, Serialize};

/// Artifact transfer events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransferEvent {
    /// Response validated, body about to be consumed
    Started {
        url: String,
        filename: String,
        content_length: Option<u64>,
    },

    /// The `.apk` extension was rewritten for a bundle format
    ExtensionCorrected { from: String, to: String },

    /// Response refused before any byte was forwarded
    Rejected {
        url: String,
        status: u16,
        reason: String,
    },

    /// Body fully consumed
    Completed {
        url: String,
        bytes: u64,
        /// Set when the body was written to disk
        path: Option<String>,
    },

    /// Body consumption stopped early (upstream error or closed sink)
    Aborted {
        url: String,
        bytes: u64,
        reason: String,
    },
}
