//! Response validation for artifact transfers

use apkget_errors::{Error, TransferError};
use reqwest::StatusCode;

/// Validate an artifact response before any body bytes are read
///
/// An HTML body means the link led to a web page rather than the package,
/// so the content type is checked before the status.
pub(super) fn validate_response(
    url: &str,
    status: StatusCode,
    content_type: &str,
) -> Result<(), Error> {
    if is_html(content_type) {
        return Err(TransferError::InvalidArtifact {
            url: url.to_string(),
            content_type: content_type.to_string(),
        }
        .into());
    }

    if status != StatusCode::OK {
        return Err(TransferError::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    Ok(())
}

fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}
