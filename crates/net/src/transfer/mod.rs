//! Artifact transfer: fetch a resolved link and deliver its bytes
//!
//! The response is validated before any body bytes are read. Metadata is
//! derived from the response headers, then the body is handed to the
//! caller either as a chunked [`ByteStream`] or as one buffer.

mod filename;
mod sink;
mod stream;
mod validation;

pub use sink::{save_to_dir, SavedArtifact};
pub use stream::ByteStream;

use crate::client::NetClient;
use apkget_errors::Error;
use apkget_events::{AppEvent, EventEmitter, EventSender, TransferEvent};
use apkget_types::{PackageId, TransferMetadata, TransferMode};
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use url::Url;

/// Content type reported when the upstream omits one
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Artifact body in the requested delivery mode
#[derive(Debug)]
pub enum ArtifactBody {
    Stream(ByteStream),
    Buffer(Bytes),
}

/// A validated artifact ready for delivery
#[derive(Debug)]
pub struct Artifact {
    pub url: Url,
    pub metadata: TransferMetadata,
    pub body: ArtifactBody,
}

/// Fetch the artifact behind a resolved link
///
/// In [`TransferMode::Buffer`] the whole body is read before returning and
/// `content_length` is the exact byte count. In [`TransferMode::Stream`]
/// `content_length` is whatever the upstream advertised.
///
/// # Errors
///
/// Returns `InvalidArtifact` when the response is HTML, `DownloadFailed`
/// on any other non-200 status, and network errors on transport failure.
pub async fn fetch_artifact(
    client: &NetClient,
    url: &Url,
    package: &PackageId,
    mode: TransferMode,
    tx: &EventSender,
) -> Result<Artifact, Error> {
    let response = client.fetch_stream(url.as_str()).await?;
    let status = response.status();
    let content_type = header_str(response.headers(), CONTENT_TYPE.as_str())
        .unwrap_or_default()
        .to_string();

    if let Err(e) = validation::validate_response(url.as_str(), status, &content_type) {
        tx.emit(AppEvent::Transfer(TransferEvent::Rejected {
            url: url.to_string(),
            status: status.as_u16(),
            reason: e.to_string(),
        }));
        return Err(e);
    }

    let mut metadata = derive_metadata(response.headers(), url, package, &content_type, tx);
    tx.emit_transfer_started(url.as_str(), &metadata.filename, metadata.content_length);

    let body = ByteStream::from_response(response, client.config().artifact_timeout);
    let body = match mode {
        TransferMode::Stream => ArtifactBody::Stream(body),
        TransferMode::Buffer => {
            let bytes = body.collect().await?;
            metadata.content_length = Some(bytes.len() as u64);
            ArtifactBody::Buffer(bytes)
        }
    };

    Ok(Artifact {
        url: url.clone(),
        metadata,
        body,
    })
}

fn derive_metadata(
    headers: &HeaderMap,
    url: &Url,
    package: &PackageId,
    content_type: &str,
    tx: &EventSender,
) -> TransferMetadata {
    let mut filename = filename::artifact_filename(
        package,
        header_str(headers, CONTENT_DISPOSITION.as_str()),
    );

    let mut extension_corrected = false;
    if let Some(corrected) = filename::corrected_extension(&filename, url.as_str(), content_type) {
        tx.emit(AppEvent::Transfer(TransferEvent::ExtensionCorrected {
            from: filename.clone(),
            to: corrected.clone(),
        }));
        filename = corrected;
        extension_corrected = true;
    }

    let content_length =
        header_str(headers, CONTENT_LENGTH.as_str()).and_then(|v| v.trim().parse().ok());

    TransferMetadata {
        filename,
        content_type: if content_type.is_empty() {
            FALLBACK_CONTENT_TYPE.to_string()
        } else {
            content_type.to_string()
        },
        content_length,
        extension_corrected,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apkget_events::channel;
    use reqwest::header::HeaderValue;

    fn pkg() -> PackageId {
        PackageId::new("com.example.app").unwrap()
    }

    #[test]
    fn test_metadata_defaults() {
        let (tx, _rx) = channel();
        let url = Url::parse("https://cdn.test/b/APK/com.example.app").unwrap();
        let metadata = derive_metadata(&HeaderMap::new(), &url, &pkg(), "", &tx);

        assert_eq!(metadata.filename, "com.example.app.apk");
        assert_eq!(metadata.content_type, "application/octet-stream");
        assert_eq!(metadata.content_length, None);
        assert!(!metadata.extension_corrected);
    }

    #[tokio::test]
    async fn test_metadata_corrects_and_reports_extension() {
        let (tx, mut rx) = channel();
        let url = Url::parse("https://cdn.test/files/bundle.xapk").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"Bundle.apk\""),
        );
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));

        let metadata = derive_metadata(&headers, &url, &pkg(), "application/octet-stream", &tx);
        assert_eq!(metadata.filename, "Bundle.xapk");
        assert_eq!(metadata.content_length, Some(2048));
        assert!(metadata.extension_corrected);

        match rx.recv().await.unwrap() {
            AppEvent::Transfer(TransferEvent::ExtensionCorrected { from, to }) => {
                assert_eq!(from, "Bundle.apk");
                assert_eq!(to, "Bundle.xapk");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
