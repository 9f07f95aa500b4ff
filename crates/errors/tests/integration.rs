//! Integration tests for error types

#[cfg(test)]
mod tests {
    use apkget_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::Timeout {
            url: "https://example.com".into(),
        };
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
        assert_eq!(err.kind(), ErrorKind::UnknownError);
    }

    #[test]
    fn test_kind_classification() {
        let not_found: Error = ResolveError::NotFound {
            package: "com.example.app".into(),
            url: "https://origin.test/com.example.app/com.example.app".into(),
            status: 404,
        }
        .into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let invalid: Error = TransferError::InvalidArtifact {
            url: "https://cdn.test/b/APK/x".into(),
            content_type: "text/html".into(),
        }
        .into();
        assert_eq!(invalid.kind(), ErrorKind::InvalidArtifact);

        let failed: Error = TransferError::DownloadFailed {
            url: "https://cdn.test/b/APK/x".into(),
            status: 503,
        }
        .into();
        assert_eq!(failed.kind(), ErrorKind::DownloadFailed);
    }

    #[test]
    fn test_error_display() {
        let err = TransferError::DownloadFailed {
            url: "https://cdn.test/a.apk".into(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "download failed: https://cdn.test/a.apk returned 500"
        );
    }

    #[test]
    fn test_user_facing_message() {
        let err: Error = ResolveError::NotFound {
            package: "com.example.app".into(),
            url: "https://origin.test/x".into(),
            status: 404,
        }
        .into();
        assert_eq!(err.user_message(), "application not found: com.example.app");
        assert_eq!(err.user_code(), Some("resolve.not_found"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
        assert!(err.is_retryable());
    }
}
