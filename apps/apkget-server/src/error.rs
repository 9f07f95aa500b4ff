//! Mapping pipeline errors onto HTTP responses

use apkget_errors::{Error, ErrorKind, UserFacingError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error returned by a request handler
#[derive(Debug)]
pub enum ApiError {
    /// Failure inside the resolve/transfer pipeline
    Pipeline(Error),
    /// Malformed request parameters
    BadRequest(String),
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::InvalidArtifact => StatusCode::BAD_REQUEST,
                ErrorKind::DownloadFailed | ErrorKind::ParseFailure | ErrorKind::UnknownError => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Pipeline(e) => e.user_message().into_owned(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Pipeline(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %detail, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), detail = %detail, "Request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apkget_errors::{NetworkError, ResolveError, TransferError};

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = Error::from(ResolveError::NotFound {
            package: "com.missing".to_string(),
            url: "https://origin/com.missing/com.missing".to_string(),
            status: 404,
        })
        .into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: ApiError = Error::from(TransferError::InvalidArtifact {
            url: "https://cdn/b/APK/x".to_string(),
            content_type: "text/html".to_string(),
        })
        .into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let failed: ApiError = Error::from(TransferError::DownloadFailed {
            url: "https://cdn/b/APK/x".to_string(),
            status: 403,
        })
        .into();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let network: ApiError = Error::from(NetworkError::Timeout {
            url: "https://origin".to_string(),
        })
        .into();
        assert_eq!(network.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request() {
        let err = ApiError::BadRequest("invalid stream flag".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "invalid stream flag");
    }
}
