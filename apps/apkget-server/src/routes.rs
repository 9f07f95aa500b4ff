//! Request handlers

use crate::error::ApiError;
use crate::AppState;
use apkget_events::channel;
use apkget_events::logging::forward_to_tracing;
use apkget_net::ArtifactBody;
use apkget_ops::{app_info, open_download, recommended_apps, OpenDownload, OpsCtx};
use apkget_types::{AppInfo, AppSummary, PackageId, TransferMode, ARTIFACT_MEDIA_TYPE};
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// Query string accepted by `/download/:id`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DownloadParams {
    stream: Option<String>,
}

/// Fresh pipeline context for one request, with its own event forwarder
fn request_context(state: &AppState) -> Result<OpsCtx, ApiError> {
    let (tx, rx) = channel();
    tokio::spawn(forward_to_tracing(rx));
    Ok(OpsCtx::from_config(state.config.as_ref().clone(), tx)?)
}

#[allow(clippy::unused_async)]
pub(crate) async fn root() -> Json<Value> {
    Json(json!({
        "service": "apkget",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "info": "/info/{package_name}",
            "download": "/download/{package_name}?stream=true",
            "apps": "/apps",
            "health": "/health",
        },
    }))
}

#[allow(clippy::unused_async)]
pub(crate) async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "apkget",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn info(
    State(state): State<AppState>,
    Path(package): Path<String>,
) -> Result<Json<AppInfo>, ApiError> {
    let ctx = request_context(&state)?;
    Ok(Json(app_info(&ctx, &package).await?))
}

pub(crate) async fn apps(State(state): State<AppState>) -> Result<Json<Vec<AppSummary>>, ApiError> {
    let ctx = request_context(&state)?;
    Ok(Json(recommended_apps(&ctx).await))
}

/// Resolve and forward the artifact
///
/// With `stream=true` (the default) chunks are relayed as they arrive and
/// `Content-Length` carries the upstream value when one was sent. With
/// `stream=false` the body is buffered first and the length is exact.
pub(crate) async fn download(
    State(state): State<AppState>,
    Path(package): Path<String>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    let mode = match params.stream.as_deref() {
        None => TransferMode::Stream,
        Some(raw) => TransferMode::from_stream_flag(parse_flag(raw)?),
    };

    let ctx = request_context(&state)?;
    let OpenDownload { artifact, .. } = open_download(&ctx, &package, mode).await?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(ARTIFACT_MEDIA_TYPE));
    headers.insert(
        CONTENT_DISPOSITION,
        disposition(&artifact.metadata.filename, &package),
    );
    if let Some(length) = artifact.metadata.content_length {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }

    let body = match artifact.body {
        ArtifactBody::Stream(stream) => Body::from_stream(stream.into_stream()),
        ArtifactBody::Buffer(bytes) => Body::from(bytes),
    };

    Ok((headers, body).into_response())
}

fn parse_flag(raw: &str) -> Result<bool, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ApiError::BadRequest(format!(
            "invalid value for stream: {other}"
        ))),
    }
}

/// `attachment; filename=<name>`, falling back to the package's default
/// name when the derived one is not a valid header value
fn disposition(filename: &str, package: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("attachment; filename={filename}")).unwrap_or_else(|_| {
        let fallback = PackageId::new(package)
            .map_or_else(|_| "download.apk".to_string(), |id| id.default_filename());
        HeaderValue::from_str(&format!("attachment; filename={fallback}"))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
    })
}
