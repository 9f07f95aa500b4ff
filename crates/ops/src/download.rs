//! Resolve-then-transfer pipeline

use crate::{DownloadReport, OpenDownload, OpsCtx};
use apkget_errors::Error;
use apkget_events::EventEmitter;
use apkget_net::{fetch_artifact, save_to_dir};
use apkget_types::{PackageId, ResolutionResult, TransferMode};
use std::path::Path;

/// Resolve a package identifier without fetching the artifact
///
/// # Errors
///
/// Returns an error if the identifier is empty, the listing page is not
/// found, or a page fetch fails.
pub async fn resolve(ctx: &OpsCtx, package: &str) -> Result<ResolutionResult, Error> {
    let package = PackageId::new(package)?;
    ctx.resolver.resolve(&package, &ctx.tx).await
}

/// Resolve a package and open its artifact in the requested mode
///
/// In [`TransferMode::Stream`] the caller owns the body and must drive it
/// to completion or drop it.
///
/// # Errors
///
/// Returns resolution errors, `InvalidArtifact` for an HTML response and
/// `DownloadFailed` for any other non-200 artifact response.
pub async fn open_download(
    ctx: &OpsCtx,
    package: &str,
    mode: TransferMode,
) -> Result<OpenDownload, Error> {
    let operation = format!("download:{}", package.trim());
    ctx.emit_operation_started(&operation);

    let result = open(ctx, package, mode).await;
    match &result {
        Ok(_) => ctx.emit_operation_completed(&operation, true),
        Err(e) => ctx.emit_operation_failed(&operation, e.to_string()),
    }
    result
}

async fn open(ctx: &OpsCtx, package: &str, mode: TransferMode) -> Result<OpenDownload, Error> {
    let package = PackageId::new(package)?;
    let resolution = ctx.resolver.resolve(&package, &ctx.tx).await?;
    let artifact = fetch_artifact(
        &ctx.net,
        &resolution.resolved_url,
        &package,
        mode,
        &ctx.tx,
    )
    .await?;

    Ok(OpenDownload {
        resolution,
        artifact,
    })
}

/// Resolve, fetch and save a package into `dir`
///
/// Uses the configured output directory when `dir` is `None`. The body is
/// streamed to disk chunk by chunk.
///
/// # Errors
///
/// Returns any pipeline error, or an I/O error if the file cannot be
/// written.
pub async fn download_to_dir(
    ctx: &OpsCtx,
    package: &str,
    dir: Option<&Path>,
) -> Result<DownloadReport, Error> {
    let output_dir = dir.map_or_else(|| ctx.config.output_dir(), Path::to_path_buf);
    let OpenDownload {
        resolution,
        artifact,
    } = open_download(ctx, package, TransferMode::Stream).await?;

    let metadata = artifact.metadata.clone();
    let saved = save_to_dir(artifact, &output_dir, &ctx.tx).await?;
    tracing::debug!(path = %saved.path.display(), bytes = saved.bytes, "Artifact saved");

    Ok(DownloadReport {
        package: package.trim().to_string(),
        path: saved.path,
        resolved_url: resolution.resolved_url.to_string(),
        strategy: resolution.strategy,
        metadata,
        bytes: saved.bytes,
    })
}
