//! Read-only operations against the origin site

use crate::OpsCtx;
use apkget_errors::Error;
use apkget_types::{AppInfo, AppSummary, PackageId};

/// Title, version and size for a package
///
/// # Errors
///
/// Returns an error if the identifier is empty, the listing page is not
/// found, or the fetch fails.
pub async fn app_info(ctx: &OpsCtx, package: &str) -> Result<AppInfo, Error> {
    let package = PackageId::new(package)?;
    ctx.resolver.app_info(&package, &ctx.tx).await
}

/// Recommended apps from the store listing, or the placeholder listing
pub async fn recommended_apps(ctx: &OpsCtx) -> Vec<AppSummary> {
    ctx.resolver.recommended_apps(&ctx.tx).await
}
