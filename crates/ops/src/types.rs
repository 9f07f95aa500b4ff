//! Operation results shared by the front ends

use apkget_net::Artifact;
use apkget_types::{ResolutionResult, ResolutionStrategy, TransferMetadata};
use serde::Serialize;
use std::path::PathBuf;

/// A resolved and validated artifact whose body has not been consumed yet
#[derive(Debug)]
pub struct OpenDownload {
    pub resolution: ResolutionResult,
    pub artifact: Artifact,
}

/// Summary of an artifact saved to disk
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReport {
    pub package: String,
    /// Absolute path of the written file
    pub path: PathBuf,
    pub resolved_url: String,
    pub strategy: ResolutionStrategy,
    pub metadata: TransferMetadata,
    pub bytes: u64,
}
