#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for apkget
//!
//! This crate provides the data model shared by the resolver, the transfer
//! layer and both front ends.

pub mod package;
pub mod resolution;
pub mod transfer;

// Re-export commonly used types
pub use package::{AppInfo, AppSummary, PackageId};
pub use resolution::{ResolutionResult, ResolutionStrategy};
pub use transfer::{TransferMetadata, TransferMode, ARTIFACT_MEDIA_TYPE, CHUNK_SIZE};
pub use url::Url;
