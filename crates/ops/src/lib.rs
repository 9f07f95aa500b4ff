#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for apkget
//!
//! This crate is the layer between the front ends (CLI and HTTP service)
//! and the resolver and transfer crates. Every operation takes an
//! [`OpsCtx`] and reports progress through its event channel.

mod context;
mod download;
mod info;
mod types;

pub use context::{OpsContextBuilder, OpsCtx};
pub use download::{download_to_dir, open_download, resolve};
pub use info::{app_info, recommended_apps};
pub use types::{DownloadReport, OpenDownload};
