#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for apkget
//!
//! This crate owns every HTTP exchange with the origin site: page fetches
//! for the resolver and the artifact transfer that follows resolution.

mod client;
pub mod transfer;

pub use client::{NetClient, NetConfig, Page};
pub use transfer::{
    fetch_artifact, save_to_dir, Artifact, ArtifactBody, ByteStream, SavedArtifact,
};

use apkget_errors::Error;
use apkget_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};

/// Fetch a page and report its status on the event channel
///
/// # Errors
///
/// Returns an error on transport failure or an unreadable body. Non-200
/// statuses are returned as part of the [`Page`].
pub async fn fetch_page(client: &NetClient, url: &str, tx: &EventSender) -> Result<Page, Error> {
    let page = client.fetch_page(url).await?;
    tx.emit(AppEvent::Resolver(ResolverEvent::PageFetched {
        url: page.url.clone(),
        status: page.status,
    }));
    Ok(page)
}
