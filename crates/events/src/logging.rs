//! Structured logging bridge
//!
//! Converts domain events into `tracing` records with structured fields.
//! Front ends call [`forward_to_tracing`] on the receiving half of the
//! channel they handed to the pipeline.

use crate::{AppEvent, EventReceiver, GeneralEvent, ResolverEvent, TransferEvent};
use tracing::{debug, error, info, trace, warn};

/// Log an `AppEvent` at the level reported by `AppEvent::log_level`
pub fn log_event(event: &AppEvent) {
    let level = event.log_level();
    let target = event.log_target();

    match event {
        AppEvent::Resolver(ResolverEvent::Resolved {
            package,
            url,
            strategy,
            source_page,
        }) => {
            info!(
                source = target,
                package = %package,
                url = %url,
                strategy = %strategy,
                source_page = %source_page,
                "Download link resolved"
            );
        }
        AppEvent::Resolver(ResolverEvent::ControlMissing {
            package,
            listing_url,
        }) => {
            info!(
                source = target,
                package = %package,
                listing_url = %listing_url,
                "No download control on listing page, using fallback URL"
            );
        }
        AppEvent::Resolver(ResolverEvent::ParseFailure { url, reason }) => {
            warn!(source = target, url = %url, reason = %reason, "Unusable markup");
        }
        AppEvent::Transfer(TransferEvent::Started {
            url,
            filename,
            content_length,
        }) => {
            info!(
                source = target,
                url = %url,
                filename = %filename,
                content_length = ?content_length,
                "Transfer started"
            );
        }
        AppEvent::Transfer(TransferEvent::Completed { url, bytes, path }) => {
            #[allow(clippy::cast_precision_loss)]
            let megabytes = *bytes as f64 / (1024.0 * 1024.0);
            info!(
                source = target,
                url = %url,
                bytes = bytes,
                size_mb = %format!("{megabytes:.2}"),
                path = ?path,
                "Transfer completed"
            );
        }
        AppEvent::Transfer(TransferEvent::Rejected {
            url,
            status,
            reason,
        }) => {
            error!(
                source = target,
                url = %url,
                status = status,
                reason = %reason,
                "Artifact rejected"
            );
        }
        AppEvent::General(GeneralEvent::Warning { message, context }) => {
            warn!(source = target, message = %message, context = ?context, "Warning");
        }
        AppEvent::General(GeneralEvent::DebugLog { message }) => {
            debug!(source = target, message = %message, "Debug log");
        }
        _ => match level {
            tracing::Level::ERROR => error!(source = target, event = ?event, "Application event"),
            tracing::Level::WARN => warn!(source = target, event = ?event, "Application event"),
            tracing::Level::INFO => info!(source = target, event = ?event, "Application event"),
            tracing::Level::DEBUG => debug!(source = target, event = ?event, "Application event"),
            tracing::Level::TRACE => trace!(source = target, event = ?event, "Application event"),
        },
    }
}

/// Drain the receiver until every sender is dropped, logging each event
pub async fn forward_to_tracing(mut rx: EventReceiver) {
    while let Some(event) = rx.recv().await {
        log_event(&event);
    }
}
