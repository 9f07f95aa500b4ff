//! Domain-grouped events

mod general;
mod resolver;
mod transfer;

pub use general::GeneralEvent;
pub use resolver::ResolverEvent;
pub use transfer::TransferEvent;

use serde::{Deserialize, Serialize};

/// Top-level event carried on the `EventSender` channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Link resolution against the origin site
    Resolver(ResolverEvent),

    /// Artifact transfer
    Transfer(TransferEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::OperationFailed { .. })
            | Self::Transfer(TransferEvent::Rejected { .. } | TransferEvent::Aborted { .. }) => {
                Level::ERROR
            }

            Self::General(GeneralEvent::Warning { .. })
            | Self::Resolver(
                ResolverEvent::ParseFailure { .. }
                | ResolverEvent::DownloadPageStatus { .. }
                | ResolverEvent::CatalogFallback { .. },
            ) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Resolver(
                ResolverEvent::StrategyMissed { .. }
                | ResolverEvent::PageFetched { .. }
                | ResolverEvent::ControlFound { .. },
            ) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "apkget::events::general",
            Self::Resolver(_) => "apkget::events::resolver",
            Self::Transfer(_) => "apkget::events::transfer",
        }
    }
}
