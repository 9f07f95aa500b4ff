use apkget_types::ResolutionStrategy;
use serde::{Deserialize, Serialize};

/// Link-resolution events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResolverEvent {
    /// An origin page was fetched
    PageFetched { url: String, status: u16 },

    /// The "go to download" control was located on the listing page
    ControlFound {
        href: String,
        /// `class_pattern` or `href_pattern`
        matched_by: String,
    },

    /// No download control on the listing page; the fallback URL will be used
    ControlMissing { package: String, listing_url: String },

    /// The download page answered with a non-success status; its body is still scanned
    DownloadPageStatus { url: String, status: u16 },

    /// A chain step found nothing on the page
    StrategyMissed {
        strategy: ResolutionStrategy,
        page: String,
    },

    /// Markup was empty or unusable; treated as a miss
    ParseFailure { url: String, reason: String },

    /// Resolution finished
    Resolved {
        package: String,
        url: String,
        strategy: ResolutionStrategy,
        source_page: String,
    },

    /// A listing scrape produced no entries and the synthetic list was used
    CatalogFallback { url: String, reason: String },
}
