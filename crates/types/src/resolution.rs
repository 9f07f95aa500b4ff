//! Outcome of link resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Which step of the resolver chain produced the artifact URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// `a#download_link` on the download page
    DirectButton,
    /// `iframe#iframe_download` on the download page
    IframeSrc,
    /// `<meta http-equiv="refresh">` on the download page
    MetaRefresh,
    /// Listing-page control located by its `/download` href rather than
    /// its class. Names that match path on events; never the source of an
    /// artifact URL.
    HrefPattern,
    /// Templated CDN URL, used when every other step missed
    Fallback,
}

impl ResolutionStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectButton => "direct_button",
            Self::IframeSrc => "iframe_src",
            Self::MetaRefresh => "meta_refresh",
            Self::HrefPattern => "href_pattern",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved artifact location. Consumed once by the transfer layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Absolute http(s) URL of the artifact
    pub resolved_url: Url,
    /// Page the URL was read from (the listing page for `Fallback`)
    pub source_page: String,
    pub strategy: ResolutionStrategy,
}

impl ResolutionResult {
    #[must_use]
    pub fn new(resolved_url: Url, source_page: impl Into<String>, strategy: ResolutionStrategy) -> Self {
        Self {
            resolved_url,
            source_page: source_page.into(),
            strategy,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.strategy == ResolutionStrategy::Fallback
    }
}
