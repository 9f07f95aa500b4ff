//! Listing page → download page → artifact URL

use crate::document::Document;
use crate::strategy::{self, LINK_CHAIN};
use apkget_config::OriginConfig;
use apkget_errors::{Error, NetworkError, ResolveError};
use apkget_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};
use apkget_net::{fetch_page, NetClient, Page};
use apkget_types::{PackageId, ResolutionResult, ResolutionStrategy};
use url::Url;

/// Resolves package identifiers against one origin site
#[derive(Clone)]
pub struct Resolver {
    client: NetClient,
    origin: Url,
    cdn: Url,
    catalog_path: String,
    bot_image_url: String,
}

impl Resolver {
    /// Create a resolver for the configured origin
    ///
    /// # Errors
    ///
    /// Returns an error if the origin or CDN base URL is not a valid
    /// absolute URL.
    pub fn new(client: NetClient, origin: &OriginConfig) -> Result<Self, Error> {
        Ok(Self {
            client,
            origin: parse_base(&origin.base_url)?,
            cdn: parse_base(&origin.cdn_url)?,
            catalog_path: origin.catalog_path.clone(),
            bot_image_url: origin.bot_image_url.clone(),
        })
    }

    #[must_use]
    pub fn client(&self) -> &NetClient {
        &self.client
    }

    /// `{origin}/{id}/{id}`
    #[must_use]
    pub fn listing_url(&self, package: &PackageId) -> String {
        format!("{}/{package}/{package}", base_str(&self.origin))
    }

    pub(crate) fn catalog_url(&self) -> String {
        format!(
            "{}/{}",
            base_str(&self.origin),
            self.catalog_path.trim_start_matches('/')
        )
    }

    pub(crate) fn bot_image_url(&self) -> &str {
        &self.bot_image_url
    }

    /// `{cdn}/b/APK/{id}?version=latest`, with the identifier encoded as a
    /// single path segment
    ///
    /// # Errors
    ///
    /// Returns an error if the CDN base URL cannot carry a path.
    pub fn fallback_url(&self, package: &PackageId) -> Result<Url, Error> {
        let mut url = self.cdn.clone();
        url.path_segments_mut()
            .map_err(|()| NetworkError::InvalidUrl(self.cdn.to_string()))?
            .pop_if_empty()
            .extend(["b", "APK", package.as_str()]);
        url.set_query(Some("version=latest"));
        Ok(url)
    }

    /// Resolve a package identifier to an artifact URL
    ///
    /// Only a non-200 listing page or a network failure is an error. Every
    /// other miss ends in the CDN fallback.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the listing page is not 200, and network
    /// errors from either page fetch unchanged.
    pub async fn resolve(
        &self,
        package: &PackageId,
        tx: &EventSender,
    ) -> Result<ResolutionResult, Error> {
        let listing_url = self.listing_url(package);
        let listing = fetch_page(&self.client, &listing_url, tx).await?;
        if !listing.is_ok() {
            return Err(ResolveError::NotFound {
                package: package.to_string(),
                url: listing_url,
                status: listing.status,
            }
            .into());
        }

        if let Some(download_page) = self.find_download_page(&listing, tx) {
            let page = fetch_page(&self.client, download_page.as_str(), tx).await?;
            if !page.is_ok() {
                tx.emit(AppEvent::Resolver(ResolverEvent::DownloadPageStatus {
                    url: download_page.to_string(),
                    status: page.status,
                }));
            }

            if let Some((url, strategy)) = self.scan_download_page(&page, tx) {
                let result = ResolutionResult::new(url, download_page.as_str(), strategy);
                tx.emit_resolved(
                    package.as_str(),
                    &result.resolved_url,
                    strategy,
                    &result.source_page,
                );
                return Ok(result);
            }
        } else {
            tx.emit(AppEvent::Resolver(ResolverEvent::ControlMissing {
                package: package.to_string(),
                listing_url: listing_url.clone(),
            }));
        }

        let url = self.fallback_url(package)?;
        let result = ResolutionResult::new(url, listing_url, ResolutionStrategy::Fallback);
        tx.emit_resolved(
            package.as_str(),
            &result.resolved_url,
            ResolutionStrategy::Fallback,
            &result.source_page,
        );
        Ok(result)
    }

    fn find_download_page(&self, listing: &Page, tx: &EventSender) -> Option<Url> {
        let doc = parse_or_report(listing, tx)?;
        let (href, matched_by) = strategy::download_control(&doc)?;
        let url = absolutize(&self.origin, &href)?;

        tx.emit(AppEvent::Resolver(ResolverEvent::ControlFound {
            href,
            matched_by: matched_by.as_str().to_string(),
        }));
        Some(url)
    }

    fn scan_download_page(
        &self,
        page: &Page,
        tx: &EventSender,
    ) -> Option<(Url, ResolutionStrategy)> {
        let doc = parse_or_report(page, tx)?;

        for (strategy, scan) in LINK_CHAIN {
            if let Some(link) = scan(&doc) {
                if let Some(url) = absolutize(&self.origin, &link) {
                    return Some((url, *strategy));
                }
                tx.emit_debug(format!("{strategy} candidate is not an http(s) link: {link}"));
            }
            tx.emit(AppEvent::Resolver(ResolverEvent::StrategyMissed {
                strategy: *strategy,
                page: page.url.clone(),
            }));
        }

        None
    }
}

/// Parse a fetched page
///
/// # Errors
///
/// Returns `ParseFailure` when the body is blank or holds no markup.
pub fn parse_page(page: &Page) -> Result<Document, ResolveError> {
    Document::parse(&page.body).ok_or_else(|| {
        let reason = if page.body.trim().is_empty() {
            "empty document"
        } else {
            "no markup"
        };
        ResolveError::ParseFailure {
            url: page.url.clone(),
            reason: reason.to_string(),
        }
    })
}

/// Parse a fetched page, absorbing a failure into a `ParseFailure` event
pub(crate) fn parse_or_report(page: &Page, tx: &EventSender) -> Option<Document> {
    match parse_page(page) {
        Ok(doc) => Some(doc),
        Err(ResolveError::ParseFailure { url, reason }) => {
            tx.emit(AppEvent::Resolver(ResolverEvent::ParseFailure { url, reason }));
            None
        }
        Err(e) => {
            tx.emit_debug(e.to_string());
            None
        }
    }
}

/// Resolve `candidate` against `base`, keeping only `http(s)` results
#[must_use]
pub fn absolutize(base: &Url, candidate: &str) -> Option<Url> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    base.join(candidate)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

fn parse_base(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw).map_err(|e| NetworkError::InvalidUrl(format!("{raw}: {e}")))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(NetworkError::InvalidUrl(raw.to_string()).into())
    }
}

fn base_str(url: &Url) -> &str {
    url.as_str().trim_end_matches('/')
}
