//! Application details scraped from the listing page

use crate::document::{Document, Query};
use crate::resolver::{parse_or_report, Resolver};
use apkget_errors::{Error, ResolveError};
use apkget_events::EventSender;
use apkget_net::fetch_page;
use apkget_types::{AppInfo, PackageId};

const UNKNOWN: &str = "Unknown";

impl Resolver {
    /// Fetch the listing page and read title, version and size from it
    ///
    /// Missing fields fall back to the package name for the title and
    /// `"Unknown"` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the listing page is not 200, and network
    /// errors unchanged.
    pub async fn app_info(&self, package: &PackageId, tx: &EventSender) -> Result<AppInfo, Error> {
        let url = self.listing_url(package);
        let page = fetch_page(self.client(), &url, tx).await?;
        if !page.is_ok() {
            return Err(ResolveError::NotFound {
                package: package.to_string(),
                url,
                status: page.status,
            }
            .into());
        }

        let info = match parse_or_report(&page, tx) {
            Some(doc) => read_app_info(&doc, package, url),
            None => AppInfo {
                package_name: package.to_string(),
                title: package.to_string(),
                version: UNKNOWN.to_string(),
                size: UNKNOWN.to_string(),
                url,
            },
        };
        Ok(info)
    }
}

pub(crate) fn read_app_info(doc: &Document, package: &PackageId, url: String) -> AppInfo {
    let text_of = |query: Query| {
        doc.find(&query)
            .map(|el| el.text())
            .filter(|text| !text.is_empty())
    };

    AppInfo {
        package_name: package.to_string(),
        title: text_of(Query::tag("h1").class("title")).unwrap_or_else(|| package.to_string()),
        version: text_of(Query::tag("span").class("version")).unwrap_or_else(|| UNKNOWN.to_string()),
        size: text_of(Query::tag("span").class("fsize")).unwrap_or_else(|| UNKNOWN.to_string()),
        url,
    }
}
