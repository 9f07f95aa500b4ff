//! Recommended apps scraped from the store listing

use crate::document::{Document, Query};
use crate::resolver::{parse_or_report, Resolver};
use apkget_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};
use apkget_net::fetch_page;
use apkget_types::AppSummary;
use regex::Regex;
use std::sync::LazyLock;

/// Most entries returned from one listing
pub const CATALOG_LIMIT: usize = 10;

static APP_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[^/]+/[^/]+$").expect("app href pattern is valid"));

impl Resolver {
    /// Up to [`CATALOG_LIMIT`] apps from the store listing
    ///
    /// Never fails: an unreachable listing or one with no usable entries
    /// yields [`fallback_apps`].
    pub async fn recommended_apps(&self, tx: &EventSender) -> Vec<AppSummary> {
        let url = self.catalog_url();

        let page = match fetch_page(self.client(), &url, tx).await {
            Ok(page) if page.is_ok() => page,
            Ok(page) => {
                return self.fallback(&url, &format!("listing returned {}", page.status), tx);
            }
            Err(e) => return self.fallback(&url, &e.to_string(), tx),
        };

        let apps = parse_or_report(&page, tx)
            .map(|doc| read_catalog(&doc, self.bot_image_url()))
            .unwrap_or_default();

        if apps.is_empty() {
            self.fallback(&url, "no app entries found", tx)
        } else {
            apps
        }
    }

    fn fallback(&self, url: &str, reason: &str, tx: &EventSender) -> Vec<AppSummary> {
        tx.emit(AppEvent::Resolver(ResolverEvent::CatalogFallback {
            url: url.to_string(),
            reason: reason.to_string(),
        }));
        fallback_apps(self.bot_image_url())
    }
}

pub(crate) fn read_catalog(doc: &Document, bot_image_url: &str) -> Vec<AppSummary> {
    let title_query = Query::tag("p").class("title");
    let link_query = Query::tag("a").attr_pattern("href", &APP_HREF);
    let img_query = Query::tag("img");

    doc.find_all(&Query::tag("div").class("category-item"))
        .into_iter()
        .filter_map(|item| {
            let title = item.find(&title_query)?.text();
            let href = item.find(&link_query)?.attr("href")?;
            let img = item.find(&img_query)?;

            let package_name = href.rsplit('/').next().unwrap_or(href).to_string();
            let (icon_url, bot_image_used) = match img.attr("src") {
                Some(src) => (src.to_string(), false),
                None => (bot_image_url.to_string(), true),
            };

            Some(AppSummary {
                title,
                package_name,
                icon_url,
                bot_image_used,
            })
        })
        .take(CATALOG_LIMIT)
        .collect()
}

/// Placeholder listing used when the store page yields nothing
#[must_use]
pub fn fallback_apps(bot_image_url: &str) -> Vec<AppSummary> {
    (1..=CATALOG_LIMIT)
        .map(|n| AppSummary {
            title: format!("App {n}"),
            package_name: format!("com.example.app{n}"),
            icon_url: bot_image_url.to_string(),
            bot_image_used: true,
        })
        .collect()
}
