//! Link-discovery strategies
//!
//! Each strategy inspects a parsed page and returns a raw candidate link.
//! Candidates are absolutized by the resolver; an unusable candidate counts
//! as a miss.

use crate::document::{Document, Query};
use apkget_types::ResolutionStrategy;
use regex::Regex;
use std::sync::LazyLock;

/// A pure page scan yielding a raw link
pub type Strategy = fn(&Document) -> Option<String>;

/// Strategies tried on the download page, in order
pub const LINK_CHAIN: &[(ResolutionStrategy, Strategy)] = &[
    (ResolutionStrategy::DirectButton, direct_button),
    (ResolutionStrategy::IframeSrc, iframe_src),
    (ResolutionStrategy::MetaRefresh, meta_refresh),
];

static DOWNLOAD_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)download.*btn|btn.*download").expect("download class pattern is valid")
});

static DOWNLOAD_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/download").expect("download href pattern is valid"));

static REFRESH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*refresh\s*$").expect("refresh pattern is valid"));

static REFRESH_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)url\s*=\s*(.+)").expect("refresh url pattern is valid"));

/// How the listing page's download control was located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMatch {
    Class,
    Href,
}

impl ControlMatch {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class_pattern",
            Self::Href => ResolutionStrategy::HrefPattern.as_str(),
        }
    }
}

/// Find the listing page's "go to download" control
///
/// An anchor with a download-button class wins over one whose href merely
/// contains `/download`.
#[must_use]
pub fn download_control(doc: &Document) -> Option<(String, ControlMatch)> {
    let by_class = Query::tag("a")
        .class_pattern(&DOWNLOAD_CLASS)
        .has_attr("href");
    if let Some(href) = doc.find(&by_class).and_then(|a| a.attr("href")) {
        return Some((href.to_string(), ControlMatch::Class));
    }

    let by_href = Query::tag("a").attr_pattern("href", &DOWNLOAD_HREF);
    doc.find(&by_href)
        .and_then(|a| a.attr("href"))
        .map(|href| (href.to_string(), ControlMatch::Href))
}

/// `a#download_link[href]`
#[must_use]
pub fn direct_button(doc: &Document) -> Option<String> {
    doc.find(&Query::tag("a").id("download_link"))
        .and_then(|a| a.attr("href"))
        .map(str::to_string)
}

/// `iframe#iframe_download[src]`
#[must_use]
pub fn iframe_src(doc: &Document) -> Option<String> {
    doc.find(&Query::tag("iframe").id("iframe_download"))
        .and_then(|frame| frame.attr("src"))
        .map(str::to_string)
}

/// URL part of a `<meta http-equiv="refresh" content="0; url=...">`
#[must_use]
pub fn meta_refresh(doc: &Document) -> Option<String> {
    let content = doc
        .find(&Query::tag("meta").attr_pattern("http-equiv", &REFRESH))?
        .attr("content")?;
    refresh_target(content)
}

fn refresh_target(content: &str) -> Option<String> {
    let caps = REFRESH_URL.captures(content)?;
    let target = caps
        .get(1)?
        .as_str()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    (!target.is_empty()).then(|| target.to_string())
}
