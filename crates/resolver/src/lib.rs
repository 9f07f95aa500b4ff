#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Link resolution for apkget
//!
//! Turns a package identifier into an artifact URL by walking the origin
//! site's listing page and download page. Page scans are plain functions
//! over a parsed [`Document`]; the [`Resolver`] owns fetching, ordering
//! and the CDN fallback.

mod catalog;
mod document;
mod info;
mod resolver;
pub mod strategy;

pub use catalog::{fallback_apps, CATALOG_LIMIT};
pub use document::{Document, Element, Query};
pub use resolver::{absolutize, parse_page, Resolver};
pub use strategy::{ControlMatch, Strategy, LINK_CHAIN};
