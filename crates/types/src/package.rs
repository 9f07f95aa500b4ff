//! Package identifiers and scraped application metadata

use apkget_errors::{Error, ResolveError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque package identifier such as `com.example.app`
///
/// Used verbatim to build the listing and fallback URLs. The only
/// validation is that it is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageId(String);

impl PackageId {
    /// Create an identifier from caller input
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::EmptyIdentifier` if the input is empty or whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, Error> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ResolveError::EmptyIdentifier.into());
        }
        Ok(Self(id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename used when the origin does not name the artifact
    ///
    /// Only the last path component of the identifier is used, so the name
    /// never leaves the output directory.
    #[must_use]
    pub fn default_filename(&self) -> String {
        let stem = self
            .0
            .rsplit(['/', '\\'])
            .find(|part| !part.trim().is_empty() && *part != "." && *part != "..")
            .unwrap_or("package");
        format!("{stem}.apk")
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PackageId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PackageId> for String {
    fn from(id: PackageId) -> Self {
        id.0
    }
}

impl std::str::FromStr for PackageId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Application details scraped from the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub package_name: String,
    pub title: String,
    pub version: String,
    pub size: String,
    /// Listing page the details were read from
    pub url: String,
}

/// One entry of the recommended-apps listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSummary {
    pub title: String,
    pub package_name: String,
    pub icon_url: String,
    /// True when the listing had no icon and the bot image stands in
    pub bot_image_used: bool,
}
