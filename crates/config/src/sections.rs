//! Configuration sections and their serde defaults

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Origin site locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Base URL of the HTML listing site; relative links resolve against it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL of the direct-download CDN used for the fallback link
    #[serde(default = "default_cdn_url")]
    pub cdn_url: String,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    #[serde(default = "default_bot_image_url")]
    pub bot_image_url: String,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cdn_url: default_cdn_url(),
            catalog_path: default_catalog_path(),
            bot_image_url: default_bot_image_url(),
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Timeout for HTML pages, in seconds
    #[serde(default = "default_page_timeout")]
    pub page_timeout: u64,
    /// Timeout for the artifact download, in seconds
    #[serde(default = "default_artifact_timeout")]
    pub artifact_timeout: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl NetworkConfig {
    #[must_use]
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout)
    }

    #[must_use]
    pub fn artifact_timeout(&self) -> Duration {
        Duration::from_secs(self.artifact_timeout)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            page_timeout: default_page_timeout(),
            artifact_timeout: default_artifact_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Where the CLI saves artifacts (relative paths resolve against the cwd)
    pub output_dir: Option<PathBuf>,
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

// Default value functions for serde
fn default_base_url() -> String {
    constants::DEFAULT_ORIGIN.to_string()
}

fn default_cdn_url() -> String {
    constants::DEFAULT_CDN_ORIGIN.to_string()
}

fn default_catalog_path() -> String {
    constants::DEFAULT_CATALOG_PATH.to_string()
}

fn default_bot_image_url() -> String {
    constants::DEFAULT_BOT_IMAGE_URL.to_string()
}

fn default_page_timeout() -> u64 {
    constants::PAGE_TIMEOUT_SECS
}

fn default_artifact_timeout() -> u64 {
    constants::ARTIFACT_TIMEOUT_SECS
}

fn default_connect_timeout() -> u64 {
    constants::CONNECT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    constants::BROWSER_USER_AGENT.to_string()
}

fn default_bind() -> String {
    constants::DEFAULT_BIND.to_string()
}
