#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for apkget
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/apkget/config.toml)
//! - Environment variables
//! - CLI flags

pub mod constants;
mod sections;

pub use sections::{NetworkConfig, OriginConfig, PathConfig, ServerConfig};

use apkget_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub origin: OriginConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("apkget").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Loading configuration");
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(origin) = std::env::var("APKGET_ORIGIN") {
            self.origin.base_url = parse_base_url("APKGET_ORIGIN", origin)?;
        }

        if let Ok(cdn) = std::env::var("APKGET_CDN_ORIGIN") {
            self.origin.cdn_url = parse_base_url("APKGET_CDN_ORIGIN", cdn)?;
        }

        if let Ok(timeout) = std::env::var("APKGET_PAGE_TIMEOUT") {
            self.network.page_timeout = parse_timeout("APKGET_PAGE_TIMEOUT", timeout)?;
        }

        if let Ok(timeout) = std::env::var("APKGET_ARTIFACT_TIMEOUT") {
            self.network.artifact_timeout = parse_timeout("APKGET_ARTIFACT_TIMEOUT", timeout)?;
        }

        if let Ok(dir) = std::env::var("APKGET_OUTPUT_DIR") {
            if !dir.is_empty() {
                self.paths.output_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(bind) = std::env::var("APKGET_BIND") {
            self.server.bind = bind;
        }

        Ok(())
    }

    /// Get the output directory (with default)
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.paths
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_DIR))
    }
}

fn parse_base_url(field: &str, value: String) -> Result<String, Error> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into())
    }
}

fn parse_timeout(field: &str, value: String) -> Result<u64, Error> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}
