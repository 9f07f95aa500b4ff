//! HTTP client presenting itself as a desktop browser

use apkget_config::{constants, Config};
use apkget_errors::{Error, NetworkError};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Bound on listing and download page fetches
    pub page_timeout: Duration,
    /// Bound on the artifact request and on each body read after it
    pub artifact_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            page_timeout: Duration::from_secs(constants::PAGE_TIMEOUT_SECS),
            artifact_timeout: Duration::from_secs(constants::ARTIFACT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(constants::CONNECT_TIMEOUT_SECS),
            user_agent: constants::BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl From<&Config> for NetConfig {
    fn from(config: &Config) -> Self {
        Self {
            page_timeout: config.network.page_timeout(),
            artifact_timeout: config.network.artifact_timeout(),
            connect_timeout: Duration::from_secs(config.network.connect_timeout),
            user_agent: config.network.user_agent.clone(),
        }
    }
}

/// A fetched HTML page
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl Page {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// HTTP client wrapper
///
/// Each client owns its own cookie jar, so cookies set while resolving a
/// package are sent back when the artifact is fetched with the same client.
/// Requests are never retried.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(browser_headers())
            .cookie_store(true)
            .build()
            .map_err(|e| NetworkError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Create a client from loaded application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(NetConfig::from(config))
    }

    #[must_use]
    pub fn config(&self) -> &NetConfig {
        &self.config
    }

    /// Fetch an HTML page within the page timeout
    ///
    /// Any status is returned to the caller; only transport failures and
    /// undecodable bodies are errors.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, connection failure, or when the body
    /// cannot be read.
    pub async fn fetch_page(&self, url: &str) -> Result<Page, Error> {
        let request = self.client.get(url).timeout(self.config.page_timeout);
        let response = send(request, url).await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        tracing::debug!(url, final_url = %final_url, status, "Page response");
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                NetworkError::Timeout {
                    url: url.to_string(),
                }
            } else {
                NetworkError::BodyRead {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(Page {
            url: final_url,
            status,
            body,
        })
    }

    /// Start an artifact request and return once headers are available
    ///
    /// The body is left unread. Callers bound each subsequent body read
    /// with [`NetConfig::artifact_timeout`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or headers do not arrive
    /// within the artifact timeout.
    pub async fn fetch_stream(&self, url: &str) -> Result<Response, Error> {
        let request = self.client.get(url);
        match tokio::time::timeout(self.config.artifact_timeout, send(request, url)).await {
            Ok(result) => result,
            Err(_) => Err(NetworkError::Timeout {
                url: url.to_string(),
            }
            .into()),
        }
    }
}

async fn send(request: RequestBuilder, url: &str) -> Result<Response, Error> {
    request.send().await.map_err(|e| {
        NetworkError::from_transport(url, e.to_string(), e.is_timeout(), e.is_connect()).into()
    })
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_timeouts() {
        let config = NetConfig::default();
        assert_eq!(config.page_timeout, Duration::from_secs(15));
        assert_eq!(config.artifact_timeout, Duration::from_secs(120));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers();
        assert!(headers.contains_key(header::ACCEPT));
        assert!(headers.contains_key(header::ACCEPT_LANGUAGE));
    }
}
