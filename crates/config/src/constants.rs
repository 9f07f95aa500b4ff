//! Built-in defaults for the origin site and local paths

pub const DEFAULT_ORIGIN: &str = "https://apkpure.com";
pub const DEFAULT_CDN_ORIGIN: &str = "https://d.apkpure.com";

/// Store page scraped for the recommended-apps listing
pub const DEFAULT_CATALOG_PATH: &str = "/store/apps";

/// Icon used for catalog entries without one
pub const DEFAULT_BOT_IMAGE_URL: &str = "https://example.com/bot_image.png";

pub const DEFAULT_OUTPUT_DIR: &str = "downloads";
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

pub const PAGE_TIMEOUT_SECS: u64 = 15;
pub const ARTIFACT_TIMEOUT_SECS: u64 = 120;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Desktop Chrome on Windows
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
