//! Mock origin and CDN servers serving listing pages and artifacts

use apkget_config::Config;
use apkget_events::{channel, EventReceiver};
use apkget_ops::OpsCtx;
use httpmock::prelude::*;

/// Package identifier used by most scenarios
pub const PACKAGE: &str = "com.example.app";

/// Origin site plus artifact CDN, each on its own port
pub struct MockSite {
    pub origin: MockServer,
    pub cdn: MockServer,
}

impl MockSite {
    pub fn start() -> Self {
        Self {
            origin: MockServer::start(),
            cdn: MockServer::start(),
        }
    }

    /// Default configuration pointed at the mock servers
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.origin.base_url = self.origin.base_url();
        config.origin.cdn_url = self.cdn.base_url();
        config
    }

    pub fn context(&self) -> (OpsCtx, EventReceiver) {
        let (tx, rx) = channel();
        let ctx = OpsCtx::from_config(self.config(), tx).expect("context builds");
        (ctx, rx)
    }

    /// Listing page whose download control leads to `/{package}/download`
    pub fn listing_with_control(&self, package: &str) {
        let path = format!("/{package}/{package}");
        let body = format!(
            r#"<html><body>
                 <h1 class="title">Example</h1>
                 <a class="download-start-btn" href="/{package}/download">Download APK</a>
               </body></html>"#
        );
        self.origin.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(body);
        });
    }

    /// Listing page without any download control
    pub fn bare_listing(&self, package: &str) {
        let path = format!("/{package}/{package}");
        self.origin.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200)
                .body("<html><body><h1 class=\"title\">Example</h1></body></html>");
        });
    }

    pub fn download_page(&self, package: &str, body: &str) {
        let path = format!("/{package}/download");
        let body = body.to_string();
        self.origin.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(body);
        });
    }

    /// Artifact served by the origin at `path`
    pub fn origin_artifact(&self, path: &str, content_type: &str, body: &[u8]) {
        serve_artifact(&self.origin, path, content_type, None, body);
    }

    /// Artifact at the templated fallback location on the CDN
    pub fn fallback_artifact(&self, package: &str, content_type: &str, body: &[u8]) {
        serve_artifact(&self.cdn, &format!("/b/APK/{package}"), content_type, None, body);
    }

    /// Fallback artifact that names itself through `Content-Disposition`
    pub fn named_fallback_artifact(&self, package: &str, disposition: &str, body: &[u8]) {
        serve_artifact(
            &self.cdn,
            &format!("/b/APK/{package}"),
            "application/octet-stream",
            Some(disposition),
            body,
        );
    }
}

fn serve_artifact(
    server: &MockServer,
    path: &str,
    content_type: &str,
    disposition: Option<&str>,
    body: &[u8],
) {
    let path = path.to_string();
    let content_type = content_type.to_string();
    let disposition = disposition.map(str::to_string);
    let body = body.to_vec();
    server.mock(|when, then| {
        when.method(GET).path(path);
        let then = then.status(200).header("content-type", content_type);
        let then = match disposition {
            Some(value) => then.header("content-disposition", value),
            None => then,
        };
        then.body(body);
    });
}
