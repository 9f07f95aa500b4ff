//! Integration tests for resolver crate

#[cfg(test)]
mod tests {
    use apkget_config::OriginConfig;
    use apkget_errors::{Error, ErrorKind, ResolveError};
    use apkget_events::{channel, AppEvent, EventReceiver, ResolverEvent};
    use apkget_net::NetClient;
    use apkget_resolver::*;
    use apkget_types::{PackageId, ResolutionStrategy};
    use httpmock::prelude::*;

    const PKG: &str = "com.example.app";

    fn resolver_for(origin: &MockServer, cdn: &MockServer) -> Resolver {
        let config = OriginConfig {
            base_url: origin.base_url(),
            cdn_url: cdn.base_url(),
            ..OriginConfig::default()
        };
        Resolver::new(NetClient::with_defaults().unwrap(), &config).unwrap()
    }

    fn pkg() -> PackageId {
        PackageId::new(PKG).unwrap()
    }

    fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn listing_with_control(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/{PKG}"));
            then.status(200).body(
                r#"<html><body>
                     <a class="nav" href="/">Home</a>
                     <a class="download-start-btn" href="/com.example.app/download">Download APK</a>
                   </body></html>"#,
            );
        });
    }

    #[tokio::test]
    async fn test_direct_button_resolution() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        listing_with_control(&origin);
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/download"));
            then.status(200).body(
                r#"<a id="download_link" href="/files/com.example.app.apk?token=abc">Click here</a>"#,
            );
        });

        let (tx, mut rx) = channel();
        let result = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap();

        assert_eq!(result.strategy, ResolutionStrategy::DirectButton);
        assert_eq!(
            result.resolved_url.as_str(),
            origin.url("/files/com.example.app.apk?token=abc")
        );
        assert_eq!(result.source_page, origin.url(format!("/{PKG}/download")));

        let events = drain(&mut rx);
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Resolver(ResolverEvent::ControlFound { matched_by, .. }) if matched_by == "class_pattern"
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Resolver(ResolverEvent::Resolved {
                strategy: ResolutionStrategy::DirectButton,
                ..
            })
        )));
    }

    #[tokio::test]
    async fn test_iframe_resolution_after_button_miss() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        listing_with_control(&origin);
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/download"));
            then.status(200).body(
                r#"<a id="download_link">No href</a>
                   <iframe id="iframe_download" src="https://cdn.test/b/APK/com.example.app?v=3"></iframe>"#,
            );
        });

        let (tx, mut rx) = channel();
        let result = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap();

        assert_eq!(result.strategy, ResolutionStrategy::IframeSrc);
        assert_eq!(
            result.resolved_url.as_str(),
            "https://cdn.test/b/APK/com.example.app?v=3"
        );
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            AppEvent::Resolver(ResolverEvent::StrategyMissed {
                strategy: ResolutionStrategy::DirectButton,
                ..
            })
        )));
    }

    #[tokio::test]
    async fn test_meta_refresh_resolution() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        listing_with_control(&origin);
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/download"));
            then.status(200).body(
                r#"<html><head><meta http-equiv="refresh" content="0; url=/mirror/app.xapk"></head></html>"#,
            );
        });

        let (tx, _rx) = channel();
        let result = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap();

        assert_eq!(result.strategy, ResolutionStrategy::MetaRefresh);
        assert_eq!(result.resolved_url.as_str(), origin.url("/mirror/app.xapk"));
    }

    #[tokio::test]
    async fn test_foreign_artifact_anchor_uses_fallback() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        listing_with_control(&origin);
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/download"));
            then.status(200).body(
                r#"<a href="/help">Help</a><a href="https://cdn.test/b/XAPK/com.other.game?version=latest">Related</a>"#,
            );
        });

        let (tx, mut rx) = channel();
        let result = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap();

        assert_eq!(result.strategy, ResolutionStrategy::Fallback);
        assert_eq!(
            result.resolved_url.as_str(),
            cdn.url(format!("/b/APK/{PKG}?version=latest"))
        );
        let misses = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, AppEvent::Resolver(ResolverEvent::StrategyMissed { .. })))
            .count();
        assert_eq!(misses, 3);
    }

    #[tokio::test]
    async fn test_no_control_uses_fallback() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/{PKG}"));
            then.status(200).body("<html><body><p>Nothing to click</p></body></html>");
        });

        let (tx, mut rx) = channel();
        let result = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap();

        assert_eq!(result.strategy, ResolutionStrategy::Fallback);
        assert!(result.is_fallback());
        assert_eq!(
            result.resolved_url.as_str(),
            cdn.url(format!("/b/APK/{PKG}?version=latest"))
        );
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            AppEvent::Resolver(ResolverEvent::ControlMissing { .. })
        )));
    }

    #[tokio::test]
    async fn test_broken_download_page_uses_fallback() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        listing_with_control(&origin);
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/download"));
            then.status(503).body("");
        });

        let (tx, mut rx) = channel();
        let result = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap();

        assert_eq!(result.strategy, ResolutionStrategy::Fallback);
        let events = drain(&mut rx);
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Resolver(ResolverEvent::DownloadPageStatus { status: 503, .. })
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            AppEvent::Resolver(ResolverEvent::ParseFailure { .. })
        )));
    }

    #[tokio::test]
    async fn test_javascript_link_is_a_miss() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        listing_with_control(&origin);
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/download"));
            then.status(200)
                .body(r#"<a id="download_link" href="javascript:void(0)">Click</a>"#);
        });

        let (tx, _rx) = channel();
        let result = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap();
        assert_eq!(result.strategy, ResolutionStrategy::Fallback);
    }

    #[tokio::test]
    async fn test_missing_listing_is_not_found() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/{PKG}"));
            then.status(404).body("<html>404</html>");
        });

        let (tx, _rx) = channel();
        let err = resolver_for(&origin, &cdn).resolve(&pkg(), &tx).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Resolve(ResolveError::NotFound { status: 404, .. })
        ));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_app_info() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/{PKG}"));
            then.status(200).body(
                r#"<h1 class="title">Example</h1><span class="version">1.0.3</span>"#,
            );
        });

        let (tx, _rx) = channel();
        let info = resolver_for(&origin, &cdn).app_info(&pkg(), &tx).await.unwrap();

        assert_eq!(info.title, "Example");
        assert_eq!(info.version, "1.0.3");
        assert_eq!(info.size, "Unknown");
        assert_eq!(info.url, origin.url(format!("/{PKG}/{PKG}")));
    }

    #[tokio::test]
    async fn test_app_info_not_found() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        origin.mock(|when, then| {
            when.method(GET).path(format!("/{PKG}/{PKG}"));
            then.status(404);
        });

        let (tx, _rx) = channel();
        let err = resolver_for(&origin, &cdn).app_info(&pkg(), &tx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_recommended_apps_from_listing() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        origin.mock(|when, then| {
            when.method(GET).path("/store/apps");
            then.status(200).body(
                r#"<div class="category-item">
                     <a href="/chat/org.chat.app"><img src="https://img.test/chat.png"></a>
                     <p class="title">Chat</p>
                   </div>"#,
            );
        });

        let (tx, _rx) = channel();
        let apps = resolver_for(&origin, &cdn).recommended_apps(&tx).await;

        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].package_name, "org.chat.app");
        assert!(!apps[0].bot_image_used);
    }

    #[tokio::test]
    async fn test_recommended_apps_fallback() {
        let origin = MockServer::start();
        let cdn = MockServer::start();
        origin.mock(|when, then| {
            when.method(GET).path("/store/apps");
            then.status(500);
        });

        let (tx, mut rx) = channel();
        let apps = resolver_for(&origin, &cdn).recommended_apps(&tx).await;

        assert_eq!(apps.len(), CATALOG_LIMIT);
        assert!(apps.iter().all(|a| a.bot_image_used));
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            AppEvent::Resolver(ResolverEvent::CatalogFallback { .. })
        )));
    }
}
