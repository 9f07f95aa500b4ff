#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! HTTP service for apkget
//!
//! Exposes package details, the recommended-apps listing and artifact
//! downloads over HTTP. Every request runs the pipeline with its own
//! [`apkget_ops::OpsCtx`], so no client state is shared between requests.

mod error;
mod routes;

pub use error::ApiError;

use apkget_config::Config;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Build the service router
pub fn router(config: Config) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/info/:id", get(routes::info))
        .route("/download/:id", get(routes::download))
        .route("/apps", get(routes::apps))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve on `listener` until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve<F>(listener: TcpListener, config: Config, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown)
        .await
}
