//! apkget-server - HTTP front end for the apkget pipeline

use apkget_config::Config;
use apkget_errors::UserFacingError;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tokio::net::TcpListener;
use tracing::{error, info};

/// apkget-server - serve package lookups and downloads over HTTP
#[derive(Parser, Debug)]
#[command(name = "apkget-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve package lookups and artifact downloads over HTTP")]
struct Args {
    /// Address to listen on (e.g. 0.0.0.0:8000)
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.debug, args.log_json);

    if let Err(e) = run(args).await {
        error!("Server error: {}", e);
        eprintln!("Error: {}", e.user_message());
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), apkget_errors::Error> {
    let mut config = Config::load_or_default(args.config.as_deref()).await?;
    config.merge_env()?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let listener = TcpListener::bind(config.server.bind.as_str()).await?;
    let address = listener.local_addr()?;
    info!(
        address = %address,
        origin = %config.origin.base_url,
        "apkget-server v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    apkget_server::serve(listener, config, shutdown_signal()).await?;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

fn init_tracing(debug_enabled: bool, json: bool) {
    let default_filter = if debug_enabled {
        "debug,hyper=info,hyper_util=info,reqwest=info,html5ever=info,selectors=info"
    } else {
        "info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
