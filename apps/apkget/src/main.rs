//! apkget - resolve and download Android packages
//!
//! Resolves the artifact link for one package identifier, streams the
//! artifact into the output directory and prints the absolute path of the
//! saved file. Diagnostics go to stderr so stdout carries only the path.

mod cli;
mod error;

use crate::cli::Cli;
use crate::error::CliError;
use apkget_config::Config;
use apkget_events::channel;
use apkget_events::logging::forward_to_tracing;
use apkget_ops::{download_to_dir, OpsCtx};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    init_tracing(cli.debug, cli.log_json);

    match run(cli).await {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<PathBuf, CliError> {
    debug!("Starting apkget v{}", env!("CARGO_PKG_VERSION"));

    // defaults, then file, then environment, then flags
    let mut config = Config::load_or_default(cli.config.as_deref())
        .await
        .map_err(CliError::Config)?;
    config.merge_env().map_err(CliError::Config)?;
    apply_cli_config(&mut config, &cli);

    let (tx, rx) = channel();
    let forwarder = tokio::spawn(forward_to_tracing(rx));

    let ctx = OpsCtx::from_config(config, tx)?;
    let result = download_to_dir(&ctx, &cli.package, None).await;

    // closing the channel lets the forwarder drain and exit
    drop(ctx);
    let _ = forwarder.await;

    let report = result?;
    info!(
        package = %report.package,
        strategy = %report.strategy,
        bytes = report.bytes,
        "Download finished"
    );
    Ok(report.path)
}

fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.output_dir {
        config.paths.output_dir = Some(dir.clone());
    }
}

fn init_tracing(debug_enabled: bool, json: bool) {
    let default_filter = if debug_enabled {
        "debug,hyper=info,hyper_util=info,reqwest=info,html5ever=info,selectors=info"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(filter)
            .init();
    }
}
