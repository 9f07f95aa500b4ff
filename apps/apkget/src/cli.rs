//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// apkget - resolve and download Android packages
#[derive(Parser, Debug)]
#[command(name = "apkget")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and download Android packages from a mirror site")]
#[command(long_about = None)]
pub struct Cli {
    /// Package identifier (e.g. com.example.app)
    pub package: String,

    /// Directory the artifact is written to
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "apkget",
            "com.example.app",
            "--output-dir",
            "/tmp/out",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.package, "com.example.app");
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        assert!(cli.debug);
        assert!(!cli.log_json);
    }

    #[test]
    fn test_package_is_required() {
        assert!(Cli::try_parse_from(["apkget"]).is_err());
    }
}
