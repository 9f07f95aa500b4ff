//! Integration tests for apkget CLI

use httpmock::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn apkget() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_apkget"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_cli_version() {
    let output = apkget()
        .arg("--version")
        .output()
        .expect("Failed to execute apkget");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("apkget"));
}

#[test]
fn test_cli_help() {
    let output = apkget()
        .arg("--help")
        .output()
        .expect("Failed to execute apkget");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Resolve and download Android packages"));
    assert!(stdout.contains("--output-dir"));
}

#[test]
fn test_missing_package_exits_with_one() {
    let output = apkget().output().expect("Failed to execute apkget");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.to_lowercase().contains("usage"));
}

#[test]
fn test_download_prints_absolute_path() {
    let origin = MockServer::start();
    let cdn = MockServer::start();
    origin.mock(|when, then| {
        when.method(GET).path("/com.example.app/com.example.app");
        then.status(200).body("<html><body><h1>Example</h1></body></html>");
    });
    cdn.mock(|when, then| {
        when.method(GET)
            .path("/b/APK/com.example.app")
            .query_param("version", "latest");
        then.status(200)
            .header("content-type", "application/vnd.android.package-archive")
            .body("PK\x03\x04payload");
    });

    let out = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let config_path = config_dir.path().join("config.toml");
    std::fs::write(&config_path, "").unwrap();

    let output = apkget()
        .arg("com.example.app")
        .arg("--output-dir")
        .arg(out.path())
        .arg("--config")
        .arg(&config_path)
        .env("APKGET_ORIGIN", origin.base_url())
        .env("APKGET_CDN_ORIGIN", cdn.base_url())
        .output()
        .expect("Failed to execute apkget");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let printed = std::path::PathBuf::from(stdout.trim());
    assert!(printed.is_absolute());
    assert!(printed.ends_with("com.example.app.apk"));
    assert_eq!(std::fs::read(&printed).unwrap(), b"PK\x03\x04payload");
}

#[test]
fn test_not_found_exits_with_one() {
    let origin = MockServer::start();
    origin.mock(|when, then| {
        when.method(GET).path("/com.missing.app/com.missing.app");
        then.status(404);
    });

    let out = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let config_path = config_dir.path().join("config.toml");
    std::fs::write(&config_path, "").unwrap();

    let output = apkget()
        .arg("com.missing.app")
        .arg("--output-dir")
        .arg(out.path())
        .arg("--config")
        .arg(&config_path)
        .env("APKGET_ORIGIN", origin.base_url())
        .output()
        .expect("Failed to execute apkget");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}
