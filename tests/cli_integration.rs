//! CLI integration tests
//!
//! These tests run the built binary and check:
//! - Command parsing and validation
//! - Output formatting
//! - Exit codes

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn infrascope_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_infrascope"))
}

fn run(args: &[&str]) -> Output {
    Command::new(infrascope_bin())
        .args(args)
        .env_remove("INFRASCOPE_MAX_DEPTH")
        .env_remove("INFRASCOPE_MAX_FILES")
        .env_remove("INFRASCOPE_BLANKET_STATIC")
        .env_remove("INFRASCOPE_RESPECT_GITIGNORE")
        .env_remove("INFRASCOPE_HEURISTIC_LOG")
        .env("INFRASCOPE_LOG_LEVEL", "error")
        .output()
        .expect("Failed to execute infrascope")
}

fn create_service_repo(dir: &TempDir) -> &Path {
    let repo = dir.path();
    fs::write(repo.join("Dockerfile"), "FROM python:3.12\nCMD flask run\n").unwrap();
    fs::write(repo.join("requirements.txt"), "flask==3.0\npymongo==4.6\n").unwrap();
    fs::write(
        repo.join("load-balancer.conf"),
        "upstream backend {\n  server web1:5000;\n}\n",
    )
    .unwrap();
    repo
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("discover"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_discover_json_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_service_repo(&dir);

    let output = run(&["discover", repo.to_str().unwrap(), "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let inventory = &value[0]["inventory"];
    assert_eq!(value[0]["status"], "ok");
    assert_eq!(inventory["docker"]["app_server"], "Flask");
    assert_eq!(inventory["database"][0], "mongodb");
    assert_eq!(inventory["lb"]["servers"][0], "web1:5000");
}

#[test]
fn test_discover_human_output() {
    let dir = TempDir::new().unwrap();
    let repo = create_service_repo(&dir);

    let output = run(&["discover", repo.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Services:"));
    assert!(stdout.contains("mongodb"));
    assert!(stdout.contains("app_server=Flask"));
}

#[test]
fn test_discover_missing_path_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let repo = create_service_repo(&dir);
    let missing = dir.path().join("missing");

    let output = run(&[
        "discover",
        repo.to_str().unwrap(),
        missing.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(1));

    // The healthy repository is still reported
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["status"], "ok");
    assert_eq!(value[1]["status"], "error");
}

#[test]
fn test_discover_requires_path() {
    let output = run(&["discover"]);
    assert!(!output.status.success());
}

#[test]
fn test_discover_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let repo = create_service_repo(&dir);
    let out_dir = TempDir::new().unwrap();
    let out_file = out_dir.path().join("report.yaml");

    let output = run(&[
        "-q",
        "discover",
        repo.to_str().unwrap(),
        "--format",
        "yaml",
        "-o",
        out_file.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&out_file).unwrap();
    assert!(written.contains("status: ok"));
    assert!(written.contains("mongodb"));
}

#[test]
fn test_config_json_output() {
    let output = run(&["config", "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["max_depth"], "unlimited");
    assert_eq!(value["blanket_static_content"], "false");
}

#[test]
fn test_config_rejects_unparsable_environment() {
    let output = Command::new(infrascope_bin())
        .args(["config", "--format", "json"])
        .env("INFRASCOPE_MAX_FILES", "lots")
        .env("INFRASCOPE_LOG_LEVEL", "error")
        .output()
        .expect("Failed to execute infrascope");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_discover_reports_depth_limit() {
    let dir = TempDir::new().unwrap();
    let repo = create_service_repo(&dir);
    fs::create_dir_all(repo.join("svc/worker")).unwrap();
    fs::write(repo.join("svc/worker/requirements.txt"), "redis==5.0\n").unwrap();

    let output = run(&[
        "discover",
        repo.to_str().unwrap(),
        "--max-depth",
        "1",
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let diagnostics = value[0]["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["kind"], "depth_limit");
    assert_eq!(diagnostics[0]["path"], "svc");
    assert!(value[0]["inventory"].get("cache").is_none());
}
