use std::process::{Command as StdCommand, Output, Stdio};

use serde_json::Value;
use tempfile::tempdir;

use crate::common::{fixture, BINARY_PATH};

fn run_with_config(config: &str, args: &[&str]) -> Output {
    StdCommand::new(BINARY_PATH)
        .args(args)
        .env("MCP_CONFIG_PATH", fixture(config))
        .env("RUST_LOG", "off")
        .stdin(Stdio::null())
        .output()
        .expect("process should start")
}

fn last_stderr_json(output: &Output) -> Value {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .rev()
        .find(|line| line.trim_start().starts_with('{'))
        .unwrap_or_else(|| panic!("no JSON error on stderr: {stderr}"));
    serde_json::from_str(line).expect("stderr error is JSON")
}

#[test]
fn missing_content_exits_with_content_load_code() {
    let output = run_with_config("tests/fixtures/config_missing_content.toml", &[]);

    assert_eq!(
        output.status.code(),
        Some(65),
        "content load failure exit code (65) expected, got {:?}",
        output.status
    );
    let error = last_stderr_json(&output);
    assert_eq!(error["data"]["code"], "CONTENT_LOAD_FAILED");
    assert_eq!(error["data"]["exit_code"], 65);
}

#[test]
fn invalid_config_exits_with_generic_failure() {
    let output = run_with_config("tests/fixtures/config_invalid_port.toml", &[]);

    assert_eq!(
        output.status.code(),
        Some(1),
        "config failure exit code (1) expected, got {:?}",
        output.status
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("server.port"), "stderr: {stderr}");
}

#[test]
fn endpoints_command_prints_catalog() {
    let output = run_with_config("tests/fixtures/config_valid.toml", &["endpoints"]);

    assert!(output.status.success(), "status: {:?}", output.status);
    let catalog: Value = serde_json::from_slice(&output.stdout).expect("catalog is JSON");
    assert_eq!(catalog["name"], "fastmcp-hackathon");
    assert_eq!(catalog["endpoints"].as_array().map(Vec::len), Some(3));
}

#[test]
fn export_content_then_serve_from_directory() {
    let temp = tempdir().expect("can create temporary directory");
    let destination = temp.path().join("content");
    let destination_arg = destination.display().to_string();

    let export = run_with_config(
        "tests/fixtures/config_valid.toml",
        &["export-content", &destination_arg],
    );
    assert!(export.status.success(), "status: {:?}", export.status);
    for file in [
        "resources/hackathon_overview.md",
        "prompts/fastmcp_python_starter.md",
    ] {
        assert!(destination.join(file).is_file(), "missing {file}");
    }

    let catalog = run_with_config(
        "tests/fixtures/config_valid.toml",
        &["--content-dir", &destination_arg, "endpoints"],
    );
    assert!(catalog.status.success(), "status: {:?}", catalog.status);
    let catalog: Value = serde_json::from_slice(&catalog.stdout).expect("catalog is JSON");
    assert_eq!(
        catalog["content_dir"].as_str(),
        Some(destination_arg.as_str())
    );
}
