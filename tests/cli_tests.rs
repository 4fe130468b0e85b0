//! CLI integration tests.
//!
//! Runs the compiled binary. Every scenario here fails before the first
//! cluster call, so no cluster (or network endpoint) is required.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn sfdeploy() -> Command {
    let mut cmd = cargo_bin_cmd!("sfdeploy");
    cmd.env_remove("SFDEPLOY_ENDPOINT");
    cmd
}

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    path.push(format!("sfdeploy-cli-test-{nanos}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn test_help() {
    sfdeploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sfdeploy"))
        .stdout(predicate::str::contains("deploy"));
}

#[test]
fn test_version() {
    sfdeploy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sfdeploy"));
}

#[test]
fn test_deploy_help_lists_flags() {
    sfdeploy()
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--remote-url"))
        .stdout(predicate::str::contains("--application-parameters"))
        .stdout(predicate::str::contains("--reconcile-services"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_no_subcommand_prints_help_and_fails() {
    sfdeploy()
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_deploy_without_arguments_names_the_missing_flags() {
    sfdeploy()
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--remote-url"))
        .stderr(predicate::str::contains("--application-parameters"));
}

#[test]
fn test_deploy_rejects_malformed_url() {
    sfdeploy()
        .args([
            "deploy",
            "--remote-url",
            "not a url",
            "--application-parameters",
            "params.xml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote-url"));
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let toml = concat!(
        "[cluster]\n",
        "endpoint = \"\"\n",
        "\n",
        "[provision]\n",
        "timeout_secs = 300\n",
    );

    let path = write_temp_config(toml);
    let assert = sfdeploy()
        .args([
            "deploy",
            "--remote-url",
            "https://packages.example.com/shop.sfpkg",
            "--application-parameters",
            "params.xml",
            "--config",
        ])
        .arg(&path)
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .failure()
        .code(1)
        .stderr(predicate::str::contains("endpoint"));
}

#[test]
fn cli_rejects_zero_timeout_from_config() {
    let toml = concat!("[provision]\n", "timeout_secs = 0\n");

    let path = write_temp_config(toml);
    let assert = sfdeploy()
        .args([
            "deploy",
            "--remote-url",
            "https://packages.example.com/shop.sfpkg",
            "--application-parameters",
            "params.xml",
            "--config",
        ])
        .arg(&path)
        .assert();
    let _ = fs::remove_file(&path);

    assert
        .failure()
        .code(1)
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn cli_fails_when_package_download_is_unreachable() {
    // Port 1 is never listening, so the download fails immediately and the
    // run stops during resolution.
    sfdeploy()
        .args([
            "deploy",
            "--remote-url",
            "http://127.0.0.1:1/shop.sfpkg",
            "--application-parameters",
            "params.xml",
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Deployment failed"));
}
