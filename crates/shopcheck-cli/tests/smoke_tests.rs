//! Smoke tests for the shopcheck binary
//!
//! Nothing here starts a browser: `list` and `verify` are offline.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, run inside a scratch directory so logs land there
fn shopcheck(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shopcheck").expect("shopcheck binary should exist");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI
// ============================================================================

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("verify"));
}

#[test]
fn test_no_args_fails() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir).assert().failure();
}

#[test]
fn test_run_help_shows_flags() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--fail-fast"))
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--headed"));
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_all() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("home_page_ui"))
        .stdout(predicate::str::contains("full_purchase"));
}

#[test]
fn test_list_filter_json() {
    let dir = TempDir::new().unwrap();
    let output = shopcheck(&dir)
        .args(["list", "--filter", "sort", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_log_file_is_written() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir).arg("list").assert().success();
    assert!(dir.path().join("Logs").join("logfile.log").exists());
}

// ============================================================================
// verify
// ============================================================================

#[test]
fn test_verify_price_ok() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args([
            "verify",
            "price",
            "--item",
            "Sauce Labs Backpack=$29.99",
            "--item",
            "Sauce Labs Bike Light=$9.99",
            "--subtotal",
            "Item total: $39.98",
            "--tax",
            "Tax: $3.20",
            "--total",
            "Total: $43.18",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("MISMATCH").not());
}

#[test]
fn test_verify_price_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args([
            "verify", "price", "--item", "$29.99", "--subtotal", "$29.99", "--tax", "$2.39",
            "--total", "$32.38",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tax"));
}

#[test]
fn test_verify_sort_ok() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args(["verify", "sort", "--mode", "Price (low to high)", "$7.99", "$9.99", "$15.99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sorted"));
}

#[test]
fn test_verify_sort_wrong_direction_fails() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args(["verify", "sort", "--mode", "hilo", "$7.99", "$9.99", "$15.99"])
        .assert()
        .failure();
}

#[test]
fn test_verify_sort_unknown_option() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args(["verify", "sort", "--mode", "Unknown Option", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported sort mode"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_unknown_filter_fails_before_launch() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args(["run", "--filter", "no_such_scenario"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_run_missing_config_file() {
    let dir = TempDir::new().unwrap();
    shopcheck(&dir)
        .args(["run", "--config", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}
