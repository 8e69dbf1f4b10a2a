//! Smoke tests for the amo-probe CLI
//!
//! Everything runs against the built-in mock marketplace.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the amo-probe binary, isolated from the caller's env
fn amo_probe() -> Command {
    let mut cmd = Command::cargo_bin("amo-probe").expect("amo-probe binary should exist");
    for var in [
        "AMO_CONFIG",
        "AMO_BASE_URL",
        "AMO_USER_EMAIL",
        "AMO_USER_PASSWORD",
        "AMO_EDITOR_EMAIL",
        "AMO_EDITOR_PASSWORD",
        "RUST_LOG",
    ] {
        let _ = cmd.env_remove(var);
    }
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    amo_probe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    amo_probe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_args_fails() {
    amo_probe().assert().failure();
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_by_tag() {
    amo_probe()
        .args(["list", "--tag", "themes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("themes::sort_by_name"))
        .stdout(predicate::str::contains("extensions::").not());
}

#[test]
fn test_list_with_tags_column() {
    amo_probe()
        .args(["list", "--filter", "login_logout", "--tags-column"])
        .assert()
        .success()
        .stdout(predicate::str::contains("account::login_logout"))
        .stdout(predicate::str::contains("account,login"));
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_mock_run_passes() {
    amo_probe()
        .args(["run", "--mock", "--tag", "home", "--timeout", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS home::sections_present"))
        .stdout(predicate::str::contains("0 failed"));
}

#[test]
fn test_mock_fault_exits_one() {
    amo_probe()
        .args([
            "run",
            "--mock",
            "--fault",
            "sticky-pagination",
            "--filter",
            "sort_resets_page",
            "--timeout",
            "200",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL extensions::sort_resets_page"));
}

#[test]
fn test_shared_categories_fault_fails_theme_categories() {
    amo_probe()
        .args([
            "run",
            "--mock",
            "--fault",
            "shared-categories",
            "--filter",
            "themes::categories",
            "--timeout",
            "200",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL themes::categories"))
        .stdout(predicate::str::contains("shared with extensions"));
}

#[test]
fn test_json_report_written() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.json");
    amo_probe()
        .args(["run", "--mock", "--tag", "details", "--timeout", "200", "--format", "json", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"run_id\""));

    let body = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let results = json["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r["status"] == "passed"));
}

#[test]
fn test_browser_mode_needs_support_or_mock() {
    if cfg!(feature = "browser") {
        return;
    }
    amo_probe()
        .args(["run", "--tag", "home"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--mock"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_hides_passwords() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("suite.yaml");
    fs::write(
        &path,
        "base_url: https://addons.example.org\nexisting_user:\n  email: qa@example.test\n  password: hunter2\n",
    )
    .unwrap();
    amo_probe()
        .args(["config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://addons.example.org"))
        .stdout(predicate::str::contains("qa@example.test"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_rejects_bad_url() {
    amo_probe()
        .args(["config", "--base-url", "not-a-url"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_config_rejects_password_without_email() {
    amo_probe()
        .args(["config", "--mock"])
        .env("AMO_EDITOR_PASSWORD", "hunter2")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("hunter2").not());
}
