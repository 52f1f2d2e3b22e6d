//! Integration tests for the pdpkg CLI surface.
//!
//! Argument validation must reject bad invocations before anything on
//! disk is touched.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pdpkg() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pdpkg"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // arg_required_else_help reports usage on stderr with exit 2
    pdpkg()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("deb"))
        .stderr(predicate::str::contains("rpm"));
}

#[test]
fn test_cli_help_flag_shows_help() {
    pdpkg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--source-dir"))
        .stdout(predicate::str::contains("--staging-dir"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    pdpkg()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdpkg"));
}

// --- Argument validation tests ---

#[test]
fn test_unknown_kind_exits_two() {
    pdpkg()
        .arg("tgz")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unknown_kind_mutates_nothing() {
    let tmp = TempDir::new().expect("tempdir");
    std::fs::create_dir(tmp.path().join("data")).expect("data");
    std::fs::write(tmp.path().join("data/previous.deb"), "artifact").expect("marker");

    pdpkg().current_dir(tmp.path()).arg("tgz").assert().code(2);

    assert!(
        tmp.path().join("data/previous.deb").is_file(),
        "usage errors must leave the staging root untouched"
    );
}

#[test]
fn test_missing_kind_mutates_nothing() {
    let tmp = TempDir::new().expect("tempdir");

    pdpkg().current_dir(tmp.path()).assert().code(2);

    assert!(!tmp.path().join("data").exists());
}

#[test]
fn test_unknown_flag_exits_two() {
    pdpkg().args(["deb", "--bogus"]).assert().code(2);
}

#[test]
fn test_no_color_env_value_is_not_a_parse_error() {
    // The convention is "NO_COLOR present, regardless of value"; any
    // spelling must disable styling, not reject the invocation. With an
    // empty checkout the run reaches layout validation and exits 1.
    let tmp = TempDir::new().expect("tempdir");

    pdpkg()
        .current_dir(tmp.path())
        .env("NO_COLOR", "1")
        .arg("deb")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Scripts directory"));
}

// --- Checkout validation tests ---

#[test]
fn test_missing_checkout_fails_before_staging() {
    let tmp = TempDir::new().expect("tempdir");

    pdpkg()
        .current_dir(tmp.path())
        .arg("deb")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Scripts directory"));

    assert!(
        !tmp.path().join("data").exists(),
        "a missing checkout must not create the staging root"
    );
}
