//! End-to-end tests for the `tally` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    // Keep user configuration out of the tests
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("TALLY_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

const UNBALANCED_VOUCHER: &str = r#"{
    "date": "2021-13-01",
    "description": "Coffee",
    "transactions": [
        {"account_id": 5460, "amount": 4000},
        {"amount": -3000}
    ]
}"#;

#[test]
fn test_validate_reports_errors_and_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("voucher.json"), UNBALANCED_VOUCHER).unwrap();

    tally(&dir)
        .args(["-o", "json", "validate", "voucher.json", "--endpoint", "create_voucher"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""transactions.1.account_id":["transactions.1.account_id is required."]"#))
        .stdout(predicate::str::contains("transactions.*.amount must have a sum equal to 0."))
        .stdout(predicate::str::contains("date must be a date of format '%Y-%m-%d'."))
        .stderr(predicate::str::contains("Validation failed with 3 error(s) at 3 path(s)"));
}

#[test]
fn test_validate_accepts_balanced_voucher() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("voucher.yaml"),
        "date: '2021-01-01'\ndescription: Coffee\ntransactions:\n  - {account_id: 5460, amount: 4000}\n  - {account_id: 1930, amount: -4000}\n",
    )
    .unwrap();

    tally(&dir)
        .args(["validate", "voucher.yaml", "-e", "create_voucher"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No validation errors"));
}

#[test]
fn test_validate_with_rules_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rules.yaml"),
        "signup:\n  email: required|string\n  tags: [array, \"max:2\"]\n",
    )
    .unwrap();
    fs::write(dir.path().join("body.json"), r#"{"email": "a@b.c", "tags": [1, 2, 3]}"#).unwrap();

    tally(&dir)
        .args(["-o", "json", "validate", "body.json", "--rules", "rules.yaml", "--table", "signup"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("tags may not contain more than 2 element(s)."));
}

#[test]
fn test_configured_default_endpoint() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".tally.yaml"), "default_endpoint: login\n").unwrap();
    fs::write(dir.path().join("body.json"), r#"{"username": "admin"}"#).unwrap();

    tally(&dir)
        .args(["-o", "json", "validate", "body.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("password is required."));
}

#[test]
fn test_validate_without_table_shows_help_hint() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("body.json"), "{}").unwrap();

    tally(&dir)
        .args(["validate", "body.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--help"));
}

#[test]
fn test_flatten_lists_every_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("body.json"), r#"{"a": [{"b": 1}], "c": null}"#).unwrap();

    tally(&dir)
        .args(["-o", "json", "flatten", "body.json", "--paths-only"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[\"a\",\"a.0\",\"a.0.b\",\"c\"]\n"));
}

#[test]
fn test_match_lists_paths_in_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("body.json"),
        r#"{"transactions": [{"amount": 1}, {"amount": 2}, {"note": "x"}]}"#,
    )
    .unwrap();

    tally(&dir)
        .args(["-o", "json", "match", "transactions.*.amount", "body.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{\"transactions.0.amount\":1,\"transactions.1.amount\":2}\n"));
}

#[test]
fn test_match_rejects_invalid_pattern() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("body.json"), "{}").unwrap();

    tally(&dir)
        .args(["match", "a..b", "body.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a..b"));
}

#[test]
fn test_endpoints_lists_builtins() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["endpoints", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create_voucher"))
        .stdout(predicate::str::contains("required|integer|sum_equals"));
}

#[test]
fn test_missing_body_file() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["flatten", "nope.json"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tally"));
}
