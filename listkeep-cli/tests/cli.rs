//! Smoke tests for the listkeep binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("listkeep").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--db-path"))
        .stdout(predicate::str::contains("--production"));
}

#[test]
fn test_invalid_port_env_fails_fast() {
    let mut cmd = Command::cargo_bin("listkeep").unwrap();
    cmd.env("PORT", "not-a-port");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("PORT"));
}

#[test]
fn test_invalid_port_flag_is_rejected() {
    let mut cmd = Command::cargo_bin("listkeep").unwrap();
    cmd.arg("--port").arg("70000");

    cmd.assert().failure();
}
