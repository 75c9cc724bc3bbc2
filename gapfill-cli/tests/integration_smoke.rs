//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("gapfill").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("gapfill").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--upload-root"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("gapfill").unwrap();
    cmd.arg("serve").arg("--bind").arg("not-an-address");

    cmd.assert().failure();
}

#[test]
fn test_init_db_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalogue.db");

    let mut cmd = Command::cargo_bin("gapfill").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DATABASE_URL")
        .arg("init-db")
        .arg("--database-url")
        .arg(format!("sqlite://{}", db_path.display()))
        .arg("--seed-demo");

    cmd.assert().success();
    assert!(db_path.is_file());
}
