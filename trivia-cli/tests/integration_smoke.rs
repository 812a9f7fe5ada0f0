//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `trivia` run from an empty HOME and working dir, so no .env is picked up
fn trivia(sandbox: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.current_dir(sandbox.path())
        .env("HOME", sandbox.path())
        .env_remove("DATABASE_URL");
    cmd
}

#[test]
fn test_serve_help() {
    let sandbox = TempDir::new().unwrap();
    trivia(&sandbox)
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_migrate_help() {
    let sandbox = TempDir::new().unwrap();
    trivia(&sandbox)
        .arg("migrate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("seeding default categories"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    let sandbox = TempDir::new().unwrap();
    trivia(&sandbox)
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_without_database_url_fails() {
    let sandbox = TempDir::new().unwrap();
    trivia(&sandbox)
        .args(["serve", "--bind", "127.0.0.1:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}
