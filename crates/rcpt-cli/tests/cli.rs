//! CLI smoke tests that do not require network access or an API key.

use assert_cmd::Command;
use predicates::prelude::*;

fn rcpt() -> Command {
    let mut cmd = Command::cargo_bin("rcpt").unwrap();
    cmd.env_remove("GEMINI_API_KEY");
    cmd.env_remove("GOOGLE_API_KEY");
    cmd
}

#[test]
fn help_lists_subcommands() {
    rcpt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn scan_fails_for_missing_input_file() {
    rcpt()
        .args(["scan", "no-such-receipt.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn scan_requires_an_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]).unwrap();

    rcpt()
        .arg("scan")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn batch_fails_when_nothing_matches() {
    rcpt()
        .args(["batch", "no-such-dir/*.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_show_prints_the_model() {
    rcpt()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-2.5-flash"));
}

#[test]
fn config_init_writes_a_loadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    rcpt()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("gemini-2.5-flash"));

    // Re-running without --force refuses to clobber.
    rcpt()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
