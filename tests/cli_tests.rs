//! Binary behavior that does not need the Squirrel tools.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("squirrel_installer").unwrap();
    cmd.env_remove("SQUIRREL_VENDOR_DIR")
        .env_remove("SQUIRREL_CERTIFICATE_PASSWORD");
    cmd
}

#[test]
fn test_help_mentions_squirrel() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Squirrel.Windows"));
}

#[test]
fn test_missing_app_directory_is_usage_error() {
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("appDirectory"));
}

#[test]
fn test_app_without_metadata_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .arg("--app-directory")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Neither resources/app folder nor resources/app.asar package were found",
        ));
}

#[test]
fn test_zero_timeout_rejected() {
    cmd()
        .args(["--app-directory", "app", "--timeout", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--timeout"));
}

#[test]
fn test_options_file_with_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let options = dir.path().join("installer.json");
    std::fs::write(&options, r#"{"appDirectory":"app","bogus":true}"#).unwrap();

    cmd()
        .arg("--config")
        .arg(&options)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));
}
