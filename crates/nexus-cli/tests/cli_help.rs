use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("nexus")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("prefs"))
        .stdout(predicate::str::contains("theme"))
        .stdout(predicate::str::contains("strength"));
}

#[test]
fn test_prefs_help_shows_subcommands() {
    cargo_bin_cmd!("nexus")
        .args(["prefs", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("nexus")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_tui_without_terminal_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("requires a terminal"));
}

#[test]
fn test_strength_rates_passwords() {
    cargo_bin_cmd!("nexus")
        .args(["strength", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Weak"));

    cargo_bin_cmd!("nexus")
        .args(["strength", "Password1!"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Strong"))
        .stdout(predicate::str::contains("score 5/6"));
}
