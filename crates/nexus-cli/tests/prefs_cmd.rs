use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_prefs_set_then_get() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["prefs", "set", "greeting", "hello"])
        .assert()
        .success();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["prefs", "get", "greeting"])
        .assert()
        .success()
        .stdout("hello\n");

    let raw = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["greeting"], "hello");
}

#[test]
fn test_prefs_get_missing_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["prefs", "get", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No preference named 'nothing'"));
}

#[test]
fn test_prefs_remove_and_clear() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("prefs.json"),
        r#"{"a": "1", "b": "2", "c": "3"}"#,
    )
    .unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["prefs", "remove", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed a"));

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["prefs", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 preference(s)"));

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["prefs", "get", "b"])
        .assert()
        .failure();
}

#[test]
fn test_theme_toggle_persists() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout("dark\n");

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Light mode activated"));

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout("light\n");
}
