use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("focus_delay_ms = 300"));
    assert!(contents.contains("# forum_file ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_generate_prints_defaults() {
    cargo_bin_cmd!("nexus")
        .args(["config", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("toast_duration_ms = 3000"))
        .stdout(predicate::str::contains("particles = 50"));
}

#[test]
fn test_config_set_writes_value() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["config", "set", "particles", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set particles = 0"));

    let contents = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(contents.contains("particles = 0"));
    assert!(contents.contains("focus_delay_ms = 300"));
}

#[test]
fn test_config_set_rejects_bad_input() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["config", "set", "particles", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for 'particles'"));

    cargo_bin_cmd!("nexus")
        .env("NEXUS_HOME", dir.path())
        .args(["config", "set", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));

    assert!(!dir.path().join("config.toml").exists());
}
