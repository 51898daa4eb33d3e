use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("request_timeout_secs ="));
    assert!(contents.contains("[services.albums]"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_keeps_comments() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", dir.path())
        .args(["config", "set-url", "albums", "http://music.local:9000/api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("album service"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url = \"http://music.local:9000/api\""));
    assert!(contents.contains("# Base URL of the user service"));
}

#[test]
fn test_config_set_url_rejects_bad_input() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", dir.path())
        .args(["config", "set-url", "wallet", "http://x/api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown service"));

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", dir.path())
        .args(["config", "set-url", "users", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid user service base URL"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("vitrola")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set-url"));
}
