use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("vitrola")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("albums"))
        .stdout(predicate::str::contains("wallet"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_albums_help_shows_subcommands() {
    cargo_bin_cmd!("vitrola")
        .args(["albums", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("buy"))
        .stdout(predicate::str::contains("collection"))
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn test_wallet_help_shows_subcommands() {
    cargo_bin_cmd!("vitrola")
        .args(["wallet", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("credit"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("vitrola")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_tui_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
