//! End-to-end CLI command tests driven through the compiled `nw` binary.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nw() -> Command {
    Command::cargo_bin("nw").unwrap()
}

#[test]
fn roles_lists_the_catalog() {
    nw().arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Werewolf"))
        .stdout(predicate::str::contains("Seer"))
        .stdout(predicate::str::contains("10 cards: 7 good, 3 wolf, 0 third"));
}

#[test]
fn rules_lists_the_toggles() {
    nw().arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter_may_skip"))
        .stdout(predicate::str::contains("witch_no_self_save_first_night"))
        .stdout(predicate::str::contains("night one"));
}

#[test]
fn help_names_the_subcommands() {
    nw().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("roles"))
        .stdout(predicate::str::contains("rules"));
}

#[test]
fn play_deals_and_persists() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");

    nw().arg("play")
        .arg("--file")
        .arg(&file)
        .arg("--players")
        .arg("10")
        .write_stdin("status\nbegin\nnight\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Moderating a table of 10"))
        .stdout(predicate::str::contains("Dealing roles"))
        .stdout(predicate::str::contains("Night falls"));

    assert!(file.exists(), "the session snapshot should be persisted");
}

#[test]
fn play_resumes_a_saved_session() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");

    nw().arg("play")
        .arg("--file")
        .arg(&file)
        .write_stdin("quit\n")
        .assert()
        .success();

    nw().arg("play")
        .arg("--file")
        .arg(&file)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resuming saved session"));
}

#[test]
fn play_surfaces_a_role_pool_mismatch() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");

    nw().arg("play")
        .arg("--file")
        .arg(&file)
        .arg("--players")
        .arg("8")
        .write_stdin("begin\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("role pool has 10 cards for 8 seats"));
}
