mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn jt() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jt"))
}

#[test]
fn e2e_help_lists_commands() {
    jt().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("sprints"))
        .stdout(predicate::str::contains("branch"));
}

#[test]
fn e2e_list_help_carries_the_filter_contract() {
    let assert = jt().args(["list", "--help"]).assert().success();
    let output = assert.get_output().stdout.clone();
    let help = String::from_utf8_lossy(&output);
    for flag in [
        "--mine",
        "--assignee",
        "--status",
        "--type",
        "--empty",
        "--jql",
        "--limit",
        "--all",
        "--sprint",
        "--backlog",
        "--json",
    ] {
        assert!(help.contains(flag), "missing flag {flag} in list --help");
    }
}

#[test]
fn e2e_unknown_flag_fails_fast() {
    jt().args(["list", "--definitely-not-a-flag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
