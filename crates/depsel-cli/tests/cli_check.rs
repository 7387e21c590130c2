use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("pom.xml"),
        "<project><groupId>org.app</groupId><artifactId>app</artifactId><version>1.0</version></project>",
    )
    .unwrap();
    fs::write(
        tmp.path().join("Depsel.toml"),
        r#"
[[filter]]
include = "com.foo"
exclude = "com.foo:bar"

[[filter]]
include = "*"
"#,
    )
    .unwrap();
    tmp
}

fn depsel_cmd(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("depsel").unwrap();
    cmd.current_dir(tmp.path()).env("HOME", tmp.path());
    cmd
}

#[test]
fn test_check_reports_each_rule() {
    let tmp = project();

    depsel_cmd(&tmp)
        .args(["check", "com.foo:bar:1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("selected by 1 of 2 rules"))
        .stderr(predicate::str::contains("rule #1: seed=yes scope=yes include=yes exclude=yes"));
}

#[test]
fn test_check_single_rule() {
    let tmp = project();

    depsel_cmd(&tmp)
        .args(["check", "com.foo:baz:jar:sources:1.0", "--rule", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("selected by 1 of 1 rules"));
}

#[test]
fn test_check_unknown_rule_fails() {
    let tmp = project();

    depsel_cmd(&tmp)
        .args(["check", "com.foo:baz:1.0", "--rule", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rule #3 does not exist"));
}

#[test]
fn test_check_invalid_coordinate_fails() {
    let tmp = project();

    depsel_cmd(&tmp)
        .args(["check", "com.foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate"));
}
