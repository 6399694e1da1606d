// ABOUTME: End-to-end tests for the stagehand CLI.
// ABOUTME: Runs the binary against temp config directories with assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dir_with_config(yaml: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("stagehand.yml"), yaml).unwrap();
    dir
}

#[test]
fn check_reports_ok() {
    let dir = dir_with_config("units:\n  - descriptor: \"exec:true\"\n");
    Command::cargo_bin("stagehand")
        .unwrap()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"));
}

#[test]
fn check_fails_without_config() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("stagehand")
        .unwrap()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn plan_prints_units_in_merged_order() {
    let dir = dir_with_config(
        r#"
units:
  - descriptor: "exec:second"
    order: 20
  - descriptor: "exec:first"
    order: 10
  - descriptor: "exec:hidden"
    enabled: false
"#,
    );
    let assert = Command::cargo_bin("stagehand")
        .unwrap()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("exec:first").and(predicate::str::contains("exec:second")))
        .stdout(predicate::str::contains("exec:hidden").not());

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let first = stdout.find("exec:first").unwrap();
    let second = stdout.find("exec:second").unwrap();
    assert!(first < second);
}

#[test]
fn plan_json_is_valid_json() {
    let dir = dir_with_config("units:\n  - descriptor: \"exec:true\"\n");
    let assert = Command::cargo_bin("stagehand")
        .unwrap()
        .current_dir(dir.path())
        .args(["plan", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn run_deploys_exec_units() {
    let dir = dir_with_config("units:\n  - descriptor: \"exec:true\"\n");
    Command::cargo_bin("stagehand")
        .unwrap()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deployed 1 unit(s)"));
}

#[test]
fn run_fails_on_failing_unit() {
    let dir = dir_with_config(
        r#"
units:
  - descriptor: "exec:true"
    order: 1
  - descriptor: "exec:false"
    order: 2
"#,
    );
    Command::cargo_bin("stagehand")
        .unwrap()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exec:false"));
}
