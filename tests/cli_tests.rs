//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use siteplan::testkit::domain::{campus_records, without_lane, OPTIMAL_TOTAL};
use support::assert_near;
use support::workspace::{campus_config, Workspace};

fn siteplan() -> Command {
    cargo_bin_cmd!("siteplan")
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("stdout is one JSON document")
}

#[test]
fn test_help() {
    siteplan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("solve"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_solve_reports_plan() {
    let workspace = Workspace::campus();

    siteplan()
        .args(["--color", "never", "solve", "--config"])
        .arg(workspace.config_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Optimal"))
        .stdout(predicate::str::contains("Total annual cost"))
        .stdout(predicate::str::contains("WH_SOUTH"))
        .stdout(predicate::str::contains("n/a"));
}

#[test]
fn test_solve_json_emits_plan() {
    let workspace = Workspace::campus();

    let output = siteplan()
        .args(["--json", "solve", "--config"])
        .arg(workspace.config_path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = json_stdout(&output);
    assert_eq!(value["status"], "optimal");
    assert_near(
        value["plan"]["costs"]["total"].as_f64().unwrap(),
        OPTIMAL_TOTAL,
        1e-4,
    );
    let open: Vec<&str> = value["plan"]["sites"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["open"] == true)
        .map(|s| s["warehouse"].as_str().unwrap())
        .collect();
    assert_eq!(open, ["WH_SOUTH", "WH_EAST"]);
}

#[test]
fn test_solve_budget_override_exits_with_status_two() {
    let workspace = Workspace::campus();

    siteplan()
        .args(["--color", "never", "solve", "--budget", "500000", "--config"])
        .arg(workspace.config_path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Infeasible"));
}

#[test]
fn test_solve_missing_lane_exits_with_error() {
    let workspace = Workspace::with_records(&without_lane(campus_records(), "WH_NORTH", "LIBRARY"));

    siteplan()
        .args(["solve", "--config"])
        .arg(workspace.config_path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("WH_NORTH -> LIBRARY"));
}

#[test]
fn test_solve_writes_network_map() {
    let workspace = Workspace::campus();
    let map_path = workspace.path().join("map.json");

    siteplan()
        .args(["--quiet", "solve", "--config"])
        .arg(workspace.config_path())
        .arg("--map")
        .arg(&map_path)
        .assert()
        .success();

    let map: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&map_path).unwrap()).unwrap();
    let flows = map["flows"].as_array().unwrap();
    assert!(!flows.is_empty());
    let heaviest = flows
        .iter()
        .map(|f| f["weight"].as_f64().unwrap())
        .fold(f64::MIN, f64::max);
    assert_near(heaviest, 6.0, 1e-9);
    assert_eq!(map["warehouses"].as_array().unwrap().len(), 3);
}

#[test]
fn test_check_config_accepts_campus_config() {
    let workspace = Workspace::campus();

    siteplan()
        .args(["--color", "never", "check", "config", "--config"])
        .arg(workspace.config_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"));
}

#[test]
fn test_check_config_rejects_zero_sites() {
    let workspace = Workspace::campus();
    workspace.write_config(&campus_config(1_500_000.0, 0));

    siteplan()
        .args(["check", "config", "--config"])
        .arg(workspace.config_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("site_count"));
}

#[test]
fn test_check_data_reports_model_size() {
    let workspace = Workspace::campus();

    let output = siteplan()
        .args(["--json", "check", "data", "--config"])
        .arg(workspace.config_path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = json_stdout(&output);
    assert_eq!(value["variables"], 21);
    assert_eq!(value["integer_variables"], 3);
    // 6 demand rows, 3 capacity rows, cardinality, budget
    assert_eq!(value["constraints"], 11);
}

#[test]
fn test_check_data_flags_insufficient_capacity() {
    let workspace = Workspace::campus();

    siteplan()
        .args(["check", "data", "--config"])
        .arg(workspace.config_path())
        .assert()
        .success();

    workspace.write_config(&campus_config(1_500_000.0, 1));
    siteplan()
        .args(["check", "data", "--config"])
        .arg(workspace.config_path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("infeasible by construction"));
}

#[test]
fn test_missing_config_file_fails() {
    let workspace = Workspace::campus();

    siteplan()
        .args(["solve", "--config"])
        .arg(workspace.path().join("nope.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read config file"));
}
