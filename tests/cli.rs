use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn costsim() -> Command {
    let mut cmd = Command::cargo_bin("costsim").unwrap();
    // Keep test output free of log lines and ignore any ambient configuration.
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn lists_fixtures() {
    costsim()
        .arg("fixtures")
        .assert()
        .success()
        .stdout(predicate::str::contains("kitchen-remodel"));
}

#[test]
fn simulates_fixture_as_json() {
    let output = costsim()
        .args(["simulate", "--fixture", "kitchen-remodel", "--seed", "42", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["iterations"], 1000);
    assert_eq!(summary["seed"], 42);
    assert!(summary["topRisks"].as_array().unwrap().len() <= 5);
    assert!(summary["p50"].as_f64().unwrap() < summary["p80"].as_f64().unwrap());
}

#[test]
fn simulates_items_file_as_table() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[{{"id": "fixed", "description": "Fixed-price supply", "quantity": 500,
             "unit_cost_low": 1.25, "unit_cost_likely": 1.25, "unit_cost_high": 1.25}}]"#
    )
    .unwrap();

    costsim()
        .args(["simulate", "--iterations", "200", "--seed", "1", "--items"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("$625.00"))
        .stdout(predicate::str::contains("No line item carries cost uncertainty."));
}

#[test]
fn reports_invalid_distribution() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[{{"id": "backwards", "quantity": 1, "unit_cost_low": 10, "unit_cost_likely": 5, "unit_cost_high": 20}}]"#
    )
    .unwrap();

    costsim()
        .args(["simulate", "--items"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("backwards"));
}

#[test]
fn requires_an_input_source() {
    costsim().arg("simulate").assert().failure();
}
