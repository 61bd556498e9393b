//! Integration tests for the `plan` and `merit` subcommands.
//!
//! These tests use `assert_cmd` to verify:
//! - JSON and text output for the fixture payloads
//! - CSV catalog input with prices given as flags
//! - Exit codes for infeasible and invalid inputs

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("powerplan-cli").expect("binary exists");
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("POWERPLAN_ACCOUNT_FOR_CO2")
        .env_remove("POWERPLAN_CO2_TONS_PER_MWH");
    cmd
}

fn output_of(plan: &serde_json::Value, name: &str) -> f64 {
    plan.as_array()
        .expect("plan is an array")
        .iter()
        .find(|entry| entry["name"] == name)
        .and_then(|entry| entry["p"].as_f64())
        .unwrap_or_else(|| panic!("unit {name} missing from plan"))
}

#[test]
fn plan_payload_as_json_matches_http_shape() {
    let output = cli()
        .args(["plan", "--format", "json", "--payload"])
        .arg(fixture("payload1.json"))
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(plan.as_array().map(Vec::len), Some(6));
    assert_eq!(plan[0]["name"], "windpark1");
    assert!((output_of(&plan, "gasfiredbig1") - 368.4).abs() < 1e-6);
    assert_eq!(output_of(&plan, "tj1"), 0.0);
}

#[test]
fn plan_payload_as_text_prints_totals() {
    cli()
        .arg("plan")
        .arg("--payload")
        .arg(fixture("payload1.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("total 480.0 MW for load 480.0 MW"))
        .stdout(predicate::str::contains("gasfiredbig1"));
}

#[test]
fn plan_reports_corrected_overshoot() {
    cli()
        .arg("plan")
        .arg("--payload")
        .arg(fixture("payload2.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("corrected overshoot of 80.0 MW"));
}

#[test]
fn plan_from_unit_catalog() {
    let output = cli()
        .args(["plan", "--format", "json", "--units"])
        .arg(fixture("units.csv"))
        .args([
            "--load", "910", "--gas", "13.4", "--kerosine", "50.8", "--co2", "20", "--wind", "60",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert!((output_of(&plan, "gasfiredbig1") - 460.0).abs() < 1e-6);
    assert!((output_of(&plan, "gasfiredbig2") - 338.4).abs() < 1e-6);
}

#[test]
fn plan_rejects_catalog_without_prices() {
    cli()
        .arg("plan")
        .arg("--units")
        .arg(fixture("units.csv"))
        .args(["--load", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--gas"));
}

#[test]
fn plan_fails_when_load_exceeds_capacity() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"load": 100, "fuels": {{"gas(euro/MWh)": 10, "kerosine(euro/MWh)": 50,
            "co2(euro/ton)": 20, "wind(%)": 50}},
            "powerplants": [{{"name": "tj", "type": "turbojet",
            "efficiency": 0.3, "pmin": 0, "pmax": 50}}]}}"#
    )
    .expect("write payload");

    cli()
        .arg("plan")
        .arg("--payload")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no feasible plan for load 100 MW"))
        .stderr(predicate::str::contains("exceeds total available capacity"));
}

#[test]
fn plan_fails_on_invalid_wind_percentage() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"load": 10, "fuels": {{"gas(euro/MWh)": 10, "kerosine(euro/MWh)": 50,
            "co2(euro/ton)": 20, "wind(%)": 120}},
            "powerplants": [{{"name": "w", "type": "windturbine",
            "efficiency": 1, "pmin": 0, "pmax": 50}}]}}"#
    )
    .expect("write payload");

    cli()
        .arg("plan")
        .arg("--payload")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid plan request"));
}

#[test]
fn merit_lists_wind_first() {
    let output = cli()
        .args(["merit", "--format", "json", "--payload"])
        .arg(fixture("payload1.json"))
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let names: Vec<&str> = entries
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(names[0], "windpark1");
    assert_eq!(names[1], "windpark2");
    assert_eq!(names[5], "tj1");
}

#[test]
fn merit_no_co2_lowers_gas_merit() {
    let run = |extra: &[&str]| -> f64 {
        let output = cli()
            .args(extra)
            .args(["merit", "--format", "json", "--payload"])
            .arg(fixture("payload1.json"))
            .output()
            .expect("run cli");
        assert!(output.status.success());
        let entries: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("valid JSON");
        entries[2]["merit_cost"].as_f64().expect("merit cost")
    };

    let with_co2 = run(&[]);
    let without_co2 = run(&["--no-co2"]);
    assert!((with_co2 - without_co2 - 6.0).abs() < 1e-9);
}

#[test]
fn merit_text_shows_capacity() {
    cli()
        .arg("merit")
        .arg("--payload")
        .arg(fixture("payload1.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("available capacity"))
        .stdout(predicate::str::contains("windturbine"));
}

#[test]
fn negative_co2_intensity_is_rejected() {
    cli()
        .args(["--co2-intensity=-1", "merit", "--payload"])
        .arg(fixture("payload1.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dispatch configuration"));
}
