#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use powerplan_lib::{PlanRequest, ProductionPlan};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn load_payload(name: &str) -> PlanRequest {
    let path = fixtures_dir().join(name);
    let payload = fs::read_to_string(&path).expect("read fixture payload");
    let request = PlanRequest::from_json(&payload).expect("fixture payload parses");
    request.validate().expect("fixture payload is valid");
    request
}

pub fn assert_output(plan: &ProductionPlan, name: &str, expected: f64) {
    let actual = plan
        .get(name)
        .unwrap_or_else(|| panic!("unit {name} missing from plan"));
    assert!(
        (actual - expected).abs() < 1e-6,
        "unit {name}: expected {expected} MW, got {actual} MW"
    );
}
