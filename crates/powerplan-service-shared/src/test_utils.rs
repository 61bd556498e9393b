//! Test utilities for handler testing.
//!
//! Provides the classic fixture payloads from `docs/fixtures` and a state
//! with the default dispatch configuration.

use std::path::PathBuf;

use powerplan_lib::DispatchConfig;

use crate::request::ProductionPlanRequest;
use crate::state::AppState;

/// Directory holding the JSON payload fixtures.
pub const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures");

/// Fixture payload file names.
pub mod fixture_payloads {
    /// Load 480 MW at 60% wind; covered without correction.
    pub const PAYLOAD1: &str = "payload1.json";

    /// Same fleet without wind; the second gas unit forces an overshoot.
    pub const PAYLOAD2: &str = "payload2.json";

    /// Load 910 MW at 60% wind; both large gas units run.
    pub const PAYLOAD3: &str = "payload3.json";
}

/// State with the default configuration (CO2 accounted, 0.3 t/MWh).
pub fn test_state() -> AppState {
    AppState::new(DispatchConfig::default(), "powerplan-test")
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(FIXTURES_DIR).join(name)
}

/// Read a fixture payload as raw JSON.
///
/// # Panics
///
/// Panics if the fixture is missing or malformed, which indicates a broken
/// test setup.
pub fn fixture_json(name: &str) -> serde_json::Value {
    let path = fixture_path(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {:?}: {}", path, e));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("fixture {:?} is not valid JSON: {}", path, e))
}

/// Read a fixture payload as a typed request.
pub fn fixture_request(name: &str) -> ProductionPlanRequest {
    serde_json::from_value(fixture_json(name))
        .unwrap_or_else(|e| panic!("fixture {} does not match the request schema: {}", name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Validate;

    #[test]
    fn test_fixture_payloads_exist() {
        for name in [
            fixture_payloads::PAYLOAD1,
            fixture_payloads::PAYLOAD2,
            fixture_payloads::PAYLOAD3,
        ] {
            assert!(fixture_path(name).exists(), "missing fixture {name}");
        }
    }

    #[test]
    fn test_fixture_requests_validate() {
        let request = fixture_request(fixture_payloads::PAYLOAD1);
        assert_eq!(request.powerplants.len(), 6);
        assert!(request.validate("req-fixture").is_ok());
    }
}
