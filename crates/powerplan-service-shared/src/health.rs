//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Whether gas-fired merit includes CO2 (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_for_co2: Option<bool>,

    /// Emission intensity in t/MWh (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2_tons_per_mwh: Option<f64>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            account_for_co2: None,
            co2_tons_per_mwh: None,
        }
    }

    /// Ready status echoing the active dispatch configuration.
    pub fn ready(service: &str, version: &str, account_for_co2: bool, intensity: f64) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            account_for_co2: Some(account_for_co2),
            co2_tons_per_mwh: Some(intensity),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            account_for_co2: None,
            co2_tons_per_mwh: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"powerplan-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once the dispatch configuration validates.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let version = env!("CARGO_PKG_VERSION");
    let config = state.config();

    if let Err(e) = config.validate() {
        let status = HealthStatus::not_ready(state.service(), version, &e.to_string());
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        state.service(),
        version,
        config.account_for_co2,
        config.co2_tons_per_mwh,
    );
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerplan_lib::DispatchConfig;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert!(status.account_for_co2.is_none());
        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("co2")); // skip_serializing_if
    }

    #[test]
    fn test_health_status_not_ready() {
        let status = HealthStatus::not_ready("test-service", "1.0.0", "bad config");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("bad config"));
    }

    #[tokio::test]
    async fn test_ready_with_valid_config() {
        let state = AppState::new(DispatchConfig::default(), "powerplan");
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_ready_with_invalid_config() {
        let state = AppState::new(
            DispatchConfig::default().with_co2_intensity(-1.0),
            "powerplan",
        );
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
