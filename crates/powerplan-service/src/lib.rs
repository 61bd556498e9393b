//! Production plan HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /productionplan` - Compute the production plan for a payload
//! - `POST /api/v1/merit-order` - Inspect the merit order for a payload
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8888)
//! - `POWERPLAN_ACCOUNT_FOR_CO2` - Include CO2 cost in gas merit (default: true)
//! - `POWERPLAN_CO2_TONS_PER_MWH` - Gas emission intensity (default: 0.3)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint settings

#![deny(warnings)]

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use powerplan_service_shared::{
    health_live, health_ready, metrics_handler, AppState, MetricsConfig, MetricsLayer,
};

pub use handlers::{merit_order, production_plan};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8888;

/// Service name used in logs, metric labels and health responses.
pub const SERVICE_NAME: &str = "powerplan";

/// Read `SERVICE_PORT`, falling back to [`DEFAULT_PORT`].
pub fn port_from_env() -> u16 {
    std::env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Build the service router.
///
/// The metrics route is mounted only when metrics are enabled.
pub fn build_router(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route("/productionplan", post(production_plan))
        .route("/api/v1/merit-order", post(merit_order))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router.layer(MetricsLayer).with_state(state)
}
