//! Shared infrastructure for powerplan HTTP services.
//!
//! This crate provides the HTTP glue around `powerplan-lib`:
//!
//! - [`AppState`]: Dispatch configuration shared by all handlers
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - [`ProductionPlanRequest`]: Wire-format request with validation
//!
//! # Architecture
//!
//! Handlers stay thin; the dispatch itself lives in `powerplan-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON                                       │
//! │  - Validate the payload                                     │
//! │  - Call powerplan-lib dispatch                              │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixture payloads and a ready-made state
//! for handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_overshoot_corrected, record_plan_calculated,
    record_plan_failed, record_units_dispatched, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_EXCESS_MINIMUM_OUTPUT, PROBLEM_INSUFFICIENT_CAPACITY,
    PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
};
pub use request::{FuelsPayload, PowerplantPayload, ProductionPlanRequest, Validate};
pub use response::{MeritOrderResponse, ServiceResponse};
pub use state::{AppState, AppStateError};
