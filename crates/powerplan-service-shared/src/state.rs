//! Application state for HTTP services.
//!
//! Handlers read the dispatch configuration through the shared state rather
//! than the environment, so a running service plans consistently.

use std::sync::Arc;

use powerplan_lib::{DispatchConfig, Error as LibError};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The dispatch configuration failed validation.
    InvalidConfig(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid dispatch configuration: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable; share it via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::post, extract::State};
/// use powerplan_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let config = state.config();
///     // ... dispatch with config
/// }
///
/// let state = AppState::from_env("powerplan").unwrap();
/// let app = Router::new()
///     .route("/productionplan", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DispatchConfig,
    service: String,
}

impl AppState {
    /// Wrap a configuration without validating it.
    ///
    /// The readiness probe reports an invalid configuration as not ready.
    pub fn new(config: DispatchConfig, service: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                service: service.into(),
            }),
        }
    }

    /// Build state from `POWERPLAN_*` environment variables, rejecting an
    /// invalid configuration.
    pub fn from_env(service: impl Into<String>) -> Result<Self, AppStateError> {
        let config = DispatchConfig::from_env();
        config.validate().map_err(AppStateError::InvalidConfig)?;
        tracing::info!(
            account_for_co2 = config.account_for_co2,
            co2_tons_per_mwh = config.co2_tons_per_mwh,
            "dispatch configuration loaded"
        );
        Ok(Self::new(config, service))
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.inner.config
    }

    /// Service name used in metric labels and health responses.
    pub fn service(&self) -> &str {
        &self.inner.service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("service", &self.inner.service)
            .finish()
    }
}
