use std::net::SocketAddr;

use tracing::{error, info};

use powerplan_service::{build_router, port_from_env, SERVICE_NAME};
use powerplan_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, MetricsError,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service(SERVICE_NAME);
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    match init_metrics(&metrics_config) {
        Ok(()) => info!(path = %metrics_config.path, "metrics enabled"),
        Err(MetricsError::Disabled) => info!("metrics disabled"),
        Err(e) => {
            tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics")
        }
    }

    let state = AppState::from_env(SERVICE_NAME).map_err(|e| {
        error!(error = %e, "failed to load dispatch configuration");
        e
    })?;

    let app = build_router(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port_from_env()));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
