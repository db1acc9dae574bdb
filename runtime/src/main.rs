//! Function Compute runtime shim binary.
//!
//! Wires the default collaborators (logging telemetry collector, demo
//! function handler) into the shim and serves the platform's control plane
//! on the configured port.

use fc_runtime::config::Config;
use fc_runtime::handler::DemoHandler;
use fc_runtime::server;
use fc_runtime::state::AppState;
use fc_telemetry::LogCollector;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fc_runtime=info,fc_telemetry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Function Compute runtime shim started");

    let config = Arc::new(Config::from_env());
    tracing::info!(
        addr = %config.bind_addr(),
        app_name = %config.telemetry.app_name,
        settle_ms = config.pre_freeze_settle_ms,
        "Configuration loaded"
    );

    let state = AppState::new(
        Arc::clone(&config),
        Arc::new(LogCollector),
        Arc::new(DemoHandler),
    );

    server::serve(config, state).await
}
