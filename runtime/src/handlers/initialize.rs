//! Initialize phase: one-time telemetry client setup.

use crate::error::ShimError;
use crate::request_log::{Phase, RequestLog};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fc_telemetry::Client;
use std::sync::Arc;

/// Construct and install the telemetry client.
///
/// On success the lifecycle transitions to initialized and the platform
/// gets an empty 200. On construction failure nothing is installed — the
/// instance stays uninitialized and the error surfaces as a 500, never a
/// silent 200. A retried Initialize against an already-initialized instance
/// is an idempotent no-op that keeps the existing client.
#[allow(clippy::unused_async)] // Dispatched uniformly with the async phases
pub(crate) async fn initialize(state: &AppState, request_id: &str) -> Result<Response, ShimError> {
    let _log = RequestLog::start(Phase::Initialize, request_id);

    if state.lifecycle.is_initialized() {
        tracing::warn!(request_id = %request_id, "Initialize retried on an initialized instance; keeping existing client");
        return Ok(StatusCode::OK.into_response());
    }

    let client = Client::connect(state.config.telemetry_config(), Arc::clone(&state.collector))?;
    tracing::info!(app_name = %client.app_name(), "Telemetry client initialized");

    if !state.lifecycle.install(Arc::new(client)) {
        // Lost an install race with a concurrent Initialize; the winner's
        // client stays, which is the same no-op contract as a retry.
        tracing::warn!(request_id = %request_id, "Concurrent Initialize already installed a client");
    }

    Ok(StatusCode::OK.into_response())
}
