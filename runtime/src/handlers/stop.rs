//! PreStop phase: last-chance flush before reclamation.

use crate::request_log::{Phase, RequestLog};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Flush buffered telemetry and acknowledge teardown.
///
/// Accepted from any state: an instance that never initialized has nothing
/// to flush, which is logged and otherwise ignored so teardown can proceed.
/// Flush problems are a collector concern and never fail this phase.
#[allow(clippy::unused_async)] // Dispatched uniformly with the async phases
pub(crate) async fn pre_stop(state: &AppState, request_id: &str) -> Response {
    let _log = RequestLog::start(Phase::PreStop, request_id);

    match state.lifecycle.client() {
        Some(client) => client.flush(),
        None => {
            tracing::warn!(request_id = %request_id, "PreStop on an uninitialized instance; nothing to flush");
        }
    }

    StatusCode::OK.into_response()
}
