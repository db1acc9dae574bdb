//! PreFreeze phase: settle before checkpoint/suspend.

use crate::request_log::{Phase, RequestLog};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Hold the response for the configured settle delay, then acknowledge.
///
/// The delay lets in-flight work drain before the runtime is checkpointed.
/// It never returns early, and because each connection runs its own task it
/// neither blocks nor is interrupted by concurrent Invoke traffic.
pub(crate) async fn pre_freeze(state: &AppState, request_id: &str) -> Response {
    let _log = RequestLog::start(Phase::PreFreeze, request_id);

    let settle = state.config.pre_freeze_settle();
    tracing::debug!(settle_ms = settle.as_millis(), "Settling before freeze");
    tokio::time::sleep(settle).await;

    StatusCode::OK.into_response()
}
