//! Control-path dispatcher.
//!
//! The platform multiplexes lifecycle calls and invocations onto one HTTP
//! endpoint and distinguishes them with the `x-fc-control-path` header.
//! Routing is a pure, case-sensitive function of that header value: the
//! three recognized lifecycle values map to their phases, everything else
//! (absent, empty, unrecognized) is an invocation.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};

/// Header carrying the phase selector.
pub const CONTROL_PATH_HEADER: &str = "x-fc-control-path";

/// Header carrying the platform-assigned request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-fc-request-id";

/// Closed set of phases a request can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPath {
    /// `/initialize`
    Initialize,
    /// `/pre-freeze`
    PreFreeze,
    /// `/pre-stop`
    PreStop,
    /// Any other value, including an absent header.
    Invoke,
}

impl ControlPath {
    /// Classify a control-path header value. Exact, case-sensitive match;
    /// no fallback other than Invoke.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("/initialize") => Self::Initialize,
            Some("/pre-freeze") => Self::PreFreeze,
            Some("/pre-stop") => Self::PreStop,
            _ => Self::Invoke,
        }
    }
}

/// Route one inbound request to exactly one phase handler.
///
/// Bound as the router's fallback so every method and path lands here.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let control_path = request
        .headers()
        .get(CONTROL_PATH_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    // Diagnostic only; routing depends solely on the enum match below.
    tracing::debug!(
        control_path = control_path.as_deref().unwrap_or(""),
        request_id = %request_id,
        "Dispatching request"
    );

    match ControlPath::from_header(control_path.as_deref()) {
        ControlPath::Initialize => handlers::initialize(&state, &request_id)
            .await
            .into_response(),
        ControlPath::PreFreeze => handlers::pre_freeze(&state, &request_id)
            .await
            .into_response(),
        ControlPath::PreStop => handlers::pre_stop(&state, &request_id)
            .await
            .into_response(),
        ControlPath::Invoke => handlers::invoke(&state, &request_id, request)
            .await
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_values_map_to_their_phases() {
        assert_eq!(
            ControlPath::from_header(Some("/initialize")),
            ControlPath::Initialize
        );
        assert_eq!(
            ControlPath::from_header(Some("/pre-freeze")),
            ControlPath::PreFreeze
        );
        assert_eq!(
            ControlPath::from_header(Some("/pre-stop")),
            ControlPath::PreStop
        );
    }

    #[test]
    fn test_absent_header_means_invoke() {
        assert_eq!(ControlPath::from_header(None), ControlPath::Invoke);
    }

    #[test]
    fn test_unrecognized_values_mean_invoke() {
        assert_eq!(ControlPath::from_header(Some("")), ControlPath::Invoke);
        assert_eq!(
            ControlPath::from_header(Some("/warm-up")),
            ControlPath::Invoke
        );
        assert_eq!(
            ControlPath::from_header(Some("initialize")),
            ControlPath::Invoke
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(
            ControlPath::from_header(Some("/Initialize")),
            ControlPath::Invoke
        );
        assert_eq!(
            ControlPath::from_header(Some("/PRE-FREEZE")),
            ControlPath::Invoke
        );
    }
}
