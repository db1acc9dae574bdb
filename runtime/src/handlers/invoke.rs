//! Invoke phase: run the function and time its response phases.

use crate::error::ShimError;
use crate::handler::InvocationRequest;
use crate::request_log::{Phase, RequestLog};
use crate::state::AppState;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Drive one invocation through the opaque function handler.
///
/// Requires an initialized lifecycle; an Invoke that arrives first is an
/// ordering violation and is rejected before any transaction is opened.
/// On the happy path exactly one `"invoke"` transaction is recorded, with a
/// `"header"` segment around header construction and a `"body"` segment
/// around body construction. The transaction and any open segment close on
/// drop, so error returns still record what was measured.
pub(crate) async fn invoke(
    state: &AppState,
    request_id: &str,
    request: Request,
) -> Result<Response, ShimError> {
    let _log = RequestLog::start(Phase::Invoke, request_id);

    let client = state.lifecycle.client().ok_or(ShimError::NotInitialized)?;

    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ShimError::Handler(anyhow::Error::new(e)))?;
    let invocation = InvocationRequest {
        request_id: request_id.to_owned(),
        headers: parts.headers,
        body: body.to_vec(),
    };

    let mut txn = client.start_transaction("invoke");

    let segment = txn.start_segment("header");
    let headers = state
        .handler
        .build_headers(&invocation)
        .await
        .map_err(ShimError::Handler)?;
    segment.end();

    let segment = txn.start_segment("body");
    let body = state
        .handler
        .build_body(&invocation)
        .await
        .map_err(ShimError::Handler)?;
    segment.end();

    txn.end();

    Ok((StatusCode::OK, headers, body).into_response())
}
