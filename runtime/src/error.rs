//! Error types for the phase handlers.
//!
//! Bridges shim-internal failures to HTTP responses via Axum's
//! `IntoResponse`. Responses carry a stable error code and a short message;
//! internals are logged, never leaked to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fc_telemetry::TelemetryError;
use serde::Serialize;
use thiserror::Error;

/// Failures a phase handler can surface to the platform.
#[derive(Error, Debug)]
pub enum ShimError {
    /// Invoke arrived before a successful Initialize (ordering violation).
    ///
    /// The platform owns retry policy; the shim only reports the violation.
    #[error("function instance is not initialized")]
    NotInitialized,

    /// Telemetry client construction failed during Initialize.
    ///
    /// Fatal for the instance: lifecycle state is left untouched, so every
    /// subsequent Invoke keeps rejecting until a retried Initialize succeeds.
    #[error("telemetry initialization failed: {0}")]
    Init(#[from] TelemetryError),

    /// The opaque invocation handler returned an error.
    #[error("invocation handler failed")]
    Handler(#[source] anyhow::Error),
}

impl ShimError {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            Self::Init(_) | Self::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code for the platform's log pipeline.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::Init(_) => "INITIALIZATION_FAILED",
            Self::Handler(_) => "HANDLER_FAILED",
        }
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Stable error code.
    code: &'static str,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for ShimError {
    fn into_response(self) -> Response {
        let status = self.status();

        // All shim errors are server-side; log them with their source.
        match &self {
            Self::Handler(source) => {
                tracing::error!(status = %status, code = self.code(), error = %source, "Invocation handler failed");
            }
            other => {
                tracing::error!(status = %status, code = other.code(), error = %other, "Phase handler failed");
            }
        }

        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
