//! # FC Runtime
//!
//! Execution shim loaded inside a Function Compute worker container to drive
//! one function instance through its lifecycle: initialization, repeated
//! invocation, pre-freeze (suspend before checkpoint/reuse) and pre-stop
//! (teardown before reclamation).
//!
//! The platform's control plane talks to the shim over a single local HTTP
//! endpoint and selects the request kind via the `x-fc-control-path` header
//! rather than the URL path.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        HTTP Entry Point (Axum)          │  ← single fallback route,
//! ├─────────────────────────────────────────┤    all methods and paths
//! │        Control-Path Dispatcher          │  ← x-fc-control-path match
//! ├──────────┬──────────┬─────────┬─────────┤
//! │Initialize│PreFreeze │ PreStop │ Invoke  │  ← phase handlers
//! ├──────────┴──────────┴─────────┴─────────┤
//! │  Lifecycle state · request log pairs ·  │
//! │  fc-telemetry transactions/segments     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle state machine
//!
//! ```text
//! UNINITIALIZED --Initialize(success)--> READY
//! UNINITIALIZED --Initialize(failure)--> FAILED (Invoke rejects)
//! READY --Invoke-->    READY
//! READY --PreFreeze--> READY
//! READY --PreStop-->   STOPPED (platform reclaims the process)
//! ```
//!
//! The dispatcher never enforces arrival ordering; the `Invoke` handler
//! rejects until a successful `Initialize` has installed the telemetry
//! client, and `PreStop` is accepted from any state.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub(crate) mod handlers;
pub mod lifecycle;
pub mod request_log;
pub mod server;
pub mod state;

pub use config::Config;
pub use dispatch::{ControlPath, CONTROL_PATH_HEADER, REQUEST_ID_HEADER};
pub use error::ShimError;
pub use handler::{DemoHandler, FunctionHandler, InvocationRequest};
pub use lifecycle::Lifecycle;
pub use request_log::{Phase, RequestLog};
pub use server::build_router;
pub use state::AppState;
