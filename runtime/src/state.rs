//! Application state shared across all HTTP handlers.
//!
//! Everything the phase handlers need is injected here and owned by the
//! HTTP entry point: configuration, the lifecycle state, the telemetry
//! collector, and the opaque function handler. There are no process-wide
//! globals.

use crate::config::Config;
use crate::handler::FunctionHandler;
use crate::lifecycle::Lifecycle;
use fc_telemetry::Collector;
use std::sync::Arc;

/// Shared state handed to every request-handling task.
#[derive(Clone)]
pub struct AppState {
    /// Shim configuration.
    pub config: Arc<Config>,
    /// Lifecycle state; the only cross-request mutable resource.
    pub lifecycle: Arc<Lifecycle>,
    /// Destination for completed telemetry transactions.
    pub collector: Arc<dyn Collector>,
    /// Externally supplied invocation logic.
    pub handler: Arc<dyn FunctionHandler>,
}

impl AppState {
    /// Assemble state for a fresh, uninitialized function instance.
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        collector: Arc<dyn Collector>,
        handler: Arc<dyn FunctionHandler>,
    ) -> Self {
        Self {
            config,
            lifecycle: Arc::new(Lifecycle::new()),
            collector,
            handler,
        }
    }
}
