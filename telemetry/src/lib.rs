//! # FC Telemetry
//!
//! Transaction/segment timing capability for the FC runtime shim.
//!
//! This crate provides the narrow observability interface the shim consumes:
//! a [`Client`] that opens named [`Transaction`]s, each containing nested
//! [`Segment`]s for latency attribution, and a [`Collector`] seam that
//! receives completed transactions. The shim never talks to a vendor APM SDK
//! directly; it talks to this interface, and an adapter decides where the
//! timing data goes.
//!
//! ## Core Concepts
//!
//! - **Client**: validated handle, constructed once at initialization
//! - **Transaction**: one end-to-end timing span per invocation
//! - **Segment**: a named sub-span, borrowing its transaction so it can
//!   never outlive it
//! - **Collector**: destination for completed transactions (log, memory, …)
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use fc_telemetry::{Client, LogCollector, TelemetryConfig};
//!
//! let config = TelemetryConfig {
//!     app_name: "demo".to_string(),
//!     license_key: "dev-license".to_string(),
//!     distributed_tracing: true,
//! };
//! let client = Client::connect(config, Arc::new(LogCollector))?;
//!
//! let mut txn = client.start_transaction("invoke");
//! let segment = txn.start_segment("header");
//! // ... timed work ...
//! segment.end();
//! txn.end();
//! # Ok::<(), fc_telemetry::error::TelemetryError>(())
//! ```

pub mod collector;
pub mod transaction;

pub use collector::{Collector, LogCollector, MemoryCollector};
pub use transaction::{CompletedSegment, CompletedTransaction, Segment, Transaction};

use std::sync::Arc;

/// Error types for client construction
pub mod error {
    use thiserror::Error;

    /// Errors that can occur when connecting a telemetry client.
    ///
    /// Construction is the only fallible operation in this crate; once a
    /// client exists, recording is infallible so that telemetry can never
    /// fail an invocation.
    #[derive(Error, Debug)]
    pub enum TelemetryError {
        /// The application name was empty or whitespace.
        #[error("telemetry application name must not be empty")]
        MissingAppName,

        /// The license credential was empty or whitespace.
        #[error("telemetry license key must not be empty")]
        MissingLicenseKey,
    }
}

pub use error::TelemetryError;

/// Configuration for connecting a telemetry [`Client`].
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Application name reported with every transaction.
    pub app_name: String,
    /// Backend credential. Validated for presence only; this crate never
    /// transmits it anywhere.
    pub license_key: String,
    /// Whether distributed tracing is enabled for the backend adapter.
    pub distributed_tracing: bool,
}

/// Validated telemetry handle.
///
/// Cheap to share behind an `Arc`; every transaction it opens reports into
/// the same [`Collector`].
pub struct Client {
    app_name: String,
    distributed_tracing: bool,
    collector: Arc<dyn Collector>,
}

impl Client {
    /// Connect a new client against the given collector.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError`] if the application name or license key is
    /// empty. Callers must treat this as fatal for their tracing setup: a
    /// failed connect yields no client, never a half-configured one.
    pub fn connect(
        config: TelemetryConfig,
        collector: Arc<dyn Collector>,
    ) -> Result<Self, TelemetryError> {
        if config.app_name.trim().is_empty() {
            return Err(TelemetryError::MissingAppName);
        }
        if config.license_key.trim().is_empty() {
            return Err(TelemetryError::MissingLicenseKey);
        }

        tracing::debug!(
            app_name = %config.app_name,
            distributed_tracing = config.distributed_tracing,
            "Telemetry client connected"
        );

        Ok(Self {
            app_name: config.app_name,
            distributed_tracing: config.distributed_tracing,
            collector,
        })
    }

    /// Open a new transaction.
    ///
    /// The transaction reports to this client's collector when ended (or
    /// dropped). Transactions are independent; opening one per concurrent
    /// request is the intended usage.
    #[must_use]
    pub fn start_transaction(&self, name: &str) -> Transaction {
        Transaction::new(name, Arc::clone(&self.collector))
    }

    /// Flush any buffered telemetry in the collector.
    pub fn flush(&self) {
        self.collector.flush();
    }

    /// The application name this client reports under.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Whether distributed tracing was requested at connect time.
    #[must_use]
    pub const fn distributed_tracing(&self) -> bool {
        self.distributed_tracing
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("app_name", &self.app_name)
            .field("distributed_tracing", &self.distributed_tracing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    fn config() -> TelemetryConfig {
        TelemetryConfig {
            app_name: "test-app".to_string(),
            license_key: "test-license".to_string(),
            distributed_tracing: true,
        }
    }

    #[test]
    fn test_connect_succeeds_with_valid_config() {
        let client = Client::connect(config(), Arc::new(MemoryCollector::new())).unwrap();
        assert_eq!(client.app_name(), "test-app");
        assert!(client.distributed_tracing());
    }

    #[test]
    fn test_connect_rejects_empty_app_name() {
        let mut cfg = config();
        cfg.app_name = String::new();
        let err = Client::connect(cfg, Arc::new(MemoryCollector::new())).unwrap_err();
        assert!(matches!(err, TelemetryError::MissingAppName));
    }

    #[test]
    fn test_connect_rejects_blank_license_key() {
        let mut cfg = config();
        cfg.license_key = "   ".to_string();
        let err = Client::connect(cfg, Arc::new(MemoryCollector::new())).unwrap_err();
        assert!(matches!(err, TelemetryError::MissingLicenseKey));
    }

    #[test]
    fn test_transactions_report_to_the_client_collector() {
        let collector = Arc::new(MemoryCollector::new());
        let client = Client::connect(config(), collector.clone()).unwrap();

        client.start_transaction("invoke").end();

        let recorded = collector.take();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].name, "invoke");
    }
}
