//! Process-wide lifecycle state.
//!
//! Holds the single shared mutable resource of the shim: the telemetry
//! client installed by the Initialize phase. "Initialized" and "client
//! present" are one state by construction, so the `sinkClient non-null iff
//! initialized` invariant cannot be violated.
//!
//! Writes happen only through [`Lifecycle::install`] (Initialize handler);
//! all other phases read. The `RwLock` gives the required visibility
//! guarantee even if the platform violates its own ordering contract and
//! races an Invoke against Initialize.

use fc_telemetry::Client;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared lifecycle state for one function instance.
#[derive(Debug, Default)]
pub struct Lifecycle {
    client: RwLock<Option<Arc<Client>>>,
}

impl Lifecycle {
    /// Create an uninitialized lifecycle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether Initialize has completed successfully.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.read().is_some()
    }

    /// The installed telemetry client, if any.
    #[must_use]
    pub fn client(&self) -> Option<Arc<Client>> {
        self.read()
    }

    /// Install the telemetry client, transitioning to the initialized state.
    ///
    /// Returns `true` if this call performed the transition. If a client is
    /// already installed, the existing one is kept and `false` is returned;
    /// a retried Initialize is an idempotent no-op, never an inconsistent
    /// overwrite.
    pub fn install(&self, client: Arc<Client>) -> bool {
        let mut guard = self
            .client
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return false;
        }
        *guard = Some(client);
        true
    }

    fn read(&self) -> Option<Arc<Client>> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
