//! Collector seam: where completed transactions go.
//!
//! The shim core records timings through this trait and never learns which
//! backend is behind it. Shipping to a real APM vendor is an adapter
//! concern; this crate provides a logging collector for production-style
//! output and a memory collector for tests.

use crate::transaction::CompletedTransaction;
use std::sync::Mutex;

/// Destination for completed transactions.
///
/// Implementations must be safe to call from concurrent request tasks.
/// `record` is infallible: a telemetry outage must never fail an
/// invocation, so implementations handle their own errors internally.
pub trait Collector: Send + Sync {
    /// Deliver one completed transaction.
    fn record(&self, transaction: CompletedTransaction);

    /// Flush any buffered data. Called on PreStop; default is a no-op.
    fn flush(&self) {}
}

/// Collector that emits one `tracing` event per transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCollector;

impl Collector for LogCollector {
    fn record(&self, transaction: CompletedTransaction) {
        let segments: Vec<String> = transaction
            .segments
            .iter()
            .map(|s| format!("{}={}ms", s.name, s.duration().as_millis()))
            .collect();

        tracing::debug!(
            transaction = %transaction.name,
            duration_ms = transaction.duration().as_millis(),
            segments = %segments.join(","),
            "Transaction completed"
        );
    }

    fn flush(&self) {
        tracing::debug!("Telemetry flush requested");
    }
}

/// Collector that buffers transactions in memory.
///
/// Used by the test suite to assert on exactly what the shim recorded; also
/// usable by embedders that want to inspect timings in-process.
#[derive(Debug, Default)]
pub struct MemoryCollector {
    transactions: Mutex<Vec<CompletedTransaction>>,
}

impl MemoryCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the recorded transactions without clearing them.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the internal lock panicked.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Poisoning means a recording thread panicked
    pub fn transactions(&self) -> Vec<CompletedTransaction> {
        self.transactions.lock().unwrap().clone()
    }

    /// Drain and return all recorded transactions.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the internal lock panicked.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Poisoning means a recording thread panicked
    pub fn take(&self) -> Vec<CompletedTransaction> {
        std::mem::take(&mut *self.transactions.lock().unwrap())
    }

    /// Number of transactions recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the internal lock panicked.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Poisoning means a recording thread panicked
    pub fn len(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }

    /// Whether no transactions have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Collector for MemoryCollector {
    fn record(&self, transaction: CompletedTransaction) {
        if let Ok(mut guard) = self.transactions.lock() {
            guard.push(transaction);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn completed(name: &str) -> CompletedTransaction {
        let now = Instant::now();
        CompletedTransaction {
            name: name.to_string(),
            started_at: now,
            ended_at: now,
            segments: Vec::new(),
        }
    }

    #[test]
    fn test_memory_collector_records_and_takes() {
        let collector = MemoryCollector::new();
        collector.record(completed("a"));
        collector.record(completed("b"));

        assert_eq!(collector.len(), 2);
        let taken = collector.take();
        assert_eq!(taken.len(), 2);
        assert!(collector.is_empty());
    }

    #[test]
    fn test_memory_collector_is_safe_under_concurrent_recording() {
        let collector = Arc::new(MemoryCollector::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let collector = Arc::clone(&collector);
                std::thread::spawn(move || {
                    collector.record(completed(&format!("txn-{i}")));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(collector.len(), 8);
    }

    #[test]
    fn test_log_collector_flush_is_callable() {
        LogCollector.record(completed("invoke"));
        LogCollector.flush();
    }
}
