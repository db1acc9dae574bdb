//! Transaction and segment timing spans.
//!
//! A [`Transaction`] is one end-to-end timing span; [`Segment`]s are named
//! sub-spans that borrow their transaction, so the borrow checker enforces
//! the nesting invariant: a segment can never outlive its parent, and
//! segments from one transaction can never be attached to another.
//!
//! Both spans close on drop. An early return or panic in the middle of
//! timed work therefore still produces a complete record.

use crate::collector::Collector;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A finished segment, as delivered to the collector.
#[derive(Debug, Clone)]
pub struct CompletedSegment {
    /// Segment name. Names need not be unique within a transaction.
    pub name: String,
    /// When the segment was opened.
    pub started_at: Instant,
    /// When the segment was closed.
    pub ended_at: Instant,
}

impl CompletedSegment {
    /// Wall-clock duration of the segment.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.ended_at.duration_since(self.started_at)
    }
}

/// A finished transaction, as delivered to the collector.
///
/// Invariant: `ended_at` is at or after `started_at` and at or after every
/// segment's `ended_at`, because segments close before the transaction does.
#[derive(Debug, Clone)]
pub struct CompletedTransaction {
    /// Transaction name.
    pub name: String,
    /// When the transaction was opened.
    pub started_at: Instant,
    /// When the transaction was closed.
    pub ended_at: Instant,
    /// Segments in the order they were closed.
    pub segments: Vec<CompletedSegment>,
}

impl CompletedTransaction {
    /// Wall-clock duration of the transaction.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.ended_at.duration_since(self.started_at)
    }
}

/// An open timing span for one unit of work.
///
/// Created via [`Client::start_transaction`](crate::Client::start_transaction).
/// Closed explicitly with [`end`](Self::end), or implicitly on drop.
pub struct Transaction {
    name: String,
    started_at: Instant,
    segments: Vec<CompletedSegment>,
    collector: Arc<dyn Collector>,
    finished: bool,
}

impl Transaction {
    pub(crate) fn new(name: &str, collector: Arc<dyn Collector>) -> Self {
        Self {
            name: name.to_string(),
            started_at: Instant::now(),
            segments: Vec::new(),
            collector,
            finished: false,
        }
    }

    /// Open a named segment nested inside this transaction.
    ///
    /// The returned guard borrows the transaction mutably, so only one
    /// segment can be open at a time and it cannot escape the transaction's
    /// lifetime.
    pub fn start_segment(&mut self, name: &str) -> Segment<'_> {
        Segment {
            name: name.to_string(),
            started_at: Instant::now(),
            closed: false,
            transaction: self,
        }
    }

    /// Close the transaction and deliver it to the collector.
    pub fn end(mut self) {
        self.finish();
    }

    /// Number of segments closed so far.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.collector.record(CompletedTransaction {
            name: std::mem::take(&mut self.name),
            started_at: self.started_at,
            ended_at: Instant::now(),
            segments: std::mem::take(&mut self.segments),
        });
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        self.finish();
    }
}

/// An open segment guard.
///
/// Closes on [`end`](Self::end) or on drop, pushing a [`CompletedSegment`]
/// into the parent transaction either way.
pub struct Segment<'t> {
    name: String,
    started_at: Instant,
    closed: bool,
    transaction: &'t mut Transaction,
}

impl Segment<'_> {
    /// Close the segment.
    pub fn end(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.transaction.segments.push(CompletedSegment {
            name: std::mem::take(&mut self.name),
            started_at: self.started_at,
            ended_at: Instant::now(),
        });
    }
}

impl Drop for Segment<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::collector::MemoryCollector;

    fn transaction(collector: &Arc<MemoryCollector>) -> Transaction {
        let dyn_collector: Arc<dyn Collector> = collector.clone();
        Transaction::new("invoke", dyn_collector)
    }

    #[test]
    fn test_segments_are_recorded_in_close_order() {
        let collector = Arc::new(MemoryCollector::new());
        let mut txn = transaction(&collector);

        txn.start_segment("header").end();
        txn.start_segment("body").end();
        txn.end();

        let recorded = collector.take();
        assert_eq!(recorded.len(), 1);
        let names: Vec<_> = recorded[0].segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["header", "body"]);
    }

    #[test]
    fn test_transaction_end_is_at_or_after_segment_ends() {
        let collector = Arc::new(MemoryCollector::new());
        let mut txn = transaction(&collector);

        txn.start_segment("header").end();
        txn.start_segment("body").end();
        txn.end();

        let recorded = collector.take();
        let txn = &recorded[0];
        assert!(txn.ended_at >= txn.started_at);
        for segment in &txn.segments {
            assert!(segment.ended_at >= segment.started_at);
            assert!(txn.ended_at >= segment.ended_at);
            assert!(segment.started_at >= txn.started_at);
        }
    }

    #[test]
    fn test_dropping_without_end_still_records() {
        let collector = Arc::new(MemoryCollector::new());
        {
            let mut txn = transaction(&collector);
            let _segment = txn.start_segment("header");
            // neither segment nor transaction ended explicitly
        }

        let recorded = collector.take();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].segments.len(), 1);
        assert_eq!(recorded[0].segments[0].name, "header");
    }

    #[test]
    fn test_duplicate_segment_names_are_allowed() {
        let collector = Arc::new(MemoryCollector::new());
        let mut txn = transaction(&collector);

        txn.start_segment("work").end();
        txn.start_segment("work").end();
        txn.end();

        let recorded = collector.take();
        assert_eq!(recorded[0].segments.len(), 2);
    }

    #[test]
    fn test_transactions_do_not_share_segments() {
        let collector = Arc::new(MemoryCollector::new());

        let mut first = transaction(&collector);
        first.start_segment("header").end();
        first.end();

        let mut second = transaction(&collector);
        second.start_segment("body").end();
        second.end();

        let recorded = collector.take();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].segments.len(), 1);
        assert_eq!(recorded[1].segments.len(), 1);
        assert_eq!(recorded[0].segments[0].name, "header");
        assert_eq!(recorded[1].segments[0].name, "body");
    }
}
