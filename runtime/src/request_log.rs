//! Per-request start/end correlation lines.
//!
//! The platform's log pipeline greps for one stable pair of lines per
//! request: `"<Phase> Start RequestId: <id>"` on entry and
//! `"<Phase> End RequestId: <id>"` on exit. The end line must fire on every
//! exit path, so it is emitted from a guard's `Drop`: normal return, error
//! return and handler panic all produce exactly one matching pair.

use std::fmt;

/// Lifecycle phase a request was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One-time setup of the telemetry client.
    Initialize,
    /// Settle before checkpoint/suspend.
    PreFreeze,
    /// Last-chance flush before reclamation.
    PreStop,
    /// Normal function invocation.
    Invoke,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialize => write!(f, "Initialize"),
            Self::PreFreeze => write!(f, "PreFreeze"),
            Self::PreStop => write!(f, "PreStop"),
            Self::Invoke => write!(f, "Invoke"),
        }
    }
}

/// Scoped request-log guard.
///
/// Emits the start line on construction and the matching end line on drop.
#[derive(Debug)]
pub struct RequestLog {
    phase: Phase,
    request_id: String,
}

impl RequestLog {
    /// Emit the start line and arm the end line.
    #[must_use]
    pub fn start(phase: Phase, request_id: &str) -> Self {
        tracing::info!("{} Start RequestId: {}", phase, request_id);
        Self {
            phase,
            request_id: request_id.to_string(),
        }
    }
}

impl Drop for RequestLog {
    fn drop(&mut self) {
        tracing::info!("{} End RequestId: {}", self.phase, self.request_id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Writer that captures formatted log output for assertions.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_captured_logs(f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.contents()
    }

    #[test]
    fn test_guard_emits_matching_start_and_end_lines() {
        let output = with_captured_logs(|| {
            let log = RequestLog::start(Phase::Invoke, "req-123");
            drop(log);
        });

        assert!(output.contains("Invoke Start RequestId: req-123"));
        assert!(output.contains("Invoke End RequestId: req-123"));
    }

    #[test]
    fn test_end_line_fires_on_panic() {
        let output = with_captured_logs(|| {
            let result = std::panic::catch_unwind(|| {
                let _log = RequestLog::start(Phase::Initialize, "req-panic");
                std::panic::panic_any("handler fault");
            });
            assert!(result.is_err());
        });

        assert!(output.contains("Initialize Start RequestId: req-panic"));
        assert!(output.contains("Initialize End RequestId: req-panic"));
    }

    #[test]
    fn test_every_phase_has_a_stable_display_name() {
        assert_eq!(Phase::Initialize.to_string(), "Initialize");
        assert_eq!(Phase::PreFreeze.to_string(), "PreFreeze");
        assert_eq!(Phase::PreStop.to_string(), "PreStop");
        assert_eq!(Phase::Invoke.to_string(), "Invoke");
    }
}
