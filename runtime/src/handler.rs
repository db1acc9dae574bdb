//! The opaque invocation work.
//!
//! Business logic is not the shim's concern: the Invoke phase drives an
//! externally supplied [`FunctionHandler`] through its two response phases
//! (header construction, then body construction) and times each one in its
//! own telemetry segment. The raw request headers and body are passed
//! through untouched.

use async_trait::async_trait;
use http::HeaderMap;
use rand::Rng;
use std::time::Duration;

/// Request data handed to the function handler.
///
/// Created per invocation, dropped when handling returns.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// Platform-assigned correlation id (`x-fc-request-id`).
    pub request_id: String,
    /// Raw request headers, passed through untouched.
    pub headers: HeaderMap,
    /// Raw request body, passed through untouched.
    pub body: Vec<u8>,
}

/// Externally supplied invocation logic.
///
/// Both phases may block on I/O; the shim imposes no timeout, so bounding a
/// hung handler is the embedder's responsibility.
#[async_trait]
pub trait FunctionHandler: Send + Sync {
    /// Header-construction phase. Runs inside the `"header"` telemetry
    /// segment; returned headers are applied to the invocation response.
    ///
    /// # Errors
    ///
    /// Any error fails the invocation with a 500 response.
    async fn build_headers(&self, request: &InvocationRequest) -> anyhow::Result<HeaderMap>;

    /// Body-construction phase. Runs inside the `"body"` telemetry segment;
    /// returned bytes become the invocation response body.
    ///
    /// # Errors
    ///
    /// Any error fails the invocation with a 500 response.
    async fn build_body(&self, request: &InvocationRequest) -> anyhow::Result<Vec<u8>>;
}

/// Built-in demo handler: jittered sleeps standing in for real work.
///
/// Sleeps 20–39 ms in the header phase and 30–59 ms in the body phase, then
/// answers with a fixed greeting. Used by the binary when no real function
/// is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoHandler;

#[async_trait]
impl FunctionHandler for DemoHandler {
    async fn build_headers(&self, _request: &InvocationRequest) -> anyhow::Result<HeaderMap> {
        let jitter = rand::thread_rng().gen_range(0..20u64);
        let delay = Duration::from_millis(20 + jitter);
        tracing::debug!(delay_ms = delay.as_millis(), "Demo header phase");
        tokio::time::sleep(delay).await;

        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONTENT_TYPE, http::HeaderValue::from_static("text/plain"));
        Ok(headers)
    }

    async fn build_body(&self, _request: &InvocationRequest) -> anyhow::Result<Vec<u8>> {
        let jitter = rand::thread_rng().gen_range(0..30u64);
        let delay = Duration::from_millis(30 + jitter);
        tracing::debug!(delay_ms = delay.as_millis(), "Demo body phase");
        tokio::time::sleep(delay).await;

        Ok(b"Hello, fc-runtime invoke!".to_vec())
    }
}
