//! Retrying transport.
//!
//! [`Transport`] performs a single logical request on top of an
//! [`HttpClient`], retrying transient failures with exponential backoff.
//! It has no knowledge of what the bodies mean.

use crate::config::RetryConfig;
use crate::error::{SyncError, SyncResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Returns true for statuses worth retrying: 5xx and 429.
pub fn is_transient_status(status: u16) -> bool {
    status >= 500 || status == 429
}

/// Masks the `apiKey` query parameter so URLs can be logged.
pub fn redact_url(url: &str) -> String {
    let Some(start) = url.find("apiKey=") else {
        return url.to_string();
    };
    let value_start = start + "apiKey=".len();
    let value_end = url[value_start..]
        .find('&')
        .map_or(url.len(), |i| value_start + i);
    format!("{}***{}", &url[..value_start], &url[value_end..])
}

/// An [`HttpClient`] wrapped with a retry policy.
pub struct Transport<C: HttpClient> {
    client: C,
    retry: RetryConfig,
}

impl<C: HttpClient> Transport<C> {
    /// Creates a new transport.
    pub fn new(client: C, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Sends a request, retrying transport errors, 5xx and 429.
    ///
    /// Other statuses are returned unmodified after one attempt. When the
    /// retry budget runs out, the last response is returned as-is, or the
    /// last transport error is raised.
    pub async fn send(&self, request: &HttpRequest) -> SyncResult<HttpResponse> {
        let mut retry = 0u32;
        loop {
            debug!(
                method = %request.method,
                url = %redact_url(&request.url),
                attempt = retry + 1,
                "sending request"
            );

            let exhausted = retry >= self.retry.max_retries;
            let reason = match self.client.send(request).await {
                Ok(response) if !is_transient_status(response.status) || exhausted => {
                    return Ok(response)
                }
                Ok(response) => format!("status {}", response.status),
                Err(message) if exhausted => {
                    warn!(attempts = retry + 1, %message, "retry budget exhausted");
                    return Err(SyncError::transport_retryable(message));
                }
                Err(message) => message,
            };

            retry += 1;
            let delay = self.retry.delay_for_retry(retry);
            warn!(
                retry,
                max_retries = self.retry.max_retries,
                delay_ms = delay.as_millis() as u64,
                %reason,
                "transient failure, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Sends a request exactly once.
    pub async fn send_once(&self, request: &HttpRequest) -> SyncResult<HttpResponse> {
        debug!(method = %request.method, url = %redact_url(&request.url), "sending probe");
        self.client
            .send(request)
            .await
            .map_err(SyncError::transport_retryable)
    }
}

/// A request observed by [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The request.
    pub request: HttpRequest,
    /// When it was received, on tokio's clock.
    pub at: Instant,
}

/// A scripted HTTP client for testing.
///
/// Queued outcomes are consumed in order; once the queue is empty the
/// fallback response (if any) answers every request.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    queue: Mutex<VecDeque<Result<HttpResponse, String>>>,
    fallback: Mutex<Option<HttpResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockHttpClient {
    /// Creates a mock with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn push_response(&self, status: u16, body: impl Into<String>) -> &Self {
        self.queue
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queues a transport error.
    pub fn push_error(&self, message: impl Into<String>) -> &Self {
        self.queue.lock().push_back(Err(message.into()));
        self
    }

    /// Sets the response used once the queue is empty.
    pub fn set_fallback(&self, status: u16, body: impl Into<String>) {
        *self.fallback.lock() = Some(HttpResponse::new(status, body));
    }

    /// Returns every recorded call.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the number of requests received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.calls.lock().last().map(|c| c.request.clone())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, String> {
        self.calls.lock().push(RecordedCall {
            request: request.clone(),
            at: Instant::now(),
        });

        if let Some(outcome) = self.queue.lock().pop_front() {
            return outcome;
        }
        self.fallback
            .lock()
            .clone()
            .ok_or_else(|| "no mock response queued".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn transport(mock: &Arc<MockHttpClient>) -> Transport<Arc<MockHttpClient>> {
        Transport::new(Arc::clone(mock), RetryConfig::default())
    }

    fn gaps(calls: &[RecordedCall]) -> Vec<Duration> {
        calls.windows(2).map(|w| w[1].at - w[0].at).collect()
    }

    #[test]
    fn transient_statuses() {
        assert!(is_transient_status(500));
        assert!(is_transient_status(503));
        assert!(is_transient_status(429));
        assert!(!is_transient_status(404));
        assert!(!is_transient_status(401));
        assert!(!is_transient_status(200));
    }

    #[test]
    fn redacts_api_key() {
        assert_eq!(
            redact_url("https://h/json/abc?apiKey=secret"),
            "https://h/json/abc?apiKey=***"
        );
        assert_eq!(
            redact_url("https://h/json?apiKey=secret&x=1"),
            "https://h/json?apiKey=***&x=1"
        );
        assert_eq!(redact_url("https://h/json/abc"), "https://h/json/abc");
    }

    #[tokio::test(start_paused = true)]
    async fn retries_503_then_succeeds_with_doubling_delays() {
        let mock = Arc::new(MockHttpClient::new());
        mock.push_response(503, "")
            .push_response(503, "")
            .push_response(503, "")
            .push_response(200, "ok");

        let response = transport(&mock)
            .send(&HttpRequest::get("https://h/doc"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let calls = mock.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            gaps(&calls),
            vec![
                Duration::from_millis(300),
                Duration::from_millis(600),
                Duration::from_millis(1200),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transport_errors_and_429() {
        let mock = Arc::new(MockHttpClient::new());
        mock.push_error("connection reset")
            .push_response(429, "slow down")
            .push_response(200, "ok");

        let response = transport(&mock)
            .send(&HttpRequest::get("https://h/doc"))
            .await
            .unwrap();

        assert_eq!(response.body, "ok");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn client_errors_are_not_retried() {
        for status in [400, 401, 403, 404] {
            let mock = Arc::new(MockHttpClient::new());
            mock.push_response(status, "");

            let response = transport(&mock)
                .send(&HttpRequest::get("https://h/doc"))
                .await
                .unwrap();

            assert_eq!(response.status, status);
            assert_eq!(mock.call_count(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_status_failure_returns_last_response() {
        let mock = Arc::new(MockHttpClient::new());
        mock.set_fallback(502, "bad gateway");

        let response = transport(&mock)
            .send(&HttpRequest::get("https://h/doc"))
            .await
            .unwrap();

        assert_eq!(response.status, 502);
        assert_eq!(mock.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_transport_error_is_raised() {
        let mock = Arc::new(MockHttpClient::new());
        for _ in 0..4 {
            mock.push_error("dns failure");
        }

        let start = Instant::now();
        let err = transport(&mock)
            .send(&HttpRequest::get("https://h/doc"))
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert!(err.to_string().contains("dns failure"));
        assert_eq!(mock.call_count(), 4);
        // Total backoff is bounded by base * (2^retries - 1).
        assert_eq!(start.elapsed(), Duration::from_millis(2100));
    }

    #[tokio::test(start_paused = true)]
    async fn send_once_never_retries() {
        let mock = Arc::new(MockHttpClient::new());
        mock.push_response(503, "");

        let response = transport(&mock)
            .send_once(&HttpRequest::get("https://h/doc"))
            .await
            .unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn mock_without_script_errors() {
        let mock = MockHttpClient::new();
        let result = mock.send(&HttpRequest::get("https://h")).await;
        assert!(result.is_err());
        assert_eq!(mock.call_count(), 1);
    }
}
