//! Configuration for the sync client.

use std::time::Duration;

/// Base URL of the hosted JSON storage service.
pub const DEFAULT_BASE_URL: &str = "https://api.jsonstorage.net/v1/json";

/// How the credential is attached to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `?apiKey=<credential>` query parameter.
    #[default]
    QueryApiKey,
    /// `Authorization: Bearer <credential>` header.
    Bearer,
}

/// Configuration for the sync client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Collection URL; documents live at `<base_url>/<id>`.
    pub base_url: String,
    /// Credential placement.
    pub auth: AuthScheme,
    /// Retry configuration.
    pub retry: RetryConfig,
    /// Per-attempt request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: AuthScheme::default(),
            retry: RetryConfig::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the credential placement.
    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Configuration for retry behavior.
///
/// The first attempt is not a retry; `max_retries` counts the additional
/// attempts. Delays double by default, so the worst-case extra wait is
/// `initial_delay * (2^max_retries - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of additional attempts.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Creates a new retry configuration.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(300),
            backoff_multiplier: 2.0,
        }
    }

    /// Creates a configuration with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Sets the initial delay.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Total attempts including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (1-indexed). Zero for `0`.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let factor = self
            .backoff_multiplier
            .powi(retry.saturating_sub(1) as i32);
        let nanos = self.initial_delay.as_nanos() as f64 * factor;
        Duration::from_nanos(nanos.round() as u64)
    }

    /// Sum of every backoff delay if all retries are used.
    pub fn total_backoff(&self) -> Duration {
        (1..=self.max_retries).map(|n| self.delay_for_retry(n)).sum()
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3)
    }
}
