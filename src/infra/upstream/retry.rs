//! Fixed-delay retry for fallible async operations.

use std::{fmt::Display, future::Future, time::Duration};

use metrics::counter;
use tracing::warn;

const SOURCE: &str = "folio::upstream::retry";

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Failures that know whether another attempt could succeed.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Bounded retry: at most `max_retries + 1` attempts, `delay` apart, no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl From<&crate::config::ApiSettings> for RetryPolicy {
    fn from(settings: &crate::config::ApiSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            delay: settings.retry_delay,
        }
    }
}

impl RetryPolicy {
    /// Run `operation` until it succeeds, fails with a non-retryable error, or attempts
    /// run out. The last error is returned unchanged.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        E: Retryable + Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    counter!("folio_api_retry_total").increment(1);
                    warn!(
                        target = SOURCE,
                        request = label,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %err,
                        "retrying upstream request"
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
