//! Retry logic.
//!
//! # Responsibilities
//! - Describe a retry policy (attempts, initial delay, multiplier)
//! - Execute an async operation with exponential backoff between attempts
//! - Leave the retryable/non-retryable decision to the caller
//!
//! # Design Decisions
//! - Only idempotent reads are wrapped; writes are never retried
//! - The attempt budget is bounded; there is no unbounded backoff
//! - The last error is returned unchanged once the budget is spent

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;

/// Parameters of an exponential retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub initial_delay: Duration,
    /// Factor applied to the delay after each further failure.
    pub multiplier: u32,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
    /// Random jitter as a percentage of each delay.
    pub jitter_percent: u64,
}

impl RetryPolicy {
    /// Exponential policy without a delay cap or jitter.
    pub fn new(max_attempts: u32, initial_delay: Duration, multiplier: u32) -> Self {
        Self {
            max_attempts,
            initial_delay,
            multiplier,
            max_delay: Duration::from_millis(u64::MAX),
            jitter_percent: 0,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, 1)
    }

    /// Delay to wait after the given 1-based failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        calculate_backoff(
            attempt,
            duration_ms(self.initial_delay),
            self.multiplier,
            duration_ms(self.max_delay),
            self.jitter_percent,
        )
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            multiplier: config.multiplier,
            max_delay: Duration::from_millis(config.max_delay_ms),
            jitter_percent: config.jitter_percent,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Run `call` until it succeeds, fails with a non-retryable error, or the
/// policy's attempt budget is spent.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    operation: &'static str,
    is_retryable: R,
    mut call: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match call().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < max_attempts && is_retryable(&error) => {
                let delay = policy.delay_after(attempt);
                tracing::info!(
                    operation,
                    attempt,
                    max_attempts,
                    delay = ?delay,
                    error = %error,
                    "Retrying upstream call"
                );
                metrics::record_upstream_retry(operation);
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                if attempt > 1 {
                    tracing::warn!(operation, attempts = attempt, error = %error, "Giving up after retries");
                }
                return Err(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Fatal,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn transient(error: &TestError) -> bool {
        *error == TestError::Transient
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_with_doubling_waits() {
        let policy = RetryPolicy::default();
        let calls = Mutex::new(Vec::new());
        let start = Instant::now();

        let result = retry_with_backoff(&policy, "test", transient, || {
            let mut calls = calls.lock().unwrap();
            calls.push(start.elapsed());
            let n = calls.len();
            async move {
                if n < 3 {
                    Err(TestError::Transient)
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        let calls = calls.into_inner().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1] - calls[0], Duration::from_secs(2));
        assert_eq!(calls[2] - calls[1], Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<(), _> = retry_with_backoff(&policy, "test", transient, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Transient) }
        })
        .await;

        assert_eq!(result, Err(TestError::Transient));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_stops_immediately() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = retry_with_backoff(&policy, "test", transient, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Fatal) }
        })
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_retry_policy_makes_single_attempt() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = retry_with_backoff(&RetryPolicy::no_retry(), "test", transient, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Transient) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_policy_from_config() {
        let policy = RetryPolicy::from(&RetryConfig::default());
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(2), Duration::from_secs(4));
    }
}
