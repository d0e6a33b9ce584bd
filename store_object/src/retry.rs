//! Retry executor
//!
//! Runs one remote operation up to `max_attempts` times with exponential
//! backoff. Errors that can never succeed on another attempt stop the loop
//! immediately and are surfaced unchanged.

use crate::errors::{DataError, DataResult, RemoteError};
use config::RetryConfig;
use std::future::Future;
use std::time::Duration;

/// Errors that know whether another attempt may succeed
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for RemoteError {
    fn is_retryable(&self) -> bool {
        RemoteError::is_retryable(self)
    }
}

/// Attempt ceiling and backoff bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.base_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }

    /// Delay after failed attempt `attempt` (1-based): `min(base * 2^(attempt-1), max)`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let factor = 2_u32.saturating_pow(exponent);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Applies a `RetryPolicy` to remote operations
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds, fails permanently or attempts run out
    ///
    /// Returns `DataError::NoConnection` without calling `operation` when the
    /// client is not available.
    pub async fn run<F, Fut, T>(&self, available: bool, mut operation: F) -> DataResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        if !available {
            return Err(DataError::NoConnection);
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        kind = ?e.kind,
                        "Database operation failed: {}",
                        e
                    );

                    if !IsRetryable::is_retryable(&e) || attempt >= max_attempts {
                        return Err(DataError::Remote(e));
                    }

                    let delay = self.policy.delay_for_attempt(attempt);
                    tracing::debug!(delay_ms = delay.as_millis() as u64, "retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RemoteErrorKind;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn executor() -> RetryExecutor {
        RetryExecutor::new(RetryPolicy::default())
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
        assert_eq!(policy.max_delay, Duration::from_millis(5000));
    }

    #[test]
    fn test_backoff_doubles_until_ceiling() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(4000));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(5000));
        assert_eq!(policy.delay_for_attempt(60), Duration::from_millis(5000));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10), Duration::from_millis(10));
        assert_eq!(policy.max_attempts, 1);
    }

    #[tokio::test]
    async fn test_unavailable_short_circuits() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: DataResult<()> = executor()
            .run(false, || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }
            })
            .await;

        assert_eq!(result, Err(DataError::NoConnection));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result = executor()
            .run(true, || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(RemoteError::transient("fetch failed"))
                    } else {
                        Ok(vec![1, 2])
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(vec![1, 2]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_surfaces_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result: DataResult<()> = executor()
            .run(true, || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Err(RemoteError::transient(format!("attempt {}", n))) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            result.unwrap_err().remote().map(|e| e.message.clone()),
            Some("attempt 3".to_string())
        );
        // 1000 after the first failure, 2000 after the second, none after the last
        assert!(started.elapsed() >= Duration::from_millis(3000));
        assert!(started.elapsed() < Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_stops_immediately() {
        for error in [
            RemoteError::new(RemoteErrorKind::Permission, "permission denied"),
            RemoteError::new(RemoteErrorKind::Auth, "JWT expired"),
            RemoteError::unclassified("violates constraint"),
            RemoteError::unclassified("no rows").with_code("PGRST116"),
        ] {
            let calls = Arc::new(AtomicU32::new(0));
            let counter = calls.clone();
            let started = Instant::now();

            let result: DataResult<()> = executor()
                .run(true, || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let error = error.clone();
                    async move { Err(error) }
                })
                .await;

            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(result, Err(DataError::Remote(error)));
            assert_eq!(started.elapsed(), Duration::ZERO);
        }
    }
}
