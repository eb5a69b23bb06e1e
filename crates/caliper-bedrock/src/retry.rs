//! Timeout, exponential backoff and jitter around any fallible async
//! operation.
//!
//! Each attempt races the operation against `policy.timeout` with
//! [`tokio::time::timeout`]; whichever side loses is dropped, so no timer
//! or half-finished attempt outlives the race. Between attempts the wait
//! is `min(previous × backoff_factor, max_delay)` starting from
//! `initial_delay`, plus up to one second of random jitter.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::error::GenerationError;

/// Exclusive upper bound of the random jitter added to every wait.
pub const JITTER_CEILING: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Per-attempt limit.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_factor: 2.0,
            timeout: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    /// Every setting must be positive.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.max_attempts == 0 {
            return Err(GenerationError::InvalidPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.initial_delay.is_zero() || self.max_delay.is_zero() || self.timeout.is_zero() {
            return Err(GenerationError::InvalidPolicy(
                "delays and timeout must be positive".to_string(),
            ));
        }
        if !self.backoff_factor.is_finite() || self.backoff_factor <= 0.0 {
            return Err(GenerationError::InvalidPolicy(format!(
                "backoff_factor must be a positive number, got {}",
                self.backoff_factor
            )));
        }
        Ok(())
    }

    /// The delay that follows `previous`, before jitter.
    pub fn next_delay(&self, previous: Duration) -> Duration {
        Duration::try_from_secs_f64(previous.as_secs_f64() * self.backoff_factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Why a single attempt failed.
#[derive(Debug, Error)]
pub enum AttemptError<E> {
    #[error("{0}")]
    Failed(E),

    #[error("attempt timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

impl<E> AttemptError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, AttemptError::TimedOut(_))
    }
}

/// Raised once every attempt allowed by the policy has failed.
#[derive(Debug, Error)]
#[error("operation failed after {attempts} attempt(s): {last_error}")]
pub struct RetryExhaustedError<E> {
    pub attempts: u32,
    pub last_error: AttemptError<E>,
}

fn jitter() -> Duration {
    Duration::from_millis(fastrand::u64(0..JITTER_CEILING.as_millis() as u64))
}

/// Run `operation` until it succeeds or the policy's attempts run out.
///
/// `operation` is called once per attempt and must build a fresh future
/// each time.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryExhaustedError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        let last_error = match tokio::time::timeout(policy.timeout, operation()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => AttemptError::Failed(e),
            Err(_) => AttemptError::TimedOut(policy.timeout),
        };

        if attempt >= max_attempts {
            warn!(attempt, max_attempts, error = %last_error, "retries exhausted");
            return Err(RetryExhaustedError {
                attempts: attempt,
                last_error,
            });
        }

        delay = policy.next_delay(delay);
        let wait = delay + jitter();
        warn!(
            attempt,
            max_attempts,
            delay_ms = wait.as_millis() as u64,
            error = %last_error,
            "attempt failed, retrying"
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
    }
}
