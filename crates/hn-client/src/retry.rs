//! Retry with exponential backoff for transient upstream failures.

use std::future::Future;
use std::time::Duration;

use hn_core::SourceError;
use rand::Rng;
use tracing::warn;

/// Retry policy for upstream calls.
///
/// The delay before retry `n` (0-based) is `base_delay * 2^n` plus a random
/// jitter in `[0, max_jitter]`, capped at `max_delay`. Only errors for which
/// [`SourceError::is_transient`] holds are retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    max_retries: u32,
    /// Delay before the first retry.
    base_delay: Duration,
    /// Upper bound of the random component.
    max_jitter: Duration,
    /// Maximum delay between attempts.
    max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a new retry policy.
    pub fn new(max_retries: u32, base_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_jitter,
            max_delay: Duration::from_secs(30),
        }
    }

    /// Policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO, Duration::ZERO)
    }

    /// Returns the number of retries.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the backoff before retry number `attempt` (0-based), without jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Returns the backoff for `attempt` with random jitter applied.
    fn delay_for(&self, attempt: u32) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
        };
        (self.backoff(attempt) + jitter).min(self.max_delay)
    }

    /// Runs `call`, retrying transient failures.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let mut attempt = 0;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    attempt += 1;

                    warn!(
                        operation = %operation,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient upstream failure, retrying"
                    );

                    tokio::time::sleep(delay).await;
                },
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(2), Duration::from_millis(100))
    }
}
