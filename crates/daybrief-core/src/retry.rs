//! Bounded exponential backoff for a single upstream call.
//!
//! The policy wraps any zero-argument async operation. It retries only on
//! transient overload (see [`DaybriefError::is_transient`]); every other
//! failure propagates unchanged on first occurrence, and the success value
//! is never inspected or transformed. Attempts are strictly sequential —
//! attempt N+1 never starts before attempt N's failure is known and the
//! backoff delay has elapsed.

use crate::error::{DaybriefError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy with `max_attempts` total attempts (clamped to at least one)
    /// and the default 1s base delay.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay before the retry following the 0-indexed `attempt`:
    /// `2^attempt * base_delay` (1s, 2s, 4s for attempts 0, 1, 2).
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }

    /// Run `op`, retrying on transient overload until the attempt budget is
    /// spent.
    ///
    /// A transient failure on the final attempt surfaces as
    /// [`DaybriefError::RetriesExhausted`] carrying the last upstream error;
    /// it is never produced before the budget is genuinely exhausted.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    if attempt + 1 >= self.max_attempts {
                        return Err(DaybriefError::RetriesExhausted {
                            attempts: self.max_attempts,
                            source: Box::new(err),
                        });
                    }
                    let delay = self.backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "transient upstream overload, backing off: {err}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
