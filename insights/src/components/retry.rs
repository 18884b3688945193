//! Retrying executor for idempotent mutations
//!
//! Absorbs read-after-write races: a dependent record written by an
//! asynchronous trigger may not be visible yet when the caller's mutation runs.
//! Repeating a conditional mutation converges once it is.

use std::fmt;
use std::future::Future;

use shared::{component_debug, component_error, component_info, component_warn, Component};

use crate::core::RetryPolicy;
use crate::error::Retryable;
use crate::traits::Clock;

/// Runs an operation up to `max_attempts` times with exponential backoff between attempts
pub struct RetryingMutationExecutor<C: Clock> {
    clock: C,
}

impl<C: Clock> RetryingMutationExecutor<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Execute `operation` under `policy`.
    ///
    /// The operation must be idempotent; the executor does not check. The first
    /// attempt runs immediately and success returns at once. A non-retryable
    /// error ends the run immediately. Otherwise the last observed error is
    /// returned once attempts are exhausted.
    pub async fn execute<T, E, F, Fut>(&self, policy: &RetryPolicy, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + fmt::Display,
    {
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            if let Some(delay) = policy.delay_before(attempt) {
                component_debug!(
                    Component::Retry,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "⏳ Waiting {}ms before attempt {}/{}",
                    delay.as_millis(),
                    attempt,
                    max_attempts
                );
                self.clock.sleep(delay).await;
            }

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        component_info!(Component::Retry, attempt, "✅ Succeeded on attempt {}/{}", attempt, max_attempts);
                    }
                    return Ok(value);
                }
                Err(error) => {
                    component_warn!(
                        Component::Retry,
                        attempt,
                        error = %error,
                        "Attempt {}/{} failed: {}",
                        attempt,
                        max_attempts,
                        error
                    );

                    if !error.is_retryable() {
                        return Err(error);
                    }
                    if attempt >= max_attempts {
                        component_error!(
                            Component::Retry,
                            attempts = max_attempts,
                            "❌ Giving up after {} attempts: {}",
                            max_attempts,
                            error
                        );
                        return Err(error);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
