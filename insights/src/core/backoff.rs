//! Retry policy and exponential backoff schedule
//!
//! Pure arithmetic, no timers. The executor asks the policy how long to wait
//! before each attempt and hands the delay to its clock.

use std::time::Duration;

use crate::error::{InsightsError, InsightsResult};

/// Retry configuration for one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one (at least 1)
    pub max_attempts: u32,

    /// Delay before the second attempt, before capping
    pub base_delay: Duration,

    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY_MS: u64 = 500;
    pub const DEFAULT_MAX_DELAY_MS: u64 = 5_000;

    /// Create a validated policy
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> InsightsResult<Self> {
        if max_attempts == 0 {
            return Err(InsightsError::config("max_attempts", "0"));
        }
        Ok(Self {
            max_attempts,
            base_delay,
            max_delay,
        })
    }

    pub fn from_millis(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> InsightsResult<Self> {
        Self::new(
            max_attempts,
            Duration::from_millis(base_delay_ms),
            Duration::from_millis(max_delay_ms),
        )
    }

    /// One immediate attempt, never any delay
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay to wait before `attempt` (1-based).
    ///
    /// `None` for the first attempt. Otherwise `min(base × 2^(attempt-2), max)`.
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt <= 1 {
            return None;
        }
        let factor = 2u32.checked_pow(attempt - 2).unwrap_or(u32::MAX);
        let delay = self.base_delay.checked_mul(factor).unwrap_or(self.max_delay);
        Some(delay.min(self.max_delay))
    }

    /// Full delay schedule for a run where every attempt fails
    pub fn schedule(&self) -> Vec<Duration> {
        (2..=self.max_attempts).filter_map(|attempt| self.delay_before(attempt)).collect()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(Self::DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(Self::DEFAULT_MAX_DELAY_MS),
        }
    }
}
