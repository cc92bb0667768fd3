//! Retry with capped exponential backoff
//!
//! Only applied to idempotent reads (audience preview). Mutating calls
//! like campaign creation are never retried automatically.

use std::time::Duration;

use rand::Rng;

use crate::error::ApiError;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum attempts, first try included
    pub max_attempts: u32,
    /// Base delay for exponential backoff
    pub base_delay_ms: u64,
    /// Ceiling for the backoff delay
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 400,
            max_delay_ms: 5_000,
        }
    }
}

impl RetryConfig {
    /// Upper bound of the delay before retry `attempt` (0-based),
    /// exponential and capped
    pub fn max_delay_for(&self, attempt: u32) -> Duration {
        let delay_ms = self
            .base_delay_ms
            .saturating_mul(1 << attempt.min(6))
            .min(self.max_delay_ms);
        Duration::from_millis(delay_ms)
    }

    /// Actual delay before retry `attempt`: full jitter over the capped
    /// exponential bound, so synchronized clients spread out
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let max = self.max_delay_for(attempt).as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(0..=max))
    }
}

/// Determines if an error is retryable
pub fn is_retryable_error(error: &ApiError) -> bool {
    match error {
        ApiError::RateLimited | ApiError::Network(_) => true,
        ApiError::Server(status) => *status >= 500,
        _ => false,
    }
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod tests;
