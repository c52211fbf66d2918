//! Capped exponential retry policy for the briefing pipeline.

use std::time::Duration;

/// How many times to attempt an operation and how long to wait in between.
///
/// Delays grow geometrically: `base_delay * multiplier^attempt`, where
/// `attempt` is the zero-based index of the attempt that just failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            ..Default::default()
        }
    }

    /// Single attempt, no waiting
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    /// Delay to wait after the given zero-based attempt failed.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt as i32);
        Duration::from_millis((self.base_delay.as_millis() as f64 * factor) as u64)
    }

    /// Whether another attempt may follow the given zero-based attempt.
    pub fn has_attempt_after(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}
