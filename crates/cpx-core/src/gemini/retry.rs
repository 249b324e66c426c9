//! Exponential backoff policy for the retry loop.

use std::time::Duration;

/// Backoff tuning for one logical generation request.
///
/// Attempt `n` (1-based, attempt 0 is the initial call) is preceded by a
/// delay of `min(max_delay, base_delay * multiplier^n)`, randomized by
/// ±`jitter` so concurrent users do not retry in lockstep.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Retries after the initial attempt; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
    /// Jitter fraction, e.g. `0.2` for ±20%.
    pub jitter: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(2000),
            multiplier: 2.0,
            max_delay: Duration::from_millis(60_000),
            jitter: 0.2,
        }
    }
}

impl BackoffPolicy {
    /// Deterministic delay before attempt `attempt` (1-based), jitter not
    /// yet applied.
    pub fn raw_delay(&self, attempt: u32) -> Duration {
        let scaled = self.base_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        let capped = scaled.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Delay before attempt `attempt` with random jitter applied.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.delay_with_unit(attempt, rand::random::<f64>())
    }

    /// Jitter expansion with an injected random unit in `[0, 1)`, mapped to
    /// a factor in `[1 - jitter, 1 + jitter]`.
    fn delay_with_unit(&self, attempt: u32, unit: f64) -> Duration {
        let factor = 1.0 + self.jitter * (unit * 2.0 - 1.0);
        let ms = self.raw_delay(attempt).as_millis() as f64 * factor;
        Duration::from_millis(ms.max(0.0) as u64)
    }
}
