//! Advisory self-throttling ahead of the provider's own rate limits.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Rolling-window rate limiter shared by every in-flight generation call.
///
/// Tracks completed-call timestamps inside a trailing window and delays,
/// never rejects, callers once the window is at capacity. Built once at
/// startup and passed by handle; there is no hidden global.
///
/// `wait_if_needed` does not reserve a slot: callers record their own call
/// only after it succeeds, so a failed request costs no window capacity.
/// The mutex is only ever held across non-suspending work.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_calls: usize,
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
    pub const DEFAULT_MAX_CALLS: usize = 15;

    /// Extra sleep past the oldest call's expiry, absorbing skew against
    /// the provider's own accounting.
    const WAIT_BUFFER: Duration = Duration::from_millis(100);

    pub fn new(window: Duration, max_calls: usize) -> Self {
        Self {
            window,
            max_calls,
            calls: Mutex::new(VecDeque::new()),
        }
    }

    /// Sleeps until the window has room for one more call.
    pub async fn wait_if_needed(&self) {
        loop {
            let wait = {
                let mut calls = self.calls.lock().expect("rate limiter lock poisoned");
                let now = Instant::now();
                Self::expire(&mut calls, now, self.window);
                if calls.len() < self.max_calls {
                    return;
                }
                let oldest = calls[0];
                self.window - now.duration_since(oldest) + Self::WAIT_BUFFER
            };
            tracing::debug!(wait_ms = wait.as_millis() as u64, "rate window full, delaying call");
            tokio::time::sleep(wait).await;
        }
    }

    /// Records a completed call.
    pub fn record(&self) {
        let mut calls = self.calls.lock().expect("rate limiter lock poisoned");
        let now = Instant::now();
        Self::expire(&mut calls, now, self.window);
        calls.push_back(now);
    }

    /// Number of calls currently inside the window.
    pub fn in_window(&self) -> usize {
        let mut calls = self.calls.lock().expect("rate limiter lock poisoned");
        Self::expire(&mut calls, Instant::now(), self.window);
        calls.len()
    }

    fn expire(calls: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while calls
            .front()
            .is_some_and(|t| now.duration_since(*t) >= window)
        {
            calls.pop_front();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW, Self::DEFAULT_MAX_CALLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn calls_below_capacity_pass_immediately() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 3);
        for _ in 0..3 {
            let before = Instant::now();
            limiter.wait_if_needed().await;
            limiter.record();
            assert_eq!(Instant::now(), before);
        }
        assert_eq!(limiter.in_window(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn call_over_capacity_waits_for_the_oldest_to_expire() {
        let window = Duration::from_secs(60);
        let limiter = RateLimiter::new(window, 3);
        for _ in 0..3 {
            limiter.wait_if_needed().await;
            limiter.record();
        }

        let before = Instant::now();
        limiter.wait_if_needed().await;
        let waited = Instant::now().duration_since(before);

        // Delayed by roughly the time until the oldest call leaves the
        // window (all three were recorded "now", so the full window).
        assert!(waited >= window, "waited only {waited:?}");
        assert!(waited <= window + Duration::from_secs(1), "waited {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn expired_calls_free_capacity_without_waiting() {
        let window = Duration::from_secs(60);
        let limiter = RateLimiter::new(window, 2);
        limiter.record();
        limiter.record();

        tokio::time::advance(window + Duration::from_secs(1)).await;

        let before = Instant::now();
        limiter.wait_if_needed().await;
        assert_eq!(Instant::now(), before);
        assert_eq!(limiter.in_window(), 0);
    }
}
