//! Pacing between consecutive searches.
//!
//! The pipeline awaits [`RateLimiter::wait`] once between each pair of
//! (location, query) searches. [`FixedInterval`] is a plain sleep and does
//! not adapt to server feedback; [`NoDelay`] is for tests and dry runs.

use std::future::Future;
use std::time::Duration;

pub trait RateLimiter {
    /// Blocks the run until the next search may start.
    fn wait(&self) -> impl Future<Output = ()> + Send;
}

/// Sleeps for a fixed duration on every call.
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl RateLimiter for FixedInterval {
    async fn wait(&self) {
        tracing::trace!(delay = ?self.interval, "rate limit pause");
        tokio::time::sleep(self.interval).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl RateLimiter for NoDelay {
    async fn wait(&self) {}
}
