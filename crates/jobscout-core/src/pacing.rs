//! Fixed-delay pacing between backend calls.
//!
//! The extraction and scoring backends enforce undocumented rate limits. A
//! run is fully sequential, so pacing is a plain serial delay inserted
//! between calls rather than a token bucket.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use jobscout_core::pacing::FixedDelay;
//! use jobscout_core::traits::Pacer;
//!
//! # async fn run() {
//! let pacer = FixedDelay::new(Duration::from_secs(10));
//! pacer.wait().await;
//! # }
//! ```

use std::time::Duration;

use crate::traits::Pacer;

/// Delay used between backend calls unless configured otherwise.
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_secs(10);

/// A [`Pacer`] that suspends the caller for the same duration on every wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A pacer that never waits.
    pub fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_DELAY)
    }
}

impl Pacer for FixedDelay {
    async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::debug!(delay_ms = %self.delay.as_millis(), "Pacing before next backend call");
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn default_delay_is_ten_seconds() {
        assert_eq!(FixedDelay::default().delay(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn wait_blocks_for_configured_delay() {
        let pacer = FixedDelay::new(Duration::from_millis(100));

        let start = Instant::now();
        pacer.wait().await;
        let elapsed = start.elapsed();

        assert!(
            elapsed >= Duration::from_millis(100),
            "wait() should block for at least 100ms, elapsed: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn consecutive_waits_accumulate() {
        let pacer = FixedDelay::new(Duration::from_millis(50));

        let start = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        let elapsed = start.elapsed();

        assert!(
            elapsed >= Duration::from_millis(100),
            "Two waits should take at least 100ms, elapsed: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn none_returns_immediately() {
        let pacer = FixedDelay::none();

        let start = Instant::now();
        pacer.wait().await;

        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
