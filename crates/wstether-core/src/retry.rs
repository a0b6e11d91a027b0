//! Reconnect policy.
//!
//! Decides whether a retry follows an unexpected close, and after how long.
//! The interval is fixed rather than exponential; the whole policy lives in
//! `next_delay`, so changing the curve cannot touch the public contract.

use std::time::Duration;

/// Default delay between reconnect attempts.
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_millis(3000);

/// Retry decision policy for one channel.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay before each reconnect attempt.
    pub interval: Duration,
    /// Ceiling on consecutive attempts; `None` retries forever.
    pub max_attempts: Option<u32>,
    /// When false, never schedule (reconnection disabled by config).
    pub enabled: bool,
}

impl RetryPolicy {
    /// Delay before the next attempt, given the count of consecutive
    /// attempts already made since the last successful open.
    ///
    /// `None` means: do not schedule. With `max_attempts = Some(m)` the
    /// ceiling is reached once `attempt >= m - 1`; reaching it is not an
    /// error, just a terminal decision the caller reports.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        if let Some(max) = self.max_attempts {
            if attempt.saturating_add(1) >= max {
                return None;
            }
        }
        Some(self.interval)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RECONNECT_INTERVAL,
            max_attempts: None,
            enabled: true,
        }
    }
}
