//! Wait mechanisms
//!
//! The implicit presence wait is the only retry in the suite. Business logic
//! is never retried: a condition either becomes true within the timeout or
//! the caller gets a [`ProbeError::Timeout`].

use crate::result::{ProbeError, ProbeResult};
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Result of a successful wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitResult<T> {
    /// Value produced by the condition
    pub value: T,
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of times the condition was evaluated
    pub attempts: u32,
}

/// Poll `condition` until it yields `Some`, an error, or the timeout passes.
///
/// The condition is always evaluated at least once, so a zero timeout
/// degrades to a single check.
pub fn poll<T, F>(
    options: WaitOptions,
    waited_for: &str,
    mut condition: F,
) -> ProbeResult<WaitResult<T>>
where
    F: FnMut() -> ProbeResult<Option<T>>,
{
    let start = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        if let Some(value) = condition()? {
            return Ok(WaitResult {
                value,
                elapsed: start.elapsed(),
                attempts,
            });
        }
        if start.elapsed() >= options.timeout() {
            tracing::debug!(waited_for, attempts, "wait timed out");
            return Err(ProbeError::Timeout {
                ms: options.timeout_ms,
                waited_for: waited_for.to_string(),
            });
        }
        std::thread::sleep(options.poll_interval());
    }
}

/// Poll a boolean predicate until it holds
pub fn wait_until<F>(options: WaitOptions, waited_for: &str, mut predicate: F) -> ProbeResult<()>
where
    F: FnMut() -> ProbeResult<bool>,
{
    poll(options, waited_for, || Ok(predicate()?.then_some(()))).map(|_| ())
}
