//! Polling and driving options.
//!
//! The find-and-act core never blocks on its own. The helpers here are the
//! outer loops a test uses around it: waiting for a lookup to become
//! satisfiable, and bounding how long a caret may be nudged.

use crate::result::{TientoError, TientoResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default upper bound on caret nudges before giving up
pub const DEFAULT_MAX_STEPS: usize = 1_000;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
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

// =============================================================================
// DRIVE OPTIONS
// =============================================================================

/// Bounds for the loop that nudges a caret towards its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveOptions {
    /// Give up after this many nudges
    pub max_steps: usize,
    /// Give up after this many milliseconds
    pub timeout_ms: u64,
    /// Pause between nudges in milliseconds (0 = no pause)
    pub step_delay_ms: u64,
}

impl Default for DriveOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            step_delay_ms: 0,
        }
    }
}

impl DriveOptions {
    /// Create new drive options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step budget
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the pause between nudges in milliseconds
    #[must_use]
    pub const fn with_step_delay(mut self, step_delay_ms: u64) -> Self {
        self.step_delay_ms = step_delay_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get step delay as Duration
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait operation
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of times the condition was evaluated
    pub polls: usize,
    /// Description of what was waited for
    pub waited_for: String,
}

/// Poll `predicate` until it returns true or the timeout expires.
///
/// The predicate is evaluated at least once, even with a zero timeout.
///
/// # Errors
///
/// Returns [`TientoError::Timeout`] if the predicate never held.
pub fn wait_until<F>(
    mut predicate: F,
    description: impl Into<String>,
    options: &WaitOptions,
) -> TientoResult<WaitResult>
where
    F: FnMut() -> bool,
{
    let description = description.into();
    let start = Instant::now();
    let mut polls = 0;

    loop {
        polls += 1;
        if predicate() {
            tracing::trace!(polls, waited_for = %description, "wait condition met");
            return Ok(WaitResult {
                elapsed: start.elapsed(),
                polls,
                waited_for: description,
            });
        }
        if start.elapsed() >= options.timeout() {
            break;
        }
        std::thread::sleep(options.poll_interval());
    }

    tracing::debug!(polls, waited_for = %description, "wait timed out");
    Err(TientoError::Timeout {
        ms: options.timeout_ms,
    })
}
