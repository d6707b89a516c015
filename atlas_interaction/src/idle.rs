// Copyright 2025 the Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot idle deadline.
//!
//! An [`IdleTimer`] is a deadline, not a registered callback. The owner of
//! the timer decides when to [`poll`](IdleTimer::poll) it, usually from the
//! host event loop at the time returned by [`IdleTimer::deadline`]. Because
//! nothing outside the owner refers to the timer, dropping the owner drops
//! the pending deadline with it: there is no callback left to deliver.
//!
//! ```
//! use atlas_interaction::IdleTimer;
//!
//! let mut timer = IdleTimer::new(750);
//! timer.start(1_000);
//! timer.start(1_200); // restart while pending
//! assert!(!timer.poll(1_900));
//! assert!(timer.poll(1_950));
//! assert!(!timer.is_pending()); // no repetition
//! ```

/// Cancelable, restartable one-shot timer driven by caller-provided timestamps.
///
/// Timestamps are milliseconds on any monotonic clock the host chooses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdleTimer {
    timeout: u64,
    deadline: Option<u64>,
}

impl IdleTimer {
    /// Inactivity threshold used when none is configured (milliseconds).
    pub const DEFAULT_TIMEOUT: u64 = 750;

    /// Create a stopped timer that fires `timeout` milliseconds after each start.
    pub const fn new(timeout: u64) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    /// The configured threshold.
    pub const fn timeout(&self) -> u64 {
        self.timeout
    }

    /// When the timer will fire, if it is pending.
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Whether a countdown is in progress.
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start the countdown at `now`, restarting it if it was already pending.
    pub fn start(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.timeout));
    }

    /// Cancel the countdown without firing.
    ///
    /// Returns `true` if a countdown was pending.
    pub fn stop(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Fire if the deadline has been reached.
    ///
    /// Returns `true` exactly once per countdown; the timer is stopped afterwards.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}
