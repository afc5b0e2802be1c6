//! Countdown timer and the one-second tick scheduler driving it

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// Cadence of countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Continuing(u64),
    Expired,
}

/// Remaining-time counter for one reminder cycle.
///
/// `remaining_seconds` only ever decreases between rearms and never goes below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownTimer {
    remaining_seconds: u64,
    interval_seconds: u64,
}

impl CountdownTimer {
    /// Start a cycle with `remaining_seconds = interval_seconds`
    pub fn arm(interval_seconds: u64) -> Self {
        debug_assert!(interval_seconds > 0, "interval must be positive");
        Self {
            remaining_seconds: interval_seconds,
            interval_seconds,
        }
    }

    /// Reset to the full interval
    pub fn rearm(&mut self) {
        self.remaining_seconds = self.interval_seconds;
    }

    /// Decrement by exactly one second; `Expired` once zero is reached
    pub fn tick(&mut self) -> TickResult {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            TickResult::Expired
        } else {
            TickResult::Continuing(self.remaining_seconds)
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn interval_seconds(&self) -> u64 {
        self.interval_seconds
    }
}

/// Re-arming one-shot tick schedule.
///
/// Each firing has to be followed by an explicit `arm()` for the next one, so
/// ticks never overlap. Missed ticks (e.g. across system sleep) are not made up.
#[derive(Debug, Default)]
pub struct Ticker {
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick one period from now
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + TICK_PERIOD);
    }

    /// Drop any pending tick
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Consume the pending tick, if any
    pub fn take(&mut self) -> Option<Instant> {
        self.deadline.take()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
