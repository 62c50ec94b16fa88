// Copyright (c) 2025 - Cowboy AI, Inc.
//! Fetch interval backoff
//!
//! The interval starts at half the minimum and doubles after every round,
//! capped at the maximum. It never resets: a long-running process polls its
//! peers less and less often, whatever the outcome of each round.

use std::time::Duration;

/// Nominal minimum fetch interval
pub const FETCH_INTERVAL_MIN: Duration = Duration::from_secs(10);

/// Fetch interval cap (one hour)
pub const FETCH_INTERVAL_MAX: Duration = Duration::from_secs(3600);

/// Per-peer request timeout
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Monotone exponential backoff state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSchedule {
    interval: Duration,
    max: Duration,
    rounds: u64,
}

impl FetchSchedule {
    /// Start at `min / 2`; the first doubling brings it to `min`
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            interval: (min / 2).min(max),
            max,
            rounds: 0,
        }
    }

    /// Interval before the next round
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Rounds completed so far
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Record a completed round and return the new interval
    pub fn advance(&mut self) -> Duration {
        self.rounds += 1;
        self.interval = self.interval.saturating_mul(2).min(self.max);
        self.interval
    }
}

impl Default for FetchSchedule {
    fn default() -> Self {
        Self::new(FETCH_INTERVAL_MIN, FETCH_INTERVAL_MAX)
    }
}
