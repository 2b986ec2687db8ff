//! Pulse counts for single presses and whole runs.
//!
//! [`PulseTally`] counts delivered pulses by level; [`PressMetrics`]
//! wraps one press's tally with its queue high-water mark.

use std::ops::AddAssign;

use pulse_core::{Level, PressId};

/// Number of HIGH and LOW pulses delivered.
///
/// Every event placed on the queue is delivered exactly once, so this
/// is also the number of events enqueued, press seeds included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PulseTally {
    /// HIGH pulses delivered.
    pub high: u64,
    /// LOW pulses delivered.
    pub low: u64,
}

impl PulseTally {
    /// Count one pulse.
    pub fn record(&mut self, level: Level) {
        match level {
            Level::High => self.high += 1,
            Level::Low => self.low += 1,
        }
    }

    /// Total pulses of either level.
    pub fn total(&self) -> u64 {
        self.high + self.low
    }

    /// `high * low`, widened so it cannot overflow.
    pub fn product(&self) -> u128 {
        u128::from(self.high) * u128::from(self.low)
    }
}

impl AddAssign for PulseTally {
    fn add_assign(&mut self, rhs: Self) {
        self.high += rhs.high;
        self.low += rhs.low;
    }
}

/// What one press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressMetrics {
    /// Which press, counted from 1 since the last reset.
    pub press: PressId,
    /// Pulses delivered during the press.
    pub tally: PulseTally,
    /// Largest number of events waiting in the queue at once.
    pub max_queue_depth: usize,
}

impl PressMetrics {
    /// Empty metrics for `press`.
    pub fn new(press: PressId) -> Self {
        Self {
            press,
            tally: PulseTally::default(),
            max_queue_depth: 0,
        }
    }
}
