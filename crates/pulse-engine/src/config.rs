//! Simulator configuration, validation, and error types.
//!
//! [`SimConfig`] holds the safety bounds of a simulation run.
//! [`validate()`](SimConfig::validate) checks them once when the
//! [`Simulator`](crate::Simulator) is constructed.

use std::error::Error;
use std::fmt;

/// Default per-press event budget.
pub const DEFAULT_MAX_EVENTS_PER_PRESS: usize = 1 << 20;

/// Default press bound for period extraction.
pub const DEFAULT_MAX_PRESSES: u64 = 1 << 32;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_events_per_press` is zero; not even the seed could be delivered.
    EventBudgetZero,
    /// `max_presses` is zero; period extraction could never record a press.
    PressLimitZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventBudgetZero => write!(f, "max_events_per_press must be at least 1"),
            Self::PressLimitZero => write!(f, "max_presses must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Bounds and options for a [`Simulator`](crate::Simulator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Events one press may deliver before it is aborted as
    /// non-terminating. Default: 2^20.
    pub max_events_per_press: usize,
    /// Presses period extraction may run before giving up. Default: 2^32.
    pub max_presses: u64,
    /// After extraction, keep pressing to check that each feeder fires
    /// again exactly one period later. Default: false.
    pub verify_periods: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_events_per_press: DEFAULT_MAX_EVENTS_PER_PRESS,
            max_presses: DEFAULT_MAX_PRESSES,
            verify_periods: false,
        }
    }
}

impl SimConfig {
    /// Validate all bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_events_per_press == 0 {
            return Err(ConfigError::EventBudgetZero);
        }
        if self.max_presses == 0 {
            return Err(ConfigError::PressLimitZero);
        }
        Ok(())
    }
}
