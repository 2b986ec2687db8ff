//! The two-valued pulse [`Level`].

use std::fmt;
use std::ops::Not;

/// The value carried by a pulse.
///
/// Every node starts from `Low`: Toggle nodes are off and Memory nodes
/// remember `Low` for each input until told otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// A low pulse. Also the level of every press seed.
    #[default]
    Low,
    /// A high pulse.
    High,
}

impl Level {
    /// Whether this is [`Level::High`].
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Whether this is [`Level::Low`].
    pub fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for Level {
    /// `true` maps to `High`, `false` to `Low`.
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}
