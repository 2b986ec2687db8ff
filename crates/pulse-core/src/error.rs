//! Error types raised while pulses are delivered.
//!
//! Organized by layer: [`DeliveryError`] for a single node receiving a
//! single pulse, [`PressError`] for the scheduler draining one press.
//! Structural errors (graph construction, parsing, configuration) live
//! next to the code that detects them.

use std::error::Error;
use std::fmt;

use crate::event::Origin;
use crate::id::{NodeId, PressId};

/// A node could not process a delivered pulse.
///
/// Both variants are wiring defects: a correctly built graph never
/// produces them. They are reported instead of being papered over
/// because a silently defaulted Memory input would corrupt every
/// later emission of that node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryError {
    /// A Memory node received a pulse from a source that is not one
    /// of its registered inputs.
    UndeclaredInput {
        /// The receiving Memory node.
        node: NodeId,
        /// The unregistered sender.
        source: Origin,
    },
    /// The event is addressed to a node that is not in the graph.
    UnknownNode {
        /// The missing destination.
        node: NodeId,
    },
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredInput { node, source } => {
                write!(f, "memory node {node} has no input registered for {source}")
            }
            Self::UnknownNode { node } => write!(f, "node {node} is not in the graph"),
        }
    }
}

impl Error for DeliveryError {}

/// Errors from the scheduler while draining one press.
///
/// On either error the queue is cleared; node state keeps whatever the
/// deliveries before the failure wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressError {
    /// A node rejected a delivered pulse.
    DeliveryFailed {
        /// The press during which delivery failed.
        press: PressId,
        /// The underlying delivery error.
        reason: DeliveryError,
    },
    /// The press delivered more events than the configured budget,
    /// which is taken to mean the wiring regenerates pulses forever.
    EventBudgetExceeded {
        /// The press that was aborted.
        press: PressId,
        /// The configured per-press event budget.
        limit: usize,
    },
}

impl fmt::Display for PressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeliveryFailed { press, reason } => {
                write!(f, "press {press}: delivery failed: {reason}")
            }
            Self::EventBudgetExceeded { press, limit } => {
                write!(f, "press {press}: exceeded budget of {limit} events")
            }
        }
    }
}

impl Error for PressError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DeliveryFailed { reason, .. } => Some(reason),
            Self::EventBudgetExceeded { .. } => None,
        }
    }
}
