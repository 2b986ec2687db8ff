//! The [`Behavior`] trait.
//!
//! A behavior is the state machine behind one node. The graph owns one
//! behavior per node and hands it every pulse addressed to that node;
//! the behavior answers with the level it emits to all of the node's
//! destinations, if any.

use pulse_core::{DeliveryError, Event, Level};

/// Per-node pulse handling.
///
/// # Contract
///
/// - `deliver()` touches only the receiving node's own state. Nodes
///   never read or write each other; everything goes through events.
/// - `deliver()` MUST be deterministic: same state and input produce
///   the same new state and output.
/// - The returned level, if any, is sent to **every** destination of
///   the node, in destination order.
/// - `reset_default()` restores the initial state and never changes
///   which inputs a node knows about.
///
/// # Examples
///
/// ```
/// use pulse_circuit::{Behavior, Toggle};
/// use pulse_core::{Event, Level, NodeId};
///
/// let mut toggle = Toggle::default();
/// let low = Event::seed(NodeId(0));
///
/// assert_eq!(toggle.deliver(&low).unwrap(), Some(Level::High));
/// assert_eq!(toggle.deliver(&low).unwrap(), Some(Level::Low));
/// ```
pub trait Behavior {
    /// Process one pulse addressed to this node.
    ///
    /// `event.destination` is this node. Returns the level emitted to
    /// all destinations, or `None` when the node stays silent.
    fn deliver(&mut self, event: &Event) -> Result<Option<Level>, DeliveryError>;

    /// Return to the initial state.
    fn reset_default(&mut self);
}
