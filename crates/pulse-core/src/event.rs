//! Pulse events exchanged between nodes.

use std::fmt;

use crate::id::NodeId;
use crate::level::Level;

/// Where an [`Event`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The synthetic seed pulse injected by a press.
    Button,
    /// A pulse emitted by a node of the graph.
    Node(NodeId),
}

impl Origin {
    /// The emitting node, or `None` for the press seed.
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Button => None,
            Self::Node(id) => Some(id),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button => write!(f, "button"),
            Self::Node(id) => write!(f, "node {id}"),
        }
    }
}

/// A single pulse in flight: `(source, level, destination)`.
///
/// Events are created as a side effect of a node processing a received
/// level, or as the seed of a press, and are consumed exactly once by
/// the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Event {
    /// Who sent the pulse.
    pub source: Origin,
    /// The pulse level.
    pub level: Level,
    /// The node the pulse is addressed to.
    pub destination: NodeId,
}

impl Event {
    /// The LOW pulse that starts every press, addressed to `entry`.
    pub fn seed(entry: NodeId) -> Self {
        Self {
            source: Origin::Button,
            level: Level::Low,
            destination: entry,
        }
    }

    /// A pulse emitted by node `from`.
    pub fn emitted(from: NodeId, level: Level, destination: NodeId) -> Self {
        Self {
            source: Origin::Node(from),
            level,
            destination,
        }
    }
}
