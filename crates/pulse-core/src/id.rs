//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a node within a circuit graph.
///
/// Node names are interned by the graph at construction time and
/// assigned sequential IDs. `NodeId(n)` is the n-th node of the graph:
/// declared nodes first, in declaration order, then the sinks that were
/// created for undeclared destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of this node in the graph's node table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing press counter.
///
/// Press numbering starts at 1 for the first press after a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PressId(pub u64);

impl fmt::Display for PressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PressId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
