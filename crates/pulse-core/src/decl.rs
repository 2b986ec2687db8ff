//! Node declarations: the node table handed to the graph builder.
//!
//! A [`Declaration`] names a node, selects its kind, and lists its
//! destinations in emission order. Names that appear only as
//! destinations are not declared; the graph turns them into sinks.

use std::fmt;

/// Kind selector for a declared node.
///
/// Sinks are never declared; they exist only as undeclared destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KindMarker {
    /// Re-emits every received level to all destinations.
    Broadcast,
    /// Flips on each LOW input and reports its new state.
    Toggle,
    /// Remembers the last level from each input; emits LOW only when
    /// every remembered level is HIGH.
    Memory,
}

impl fmt::Display for KindMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast => write!(f, "broadcast"),
            Self::Toggle => write!(f, "toggle"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// One entry of the node table: `(name, kind, destinations)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Unique node name.
    pub name: String,
    /// Behavior of the node.
    pub kind: KindMarker,
    /// Destination names, in emission order.
    pub destinations: Vec<String>,
}

impl Declaration {
    /// Build a declaration of any kind.
    pub fn new<I, S>(name: impl Into<String>, kind: KindMarker, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            destinations: destinations.into_iter().map(Into::into).collect(),
        }
    }

    /// Declare a Broadcast node.
    pub fn broadcast<I, S>(name: impl Into<String>, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, KindMarker::Broadcast, destinations)
    }

    /// Declare a Toggle node.
    pub fn toggle<I, S>(name: impl Into<String>, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, KindMarker::Toggle, destinations)
    }

    /// Declare a Memory node.
    pub fn memory<I, S>(name: impl Into<String>, destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, KindMarker::Memory, destinations)
    }
}
