//! Circuit graph construction and per-event delivery.
//!
//! [`Graph::from_declarations`] runs once at startup: it interns node
//! names, resolves destinations (creating a sink for every name that is
//! never declared), wires the inputs of every Memory node, and selects
//! the entry node. After that the wiring is frozen; only node state
//! changes, and only through [`Graph::deliver`] and [`Graph::reset`].

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use pulse_core::{Declaration, DeliveryError, Event, NodeId};
use smallvec::SmallVec;
use tracing::debug;

use crate::behavior::Behavior;
use crate::node::{Node, NodeKind, Sink};

/// Events produced by one delivery, in destination order.
pub type Emissions = SmallVec<[Event; 4]>;

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from graph construction and graph queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two declarations share a name.
    DuplicateNode {
        /// The repeated name.
        name: String,
    },
    /// A name was looked up that the graph does not contain.
    UnknownNode {
        /// The missing name.
        name: String,
    },
    /// A node id was looked up that the graph does not contain.
    UnknownId {
        /// The missing id.
        id: NodeId,
    },
    /// No entry was designated and no Broadcast node was declared.
    NoEntry,
    /// No entry was designated and several Broadcast nodes compete.
    AmbiguousEntry {
        /// Names of every Broadcast node, in declaration order.
        candidates: Vec<String>,
    },
    /// A node expected to have exactly one feeder has zero or several.
    AmbiguousPredecessor {
        /// The node whose feeders were inspected.
        node: String,
        /// Every feeder found, in id order.
        found: Vec<String>,
    },
    /// The graph would need more than `u32::MAX` nodes.
    TooManyNodes {
        /// Number of nodes requested.
        count: usize,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNode { name } => write!(f, "node '{name}' declared twice"),
            Self::UnknownNode { name } => write!(f, "no node named '{name}'"),
            Self::UnknownId { id } => write!(f, "no node with id {id}"),
            Self::NoEntry => write!(f, "no broadcast node to use as entry"),
            Self::AmbiguousEntry { candidates } => {
                write!(f, "several broadcast nodes could be the entry: {candidates:?}")
            }
            Self::AmbiguousPredecessor { node, found } => {
                write!(
                    f,
                    "node '{node}' should have exactly one feeder, found {}: {found:?}",
                    found.len()
                )
            }
            Self::TooManyNodes { count } => {
                write!(f, "{count} nodes exceed the u32 id space")
            }
        }
    }
}

impl Error for GraphError {}

// ── Graph ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    name: String,
    node: Node,
    destinations: SmallVec<[NodeId; 4]>,
}

/// Immutable-after-construction node table with per-node state.
///
/// `NodeId(n)` indexes the n-th slot: declared nodes in declaration
/// order, then auto-created sinks in order of first mention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    slots: Vec<Slot>,
    index: IndexMap<String, NodeId>,
    entry: NodeId,
}

fn next_id(len: usize) -> Result<NodeId, GraphError> {
    u32::try_from(len)
        .map(NodeId)
        .map_err(|_| GraphError::TooManyNodes { count: len + 1 })
}

impl Graph {
    /// Build a graph whose entry is its sole Broadcast node.
    pub fn from_declarations(declarations: &[Declaration]) -> Result<Self, GraphError> {
        Self::build(declarations, None)
    }

    /// Build a graph with an explicitly designated entry node.
    pub fn with_entry(declarations: &[Declaration], entry: &str) -> Result<Self, GraphError> {
        Self::build(declarations, Some(entry))
    }

    fn build(declarations: &[Declaration], entry: Option<&str>) -> Result<Self, GraphError> {
        let mut index: IndexMap<String, NodeId> = IndexMap::with_capacity(declarations.len());
        let mut slots: Vec<Slot> = Vec::with_capacity(declarations.len());

        // 1. Intern declared names.
        let mut declared = Vec::with_capacity(declarations.len());
        for decl in declarations {
            if index.contains_key(&decl.name) {
                return Err(GraphError::DuplicateNode {
                    name: decl.name.clone(),
                });
            }
            let id = next_id(slots.len())?;
            index.insert(decl.name.clone(), id);
            slots.push(Slot {
                name: decl.name.clone(),
                node: Node::from_marker(decl.kind),
                destinations: SmallVec::new(),
            });
            declared.push(id);
        }

        // 2. Resolve destinations; undeclared names become sinks.
        let mut edges: Vec<(NodeId, NodeId)> = Vec::new();
        for (decl, &source) in declarations.iter().zip(&declared) {
            let mut destinations = SmallVec::with_capacity(decl.destinations.len());
            for name in &decl.destinations {
                let dest = match index.get(name) {
                    Some(&id) => id,
                    None => {
                        let id = next_id(slots.len())?;
                        debug!(sink = %name, "creating sink for undeclared destination");
                        index.insert(name.clone(), id);
                        slots.push(Slot {
                            name: name.clone(),
                            node: Node::Sink(Sink),
                            destinations: SmallVec::new(),
                        });
                        id
                    }
                };
                destinations.push(dest);
                edges.push((source, dest));
            }
            slots[source.index()].destinations = destinations;
        }

        // 3. Wire Memory inputs. Declaration order need not match edge
        //    order, so this runs only once every node exists.
        for (source, dest) in edges {
            if let Some(memory) = slots[dest.index()].node.as_memory_mut() {
                memory.register_input(source);
            }
        }

        // 4. Select the entry node.
        let entry = match entry {
            Some(name) => *index.get(name).ok_or_else(|| GraphError::UnknownNode {
                name: name.to_string(),
            })?,
            None => {
                let broadcasts: Vec<NodeId> = index
                    .values()
                    .copied()
                    .filter(|id| slots[id.index()].node.kind() == NodeKind::Broadcast)
                    .collect();
                match broadcasts.as_slice() {
                    [] => return Err(GraphError::NoEntry),
                    [only] => *only,
                    many => {
                        return Err(GraphError::AmbiguousEntry {
                            candidates: many
                                .iter()
                                .map(|id| slots[id.index()].name.clone())
                                .collect(),
                        })
                    }
                }
            }
        };

        debug!(
            nodes = slots.len(),
            declared = declared.len(),
            entry = %slots[entry.index()].name,
            "circuit graph built"
        );

        Ok(Self {
            slots,
            index,
            entry,
        })
    }

    /// Number of nodes, auto-created sinks included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the graph has no nodes. Never true for a built graph,
    /// which always holds its entry node.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The node every press seeds.
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Look up a node by name.
    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// The name of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.slots.get(id.index()).map(|s| s.name.as_str())
    }

    /// A node and its current state.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).map(|s| &s.node)
    }

    /// Destinations of a node, in emission order. Empty for sinks and
    /// for ids outside the graph.
    pub fn destinations(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.index())
            .map(|s| s.destinations.as_slice())
            .unwrap_or(&[])
    }

    /// All node ids, in id order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    /// Distinct nodes with an edge into `target`, in id order.
    pub fn feeders(&self, target: NodeId) -> Vec<NodeId> {
        self.ids()
            .filter(|&id| self.slots[id.index()].destinations.contains(&target))
            .collect()
    }

    /// The single feeder of the node called `name`.
    ///
    /// Used to find the node in front of a terminal sink, which is the
    /// usual target for period extraction.
    pub fn predecessor_of(&self, name: &str) -> Result<NodeId, GraphError> {
        let target = self.id(name).ok_or_else(|| GraphError::UnknownNode {
            name: name.to_string(),
        })?;
        match self.feeders(target).as_slice() {
            [only] => Ok(*only),
            found => Err(GraphError::AmbiguousPredecessor {
                node: name.to_string(),
                found: found
                    .iter()
                    .map(|&id| self.slots[id.index()].name.clone())
                    .collect(),
            }),
        }
    }

    /// Hand `event` to its destination node and fan the response out.
    ///
    /// Only the destination's state changes. The returned events are in
    /// destination order, all carrying the same level.
    pub fn deliver(&mut self, event: &Event) -> Result<Emissions, DeliveryError> {
        let from = event.destination;
        let slot = self
            .slots
            .get_mut(from.index())
            .ok_or(DeliveryError::UnknownNode { node: from })?;
        let Some(level) = slot.node.deliver(event)? else {
            return Ok(Emissions::new());
        };
        Ok(slot
            .destinations
            .iter()
            .map(|&to| Event::emitted(from, level, to))
            .collect())
    }

    /// Return every node to its initial state. Wiring is untouched.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.node.reset_default();
        }
    }
}
