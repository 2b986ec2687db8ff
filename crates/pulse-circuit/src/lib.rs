//! Node behaviors and circuit graphs for the Pulse simulator.
//!
//! The [`Behavior`] trait defines the per-node `deliver` contract; the
//! [`Node`] enum dispatches it over the closed set of node kinds. A
//! [`Graph`] is built once from a declaration table, wires every Memory
//! node's inputs, and then only changes through node state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod graph;
pub mod node;
pub mod parse;

pub use behavior::Behavior;
pub use graph::{Emissions, Graph, GraphError};
pub use node::{Broadcast, Memory, Node, NodeKind, Sink, Toggle};
pub use parse::{parse_declarations, ParseError};
