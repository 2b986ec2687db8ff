//! Core types for the Pulse circuit simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: pulse levels,
//! node and press identifiers, events, node declarations, and the
//! error types raised while a press is being drained.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decl;
pub mod error;
pub mod event;
pub mod id;
pub mod level;

pub use decl::{Declaration, KindMarker};
pub use error::{DeliveryError, PressError};
pub use event::{Event, Origin};
pub use id::{NodeId, PressId};
pub use level::Level;
