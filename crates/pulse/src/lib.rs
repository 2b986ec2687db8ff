//! Pulse: a deterministic pulse-propagation circuit simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Pulse sub-crates. For most users, adding `pulse` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pulse::prelude::*;
//!
//! let text = "\
//! broadcaster -> a
//! %a -> inv, con
//! &inv -> b
//! %b -> con
//! &con -> output
//! ";
//! let graph = Graph::from_declarations(&parse_declarations(text).unwrap()).unwrap();
//! let mut sim = Simulator::new(graph, SimConfig::default()).unwrap();
//!
//! // Total pulses over 1000 presses.
//! assert_eq!(sim.pulse_product(1000).unwrap(), 11_687_500);
//!
//! // Start over before asking a different question.
//! sim.reset();
//! let first = sim.press().unwrap();
//! assert_eq!((first.tally.low, first.tally.high), (4, 4));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pulse-core` | Levels, ids, events, declarations, press errors |
//! | [`circuit`] | `pulse-circuit` | Node behaviors, graph construction, text parser |
//! | [`engine`] | `pulse-engine` | Scheduler, simulator, period extraction, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary types (`pulse-core`).
pub use pulse_core as types;

/// Node behaviors and circuit graphs (`pulse-circuit`).
///
/// [`circuit::Graph`] is built from [`types::Declaration`]s, usually
/// produced by [`circuit::parse_declarations`].
pub use pulse_circuit as circuit;

/// Press scheduling and analysis (`pulse-engine`).
///
/// [`engine::Simulator`] counts pulses over runs of presses and
/// extrapolates how many presses a target needs before it emits LOW.
pub use pulse_engine as engine;

/// Common imports for typical Pulse usage.
///
/// ```rust
/// use pulse::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pulse_core::{Declaration, Event, KindMarker, Level, NodeId, Origin, PressId};

    // Errors
    pub use pulse_core::{DeliveryError, PressError};
    pub use pulse_circuit::{GraphError, ParseError};
    pub use pulse_engine::{ConfigError, ExtractError};

    // Circuit
    pub use pulse_circuit::{parse_declarations, Behavior, Graph, Node, NodeKind};

    // Engine
    pub use pulse_engine::{
        EventLog, PeriodReport, PressMetrics, PulseObserver, PulseTally, SimConfig, Simulator,
    };
}
