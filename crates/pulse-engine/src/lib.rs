//! Press scheduling and analysis for Pulse circuits.
//!
//! [`Simulator`] owns a circuit [`Graph`](pulse_circuit::Graph) and a
//! breadth-ordered [`Scheduler`]. It counts pulses over a run of presses
//! ([`Simulator::run_presses`]) and extrapolates how many presses a
//! target node needs before it emits LOW
//! ([`Simulator::presses_until_low`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod metrics;
pub mod period;
pub mod scheduler;

pub use config::{ConfigError, SimConfig};
pub use driver::Simulator;
pub use metrics::{PressMetrics, PulseTally};
pub use period::{gcd, lcm, ExtractError, PeriodReport};
pub use scheduler::{EventLog, PulseObserver, Scheduler, Unobserved};
