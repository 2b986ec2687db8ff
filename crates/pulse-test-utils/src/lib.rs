//! Test utilities and fixture circuits for Pulse development.
//!
//! Provides the small reference circuits used throughout the test
//! suites ([`scenario_one`], [`scenario_two`]) and a generator for
//! banks of independent counters with known periods
//! ([`counter_bank`]), plus [`build`] to turn any of them into a graph.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{counter_bank, counter_chain, scenario_one, scenario_two, trigger_wave};

use pulse_circuit::Graph;
use pulse_core::Declaration;

/// Build a graph from fixture declarations, panicking on error.
pub fn build(declarations: &[Declaration]) -> Graph {
    Graph::from_declarations(declarations).expect("fixture declarations are well-formed")
}

/// Build a graph from a text description, panicking on error.
pub fn build_text(text: &str) -> Graph {
    let declarations =
        pulse_circuit::parse_declarations(text).expect("fixture text is well-formed");
    build(&declarations)
}
