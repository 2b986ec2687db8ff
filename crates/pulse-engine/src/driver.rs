//! The [`Simulator`]: a circuit graph plus the scheduler that drives it.
//!
//! Each [`press()`](Simulator::press) runs one complete propagation
//! wave sequence through the graph. [`run_presses()`](Simulator::run_presses)
//! repeats that and totals the pulses; period extraction lives in
//! [`period`](crate::period).
//!
//! # Ownership model
//!
//! `Simulator` is [`Send`] and takes `&mut self` for everything that
//! advances the circuit. Node state carries over from one press to the
//! next until [`reset()`](Simulator::reset) is called; independent runs
//! on the same simulator must reset in between.

use pulse_circuit::Graph;
use pulse_core::PressError;
use tracing::debug;

use crate::config::{ConfigError, SimConfig};
use crate::metrics::{PressMetrics, PulseTally};
use crate::scheduler::{PulseObserver, Scheduler, Unobserved};

// Compile-time assertion: Simulator can move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulator>();
    }
};

/// Single-threaded pulse simulator over one circuit.
///
/// # Example
///
/// ```
/// use pulse_circuit::{parse_declarations, Graph};
/// use pulse_engine::{SimConfig, Simulator};
///
/// let decls = parse_declarations("broadcaster -> a, b, c\n%a -> b\n%b -> c\n%c -> inv\n&inv -> a")
///     .unwrap();
/// let graph = Graph::from_declarations(&decls).unwrap();
/// let mut sim = Simulator::new(graph, SimConfig::default()).unwrap();
///
/// let tally = sim.run_presses(1000).unwrap();
/// assert_eq!((tally.low, tally.high), (8000, 4000));
/// assert_eq!(tally.product(), 32_000_000);
/// ```
#[derive(Debug)]
pub struct Simulator {
    graph: Graph,
    scheduler: Scheduler,
    config: SimConfig,
}

impl Simulator {
    /// Create a simulator over `graph`.
    ///
    /// The graph is used as-is: if it has been driven before, call
    /// [`reset()`](Self::reset) before measuring anything.
    pub fn new(graph: Graph, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            graph,
            scheduler: Scheduler::new(config.max_events_per_press)?,
            config,
        })
    }

    /// The circuit and its current node state.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The configuration this simulator was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Presses run since construction or the last reset.
    pub fn presses(&self) -> u64 {
        self.scheduler.presses()
    }

    /// Give the graph back, with whatever state it has reached.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Run one press.
    pub fn press(&mut self) -> Result<PressMetrics, PressError> {
        self.scheduler.press(&mut self.graph, &mut Unobserved)
    }

    /// Run one press, reporting every delivered event to `observer`.
    pub fn press_observed<O: PulseObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<PressMetrics, PressError> {
        self.scheduler.press(&mut self.graph, observer)
    }

    /// Run `n` presses and total every pulse delivered, seeds included.
    ///
    /// Node state is not reset before or between presses.
    pub fn run_presses(&mut self, n: u64) -> Result<PulseTally, PressError> {
        let mut total = PulseTally::default();
        for _ in 0..n {
            total += self.press()?.tally;
        }
        debug!(
            presses = n,
            high = total.high,
            low = total.low,
            "pulse run complete"
        );
        Ok(total)
    }

    /// `high * low` over `n` presses. See [`run_presses()`](Self::run_presses).
    pub fn pulse_product(&mut self, n: u64) -> Result<u128, PressError> {
        Ok(self.run_presses(n)?.product())
    }

    /// Return every node to its initial state and restart press
    /// numbering. Wiring is untouched.
    pub fn reset(&mut self) {
        self.graph.reset();
        self.scheduler.reset();
    }
}
