//! Period extraction: how many presses until a target Memory emits LOW.
//!
//! A Memory node emits LOW only when every one of its inputs last sent
//! HIGH. When each feeder of the target is an independent counter that
//! sends HIGH once every `p_i` presses, the first press on which all of
//! them line up is `lcm(p_1, …, p_k)`. Simulating that far is usually
//! out of reach, so [`Simulator::presses_until_low`] presses only until
//! every feeder has sent its first HIGH and combines those press indices.
//!
//! # Periodicity assumption
//!
//! The first HIGH press index of each feeder is taken to be its period.
//! Nothing checks this by default; a feeder with an offset or an
//! irregular cycle produces a wrong answer without any error. Setting
//! [`SimConfig::verify_periods`](crate::SimConfig::verify_periods) keeps
//! pressing until `2 * max(period)` and rejects any feeder whose second
//! HIGH does not land on exactly twice its first. That catches offsets
//! but is not a proof of periodicity.

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use pulse_circuit::GraphError;
use pulse_core::{Event, Level, NodeId, PressError, PressId};
use tracing::{debug, info};

use crate::driver::Simulator;
use crate::scheduler::PulseObserver;

// ── Arithmetic ─────────────────────────────────────────────────────

/// Greatest common divisor. `gcd(0, 0) == 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple, or `None` if it does not fit in `u64`.
///
/// `lcm(0, n) == 0`.
///
/// ```
/// use pulse_engine::lcm;
///
/// assert_eq!(lcm(4, 6), Some(12));
/// assert_eq!(lcm(u64::MAX, 2), None);
/// ```
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from period extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Nothing has an edge into the target, so it can never fire.
    NoFeeders {
        /// Name of the target node.
        target: String,
    },
    /// Some feeders never sent HIGH within the configured press limit.
    PressLimitReached {
        /// The limit that was hit.
        limit: u64,
        /// Feeders still unaccounted for, in id order.
        missing: Vec<String>,
    },
    /// Verification found a feeder whose second HIGH is not at twice its
    /// first.
    AperiodicFeeder {
        /// Name of the feeder.
        feeder: String,
        /// Press of its first HIGH toward the target.
        first: u64,
        /// Press of its second HIGH, if one was seen before checking stopped.
        next: Option<u64>,
    },
    /// The combined period does not fit in `u64`.
    Overflow {
        /// The per-feeder periods that were being combined.
        periods: Vec<u64>,
    },
    /// The target could not be resolved.
    Target(GraphError),
    /// A press failed while extracting.
    Press(PressError),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFeeders { target } => write!(f, "node '{target}' has no feeders"),
            Self::PressLimitReached { limit, missing } => {
                write!(f, "no HIGH from {missing:?} within {limit} presses")
            }
            Self::AperiodicFeeder {
                feeder,
                first,
                next: Some(next),
            } => write!(
                f,
                "feeder '{feeder}' first fired at press {first} but next at {next}, not {}",
                first.saturating_mul(2)
            ),
            Self::AperiodicFeeder {
                feeder,
                first,
                next: None,
            } => write!(
                f,
                "feeder '{feeder}' first fired at press {first} but not again by press {}",
                first.saturating_mul(2)
            ),
            Self::Overflow { periods } => {
                write!(f, "lcm of {periods:?} overflows u64")
            }
            Self::Target(e) => write!(f, "target: {e}"),
            Self::Press(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Target(e) => Some(e),
            Self::Press(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for ExtractError {
    fn from(e: GraphError) -> Self {
        Self::Target(e)
    }
}

impl From<PressError> for ExtractError {
    fn from(e: PressError) -> Self {
        Self::Press(e)
    }
}

// ── Report ─────────────────────────────────────────────────────────

/// Result of a successful extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodReport {
    /// Each feeder's period, keyed by feeder name, in id order.
    pub periods: IndexMap<String, u64>,
    /// Presses until the target first emits LOW: the lcm of `periods`.
    pub presses: u64,
    /// Presses actually simulated to obtain the report.
    pub simulated: u64,
}

// ── Feeder watch ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default)]
struct Hits {
    first: Option<u64>,
    next: Option<u64>,
}

/// Records when each feeder sends HIGH to the target.
struct FeederWatch {
    target: NodeId,
    press: u64,
    hits: IndexMap<NodeId, Hits>,
}

impl FeederWatch {
    fn new(target: NodeId, feeders: &[NodeId]) -> Self {
        Self {
            target,
            press: 0,
            hits: feeders.iter().map(|&id| (id, Hits::default())).collect(),
        }
    }

    fn all_first(&self) -> bool {
        self.hits.values().all(|h| h.first.is_some())
    }

    fn all_next(&self) -> bool {
        self.hits.values().all(|h| h.next.is_some())
    }
}

impl PulseObserver for FeederWatch {
    fn observe(&mut self, _press: PressId, event: &Event) {
        if event.destination != self.target || event.level != Level::High {
            return;
        }
        let Some(hits) = event.source.node().and_then(|n| self.hits.get_mut(&n)) else {
            return;
        };
        match hits.first {
            None => hits.first = Some(self.press),
            Some(first) if hits.next.is_none() && self.press > first => {
                hits.next = Some(self.press)
            }
            Some(_) => {}
        }
    }
}

// ── Extraction ─────────────────────────────────────────────────────

impl Simulator {
    /// Presses until `target` first emits LOW, extrapolated from the
    /// first HIGH of each of its feeders.
    ///
    /// Presses are counted from 1 starting with the next press; node
    /// state is used as-is, so call [`reset()`](Self::reset) first if
    /// anything has run before.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Target`] if `target` is not in the graph.
    /// - [`ExtractError::NoFeeders`] if nothing feeds `target`.
    /// - [`ExtractError::PressLimitReached`] if `max_presses` runs out.
    /// - [`ExtractError::AperiodicFeeder`] if verification is on and fails.
    /// - [`ExtractError::Overflow`] if the lcm exceeds `u64`.
    /// - [`ExtractError::Press`] if any press fails.
    pub fn presses_until_low(&mut self, target: NodeId) -> Result<PeriodReport, ExtractError> {
        let target_name = self
            .graph()
            .name(target)
            .ok_or(GraphError::UnknownId { id: target })?
            .to_string();
        let feeders = self.graph().feeders(target);
        if feeders.is_empty() {
            return Err(ExtractError::NoFeeders {
                target: target_name,
            });
        }

        let limit = self.config().max_presses;
        let mut watch = FeederWatch::new(target, &feeders);

        while !watch.all_first() {
            if watch.press >= limit {
                return Err(ExtractError::PressLimitReached {
                    limit,
                    missing: self.names_where(&watch, |h| h.first.is_none()),
                });
            }
            watch.press += 1;
            self.press_observed(&mut watch)?;
        }

        let periods: IndexMap<String, u64> = watch
            .hits
            .iter()
            .map(|(&id, h)| (self.feeder_name(id), h.first.unwrap_or_default()))
            .collect();
        for (feeder, period) in &periods {
            debug!(feeder = %feeder, period, "feeder period");
        }

        if self.config().verify_periods {
            self.verify(&mut watch, limit)?;
        }

        let values: Vec<u64> = periods.values().copied().collect();
        let presses = values
            .iter()
            .try_fold(1u64, |acc, &p| lcm(acc, p))
            .ok_or_else(|| ExtractError::Overflow {
                periods: values.clone(),
            })?;

        info!(
            node = %target_name,
            feeders = periods.len(),
            presses,
            simulated = watch.press,
            "period extraction complete"
        );
        Ok(PeriodReport {
            periods,
            presses,
            simulated: watch.press,
        })
    }

    /// Like [`presses_until_low()`](Self::presses_until_low), with the
    /// target being the unique feeder of the node called `sink`.
    pub fn presses_until_sink_low(&mut self, sink: &str) -> Result<PeriodReport, ExtractError> {
        let target = self.graph().predecessor_of(sink)?;
        self.presses_until_low(target)
    }

    /// Keep pressing until every feeder has fired twice or `2 * max(first)`
    /// is reached, then check every second HIGH is at twice the first.
    fn verify(&mut self, watch: &mut FeederWatch, limit: u64) -> Result<(), ExtractError> {
        let horizon = watch
            .hits
            .values()
            .filter_map(|h| h.first)
            .max()
            .unwrap_or_default()
            .saturating_mul(2);

        while watch.press < horizon && !watch.all_next() {
            if watch.press >= limit {
                return Err(ExtractError::PressLimitReached {
                    limit,
                    missing: self.names_where(watch, |h| h.next.is_none()),
                });
            }
            watch.press += 1;
            self.press_observed(watch)?;
        }

        for (&id, hits) in &watch.hits {
            let first = hits.first.unwrap_or_default();
            if hits.next != first.checked_mul(2) {
                return Err(ExtractError::AperiodicFeeder {
                    feeder: self.feeder_name(id),
                    first,
                    next: hits.next,
                });
            }
        }
        debug!(presses = watch.press, "feeder periods verified");
        Ok(())
    }

    fn feeder_name(&self, id: NodeId) -> String {
        self.graph().name(id).unwrap_or_default().to_string()
    }

    fn names_where(&self, watch: &FeederWatch, pred: impl Fn(&Hits) -> bool) -> Vec<String> {
        watch
            .hits
            .iter()
            .filter(|(_, h)| pred(h))
            .map(|(&id, _)| self.feeder_name(id))
            .collect()
    }
}
