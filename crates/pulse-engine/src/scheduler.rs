//! Press scheduler: the breadth-ordered event loop.
//!
//! [`Scheduler`] owns a single FIFO queue of [`Event`]s. One press seeds
//! the queue with a LOW pulse to the graph's entry node and drains it,
//! appending every emission to the back.
//!
//! # Ordering
//!
//! All events produced while processing event *k* land after *k* and
//! before anything produced by *k+1, k+2, …*. Memory nodes therefore see
//! every pulse of one propagation wave before any pulse of the next.
//! Results depend on this: a depth-first delivery order gives different
//! answers on circuits with feedback through Memory nodes.
//!
//! # Termination
//!
//! A press ends when the queue empties. That is guaranteed only when no
//! chain of deliveries inside one press can regenerate pulses without
//! bound, which holds for the circuits this simulator targets but is not
//! checked. The per-press event budget turns a runaway press into
//! [`PressError::EventBudgetExceeded`] instead of a hang.

use std::collections::VecDeque;

use pulse_circuit::Graph;
use pulse_core::{Event, NodeId, PressError, PressId};
use tracing::{trace, warn};

use crate::config::ConfigError;
use crate::metrics::PressMetrics;

// ── Observers ──────────────────────────────────────────────────────

/// Sees every event as it is delivered.
///
/// Called before the destination node processes the event, in delivery
/// order. Any `FnMut(PressId, &Event)` closure is an observer.
pub trait PulseObserver {
    /// Called once per delivered event.
    fn observe(&mut self, press: PressId, event: &Event);
}

impl<F: FnMut(PressId, &Event)> PulseObserver for F {
    fn observe(&mut self, press: PressId, event: &Event) {
        self(press, event)
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unobserved;

impl PulseObserver for Unobserved {
    fn observe(&mut self, _press: PressId, _event: &Event) {}
}

/// Observer that records every delivered event in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    entries: Vec<(PressId, Event)>,
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in delivery order.
    pub fn entries(&self) -> &[(PressId, Event)] {
        &self.entries
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events sent by `node`, in delivery order.
    pub fn emitted_by(&self, node: NodeId) -> impl Iterator<Item = &Event> + '_ {
        self.entries
            .iter()
            .map(|(_, ev)| ev)
            .filter(move |ev| ev.source.node() == Some(node))
    }

    /// Events addressed to `node`, in delivery order.
    pub fn delivered_to(&self, node: NodeId) -> impl Iterator<Item = &Event> + '_ {
        self.entries
            .iter()
            .map(|(_, ev)| ev)
            .filter(move |ev| ev.destination == node)
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl PulseObserver for EventLog {
    fn observe(&mut self, press: PressId, event: &Event) {
        self.entries.push((press, *event));
    }
}

// ── Scheduler ──────────────────────────────────────────────────────

/// Single-threaded FIFO event loop.
///
/// Owned by one [`Simulator`](crate::Simulator); never shared, so two
/// runs cannot leak events into each other through a stale queue.
#[derive(Debug)]
pub struct Scheduler {
    queue: VecDeque<Event>,
    max_events_per_press: usize,
    presses: u64,
}

impl Scheduler {
    /// Create a scheduler with the given per-press event budget.
    ///
    /// Returns [`ConfigError::EventBudgetZero`] if `max_events_per_press`
    /// is zero.
    pub fn new(max_events_per_press: usize) -> Result<Self, ConfigError> {
        if max_events_per_press == 0 {
            return Err(ConfigError::EventBudgetZero);
        }
        Ok(Self {
            queue: VecDeque::new(),
            max_events_per_press,
            presses: 0,
        })
    }

    /// Presses started since construction or the last reset.
    pub fn presses(&self) -> u64 {
        self.presses
    }

    /// Events waiting in the queue. Zero between presses.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drop queued events and restart press numbering.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.presses = 0;
    }

    /// Run one press to completion.
    ///
    /// Seeds a LOW pulse to `graph.entry()` and delivers events in FIFO
    /// order until none remain, reporting each to `observer` just before
    /// delivery.
    ///
    /// # Errors
    ///
    /// [`PressError::DeliveryFailed`] if a node rejects a pulse, and
    /// [`PressError::EventBudgetExceeded`] if the press would deliver
    /// more events than the budget. Either way the queue is emptied.
    pub fn press<O: PulseObserver + ?Sized>(
        &mut self,
        graph: &mut Graph,
        observer: &mut O,
    ) -> Result<PressMetrics, PressError> {
        self.presses += 1;
        let press = PressId(self.presses);
        let mut metrics = PressMetrics::new(press);

        self.queue.clear();
        self.queue.push_back(Event::seed(graph.entry()));
        metrics.max_queue_depth = 1;

        while let Some(event) = self.queue.pop_front() {
            if metrics.tally.total() >= self.max_events_per_press as u64 {
                self.queue.clear();
                warn!(
                    %press,
                    limit = self.max_events_per_press,
                    "press aborted: event budget exceeded"
                );
                return Err(PressError::EventBudgetExceeded {
                    press,
                    limit: self.max_events_per_press,
                });
            }

            metrics.tally.record(event.level);
            observer.observe(press, &event);

            match graph.deliver(&event) {
                Ok(emitted) => self.queue.extend(emitted),
                Err(reason) => {
                    self.queue.clear();
                    return Err(PressError::DeliveryFailed { press, reason });
                }
            }
            metrics.max_queue_depth = metrics.max_queue_depth.max(self.queue.len());
        }

        trace!(
            %press,
            high = metrics.tally.high,
            low = metrics.tally.low,
            max_queue_depth = metrics.max_queue_depth,
            "press drained"
        );
        Ok(metrics)
    }
}
