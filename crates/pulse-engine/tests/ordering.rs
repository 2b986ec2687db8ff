//! Integration test: delivery order is part of the semantics.
//!
//! Scenario two feeds `con` from `a` both directly and through the
//! `inv -> b` detour. Under breadth-ordered delivery `con` sees the
//! direct pulse and the detour pulse in separate waves; under an
//! in-order depth-first walk the detour overtakes the later sibling,
//! and the totals change. This test replays the circuit both ways.

use pulse_circuit::Graph;
use pulse_core::{DeliveryError, Event, Level};
use pulse_engine::{EventLog, PulseTally, SimConfig, Simulator};
use pulse_test_utils::{build, scenario_two};

// ── Depth-first reference ────────────────────────────────────────────

/// Delivers `event`, then fully processes each emission before the next
/// sibling, recording every delivery.
fn deliver_depth_first(
    graph: &mut Graph,
    event: Event,
    tally: &mut PulseTally,
    log: &mut Vec<Event>,
) -> Result<(), DeliveryError> {
    tally.record(event.level);
    log.push(event);
    for next in graph.deliver(&event)? {
        deliver_depth_first(graph, next, tally, log)?;
    }
    Ok(())
}

fn press_depth_first(graph: &mut Graph, tally: &mut PulseTally, log: &mut Vec<Event>) {
    let seed = Event::seed(graph.entry());
    deliver_depth_first(graph, seed, tally, log).unwrap();
}

// ── Tests ────────────────────────────────────────────────────────────

#[test]
fn depth_first_totals_differ() {
    let mut graph = build(&scenario_two());
    let mut tally = PulseTally::default();
    let mut log = Vec::new();
    for _ in 0..1000 {
        press_depth_first(&mut graph, &mut tally, &mut log);
    }
    assert_eq!(tally, PulseTally { high: 3000, low: 4000 });
    assert_eq!(tally.product(), 12_000_000);

    let mut sim = Simulator::new(build(&scenario_two()), SimConfig::default()).unwrap();
    assert_ne!(sim.run_presses(1000).unwrap(), tally);
}

#[test]
fn con_emissions_on_third_press() {
    // Breadth-ordered.
    let mut sim = Simulator::new(build(&scenario_two()), SimConfig::default()).unwrap();
    let con = sim.graph().id("con").unwrap();
    sim.run_presses(2).unwrap();
    let mut log = EventLog::new();
    sim.press_observed(&mut log).unwrap();
    let breadth: Vec<Level> = log.emitted_by(con).map(|ev| ev.level).collect();
    assert_eq!(breadth, vec![Level::Low, Level::High]);

    // Depth-first.
    let mut graph = build(&scenario_two());
    let mut tally = PulseTally::default();
    let mut events = Vec::new();
    for _ in 0..2 {
        press_depth_first(&mut graph, &mut tally, &mut events);
    }
    events.clear();
    press_depth_first(&mut graph, &mut tally, &mut events);
    let depth: Vec<Level> = events
        .iter()
        .filter(|ev| ev.source.node() == Some(con))
        .map(|ev| ev.level)
        .collect();
    assert_eq!(depth, vec![Level::High, Level::High]);
}

#[test]
fn breadth_order_is_deterministic() {
    let run = || {
        let mut sim = Simulator::new(build(&scenario_two()), SimConfig::default()).unwrap();
        let mut log = EventLog::new();
        for _ in 0..8 {
            sim.press_observed(&mut log).unwrap();
        }
        log
    };
    assert_eq!(run(), run());
}
