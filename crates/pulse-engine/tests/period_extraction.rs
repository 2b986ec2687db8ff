//! Integration test: extrapolating the first LOW from feeder periods.
//!
//! Uses banks of independent counter chains whose periods are known by
//! construction, so the expected press count is the lcm of the chosen
//! periods. The extrapolated answer is checked against pressing the same
//! circuit one press at a time. Also covers the verification pass and its
//! failure mode on a feeder with an offset.

use pulse_circuit::GraphError;
use pulse_core::{Event, PressId};
use pulse_engine::{ExtractError, SimConfig, Simulator};
use pulse_test_utils::{build, build_text, counter_bank};

fn bank(periods: &[u64], verify_periods: bool) -> Simulator {
    let cfg = SimConfig {
        verify_periods,
        ..SimConfig::default()
    };
    Simulator::new(build(&counter_bank(periods)), cfg).unwrap()
}

// ── Extrapolation ────────────────────────────────────────────────────

#[test]
fn coprime_periods_multiply() {
    let mut sim = bank(&[3, 4], false);
    let report = sim.presses_until_sink_low("rx").unwrap();
    assert_eq!(report.presses, 12);
    assert_eq!(report.simulated, 4);
}

#[test]
fn shared_factors_are_not_double_counted() {
    let mut sim = bank(&[4, 6], false);
    let report = sim.presses_until_sink_low("rx").unwrap();
    assert_eq!(report.presses, 12);
    let periods: Vec<(&str, u64)> = report
        .periods
        .iter()
        .map(|(name, &p)| (name.as_str(), p))
        .collect();
    assert_eq!(periods, vec![("c0_inv", 4), ("c1_inv", 6)]);
}

/// Press one at a time until `target` emits LOW.
fn first_low_by_pressing(sim: &mut Simulator, limit: u64) -> Option<u64> {
    let target = sim.graph().id("target").unwrap();
    for press in 1..=limit {
        let mut fired = false;
        sim.press_observed(&mut |_: PressId, ev: &Event| {
            if ev.source.node() == Some(target) && ev.level.is_low() {
                fired = true;
            }
        })
        .unwrap();
        if fired {
            return Some(press);
        }
    }
    None
}

#[test]
fn extrapolation_matches_pressing() {
    let cases: [(&[u64], u64); 8] = [
        (&[3, 4], 12),
        (&[4, 6], 12),
        (&[6, 10], 30),
        (&[2, 4], 4),
        (&[3, 16], 48),
        (&[3, 5], 15),
        (&[3, 5, 7], 105),
        (&[3, 5, 7, 8], 840),
    ];
    for (periods, expected) in cases {
        let mut sim = bank(periods, false);
        let pressed = first_low_by_pressing(&mut sim, 2 * expected);
        sim.reset();
        let report = sim.presses_until_sink_low("rx").unwrap();
        assert_eq!(report.presses, expected, "periods {periods:?}");
        assert_eq!(pressed, Some(report.presses), "periods {periods:?}");
    }
}

#[test]
fn target_by_id_or_by_sink() {
    let mut sim = bank(&[3, 4], false);
    let by_sink = sim.presses_until_sink_low("rx").unwrap();
    sim.reset();
    let target = sim.graph().id("target").unwrap();
    assert_eq!(sim.presses_until_low(target).unwrap(), by_sink);
}

#[test]
fn several_feeders() {
    let mut sim = bank(&[3, 5, 7, 8], false);
    let report = sim.presses_until_sink_low("rx").unwrap();
    assert_eq!(report.presses, 840);
    assert_eq!(report.periods.len(), 4);
    assert_eq!(report.simulated, 8);
}

#[test]
fn reset_between_objectives() {
    let mut fresh = bank(&[4, 6], false);
    let expected = fresh.presses_until_sink_low("rx").unwrap();

    let mut sim = bank(&[4, 6], false);
    sim.run_presses(1000).unwrap();
    sim.reset();
    assert_eq!(sim.presses_until_sink_low("rx").unwrap(), expected);
}

// ── Verification ─────────────────────────────────────────────────────

#[test]
fn verification_accepts_true_periods() {
    let mut sim = bank(&[3, 4], true);
    let report = sim.presses_until_sink_low("rx").unwrap();
    assert_eq!(report.presses, 12);
    assert_eq!(report.simulated, 8);

    let mut sim = bank(&[4, 6], true);
    assert_eq!(sim.presses_until_sink_low("rx").unwrap().presses, 12);
}

#[test]
fn verification_rejects_offset_feeder() {
    // t1 sends HIGH at presses 2, 6, 10: a period of 4 with offset 2.
    let text = "broadcaster -> t0\n%t0 -> t1\n%t1 -> target\n&target -> rx\n";

    let mut trusting = Simulator::new(build_text(text), SimConfig::default()).unwrap();
    assert_eq!(trusting.presses_until_sink_low("rx").unwrap().presses, 2);

    let cfg = SimConfig {
        verify_periods: true,
        ..SimConfig::default()
    };
    let mut checking = Simulator::new(build_text(text), cfg).unwrap();
    let err = checking.presses_until_sink_low("rx").unwrap_err();
    assert_eq!(
        err,
        ExtractError::AperiodicFeeder {
            feeder: "t1".into(),
            first: 2,
            next: None,
        }
    );
    assert_eq!(
        err.to_string(),
        "feeder 't1' first fired at press 2 but not again by press 4"
    );
}

// ── Errors ───────────────────────────────────────────────────────────

#[test]
fn target_without_feeders() {
    let mut sim = Simulator::new(build_text("broadcaster -> a\n%a -> b\n"), SimConfig::default())
        .unwrap();
    let entry = sim.graph().entry();
    assert_eq!(
        sim.presses_until_low(entry).unwrap_err(),
        ExtractError::NoFeeders {
            target: "broadcaster".into(),
        }
    );
}

#[test]
fn sink_must_have_one_predecessor() {
    let mut sim = bank(&[3], false);
    assert_eq!(
        sim.presses_until_sink_low("missing").unwrap_err(),
        ExtractError::Target(GraphError::UnknownNode {
            name: "missing".into(),
        })
    );
    assert!(matches!(
        sim.presses_until_sink_low("broadcaster"),
        Err(ExtractError::Target(GraphError::AmbiguousPredecessor { .. }))
    ));
}
