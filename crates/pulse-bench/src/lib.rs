//! Benchmark profiles for the Pulse circuit simulator.
//!
//! Provides pre-built circuits for benchmarking:
//!
//! - [`reference_profile`]: four 12-bit counter chains behind one target,
//!   the shape period extraction is designed for
//! - [`stress_profile`]: sixteen chains of mixed period, for wider waves
//! - [`profile_config`]: the [`SimConfig`] both profiles run with

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pulse_core::Declaration;
use pulse_engine::SimConfig;
use pulse_test_utils::counter_bank;

/// Periods of the reference profile's chains. All odd, all 12 bits wide.
pub const REFERENCE_PERIODS: [u64; 4] = [3739, 3761, 3797, 3889];

/// Build the reference benchmark circuit.
///
/// Four independent counters feeding a Memory `target` in front of the
/// `rx` sink; the target first emits LOW after the lcm of
/// [`REFERENCE_PERIODS`] presses.
pub fn reference_profile() -> Vec<Declaration> {
    counter_bank(&REFERENCE_PERIODS)
}

/// Build the stress benchmark circuit: sixteen counters with periods
/// `1001, 1003, ..., 1031`.
pub fn stress_profile() -> Vec<Declaration> {
    let periods: Vec<u64> = (0..16).map(|i| 1001 + 2 * i).collect();
    counter_bank(&periods)
}

/// Configuration for profile runs: defaults with period verification on.
pub fn profile_config() -> SimConfig {
    SimConfig {
        verify_periods: true,
        ..SimConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_engine::{lcm, Simulator};
    use pulse_test_utils::build;

    #[test]
    fn reference_profile_extracts_lcm() {
        let mut sim = Simulator::new(build(&reference_profile()), profile_config()).unwrap();
        let report = sim.presses_until_sink_low("rx").unwrap();
        let expected = REFERENCE_PERIODS
            .iter()
            .try_fold(1u64, |acc, &p| lcm(acc, p))
            .unwrap();
        assert_eq!(report.presses, expected);
        let periods: Vec<u64> = report.periods.values().copied().collect();
        assert_eq!(periods, REFERENCE_PERIODS.to_vec());
    }

    #[test]
    fn stress_profile_builds() {
        let graph = build(&stress_profile());
        let target = graph.id("target").unwrap();
        assert_eq!(graph.feeders(target).len(), 16);
    }

    #[test]
    fn profile_config_validates() {
        profile_config().validate().unwrap();
    }
}
