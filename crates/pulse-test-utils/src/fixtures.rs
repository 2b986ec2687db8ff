//! Reusable fixture circuits.
//!
//! - [`scenario_one`] / [`scenario_two`]: the two reference circuits with
//!   known pulse totals after 1000 presses.
//! - [`counter_chain`]: a subgraph that pulses HIGH toward a target on
//!   exactly the presses that are multiples of a chosen period.
//! - [`counter_bank`]: several counter chains feeding one Memory target
//!   in front of the `rx` sink, aligned so the target first emits LOW
//!   after the lcm of the periods.

use pulse_core::Declaration;

/// Three toggles in a ring closed by an inverter.
///
/// 1000 presses: 8000 LOW, 4000 HIGH.
pub fn scenario_one() -> Vec<Declaration> {
    vec![
        Declaration::broadcast("broadcaster", ["a", "b", "c"]),
        Declaration::toggle("a", ["b"]),
        Declaration::toggle("b", ["c"]),
        Declaration::toggle("c", ["inv"]),
        Declaration::memory("inv", ["a"]),
    ]
}

/// Two toggles feeding a Memory through a feedback inverter.
///
/// 1000 presses: 4250 LOW, 2750 HIGH. Sensitive to delivery order.
pub fn scenario_two() -> Vec<Declaration> {
    vec![
        Declaration::broadcast("broadcaster", ["a"]),
        Declaration::toggle("a", ["inv", "con"]),
        Declaration::memory("inv", ["b"]),
        Declaration::toggle("b", ["con"]),
        Declaration::memory("con", ["output"]),
    ]
}

/// Wave, counted in hops from the press seed, at which the pulse
/// shaper of a [`counter_chain`] with this period is triggered.
///
/// Chains whose trigger waves differ need a longer [`counter_chain`]
/// `hold` so their pulses still overlap at the target.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn trigger_wave(period: u64) -> u32 {
    assert!(period > 0, "period must be positive");
    let twos = period.trailing_zeros();
    if period >> twos == 1 {
        1 + twos
    } else {
        3 + twos
    }
}

/// A counter subgraph with the given period, feeding `target`.
///
/// Returns the name the entry broadcaster must send to, and the
/// chain's declarations (all names prefixed with `prefix`).
///
/// Shape: the odd part of the period is counted by a binary ripple
/// counter of toggles whose set bits feed a `hub` Memory; the hub fires
/// LOW when the count matches and resets the counter by pulsing the
/// clear bits plus bit 0. The power-of-two part is a chain of toggles
/// halving that signal. The last stage drives a pulse shaper: toggle
/// `{prefix}_s` and Memory `{prefix}_pulse` turn each LOW into one
/// HIGH from `{prefix}_inv` followed by a LOW within the same press.
/// `target` therefore sees HIGH from `{prefix}_inv` only during presses
/// that are multiples of `period`, and never holds it into the next.
///
/// `hold` inserts `2 * hold` single-input Memory nodes into the
/// shaper's reset path, keeping the HIGH at `target` for `2 * hold`
/// more waves.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn counter_chain(
    prefix: &str,
    period: u64,
    hold: u32,
    target: &str,
) -> (String, Vec<Declaration>) {
    assert!(period > 0, "period must be positive");
    let twos = period.trailing_zeros();
    let odd = period >> twos;
    let shaper = format!("{prefix}_s");
    let pulse = format!("{prefix}_pulse");
    let inverter = format!("{prefix}_inv");
    let mut decls = Vec::new();

    let halvers: Vec<String> = (0..twos).map(|i| format!("{prefix}_t{i}")).collect();
    for (i, name) in halvers.iter().enumerate() {
        let next = halvers.get(i + 1).unwrap_or(&shaper);
        decls.push(Declaration::toggle(name.as_str(), [next.as_str()]));
    }

    let delays: Vec<String> = (0..2 * hold).map(|i| format!("{prefix}_d{i}")).collect();
    for (i, name) in delays.iter().enumerate() {
        let next = delays.get(i + 1).unwrap_or(&shaper);
        decls.push(Declaration::memory(name.as_str(), [next.as_str()]));
    }
    let reset = delays.first().unwrap_or(&shaper);
    decls.push(Declaration::toggle(shaper.as_str(), [pulse.as_str()]));
    decls.push(Declaration::memory(
        pulse.as_str(),
        [reset.as_str(), inverter.as_str()],
    ));
    decls.push(Declaration::memory(inverter.as_str(), [target]));
    let after_counter = halvers.first().unwrap_or(&shaper).clone();

    if odd == 1 {
        return (after_counter, decls);
    }

    let bits = u64::BITS - odd.leading_zeros();
    let hub = format!("{prefix}_hub");
    let bit = |i: u32| format!("{prefix}_b{i}");
    let mut hub_destinations = vec![bit(0)];
    for i in 0..bits {
        let mut destinations = Vec::new();
        if i + 1 < bits {
            destinations.push(bit(i + 1));
        }
        if (odd >> i) & 1 == 1 {
            destinations.push(hub.clone());
        } else {
            hub_destinations.push(bit(i));
        }
        decls.push(Declaration::toggle(bit(i), destinations));
    }
    hub_destinations.push(after_counter);
    decls.push(Declaration::memory(hub, hub_destinations));

    (bit(0), decls)
}

/// Independent counters of the given periods, all feeding the Memory
/// node `target`, which feeds the sink `rx`.
///
/// Chain `i` uses the prefix `c{i}`, so its feeder into `target` is
/// `c{i}_inv`. Every chain gets the same `hold`, long enough that the
/// pulses of all chains overlap at `target` whenever they fire in the
/// same press, so `target` first emits LOW after exactly the lcm of
/// `periods` presses.
pub fn counter_bank(periods: &[u64]) -> Vec<Declaration> {
    let waves: Vec<u32> = periods.iter().map(|&p| trigger_wave(p)).collect();
    let spread = match (waves.iter().max(), waves.iter().min()) {
        (Some(hi), Some(lo)) => hi - lo,
        _ => 0,
    };
    let hold = spread / 2;

    let mut heads = Vec::with_capacity(periods.len());
    let mut chains = Vec::new();
    for (i, &period) in periods.iter().enumerate() {
        let (head, decls) = counter_chain(&format!("c{i}"), period, hold, "target");
        heads.push(head);
        chains.extend(decls);
    }

    let mut decls = vec![Declaration::broadcast("broadcaster", heads)];
    decls.extend(chains);
    decls.push(Declaration::memory("target", ["rx"]));
    decls
}
