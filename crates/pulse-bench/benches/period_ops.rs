//! Criterion benchmarks for graph construction and period extraction.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pulse_bench::{profile_config, reference_profile, stress_profile};
use pulse_circuit::Graph;
use pulse_engine::{lcm, SimConfig, Simulator};

fn bench_build(c: &mut Criterion) {
    let decls = stress_profile();
    c.bench_function("build_stress_graph", |b| {
        b.iter(|| {
            let graph = Graph::from_declarations(black_box(&decls)).unwrap();
            black_box(graph.len());
        });
    });
}

fn bench_extract(c: &mut Criterion) {
    let graph = Graph::from_declarations(&reference_profile()).unwrap();

    c.bench_function("extract_reference", |b| {
        b.iter(|| {
            let mut sim = Simulator::new(graph.clone(), SimConfig::default()).unwrap();
            black_box(sim.presses_until_sink_low("rx").unwrap());
        });
    });

    c.bench_function("extract_reference_verified", |b| {
        b.iter(|| {
            let mut sim = Simulator::new(graph.clone(), profile_config()).unwrap();
            black_box(sim.presses_until_sink_low("rx").unwrap());
        });
    });
}

fn bench_lcm(c: &mut Criterion) {
    let periods: Vec<u64> = (0..64).map(|i| 1001 + 2 * i).collect();
    c.bench_function("lcm_fold_64", |b| {
        b.iter(|| {
            let folded = black_box(&periods)
                .iter()
                .try_fold(1u64, |acc, &p| lcm(acc, p));
            black_box(folded);
        });
    });
}

criterion_group!(benches, bench_build, bench_extract, bench_lcm);
criterion_main!(benches);
