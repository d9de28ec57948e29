//! Generation latency benchmark.
//!
//! Regeneration happens interactively when the dashboard changes scenario
//! parameters, so a full pass must fit comfortably inside a frame budget.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cityscene::procgen::layout::generate;
use cityscene::scenario::{Scenario, ScenarioConfig};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for scenario in [
        Scenario::Baseline,
        Scenario::Optimized,
        Scenario::Sustainable,
        Scenario::Future,
    ] {
        let config = ScenarioConfig {
            scenario,
            grid_size: 8,
            density: 0.8,
            seed: 7,
        };

        group.bench_function(format!("{scenario:?}_8x8"), |b| {
            b.iter_batched(
                || StdRng::seed_from_u64(config.seed),
                |mut rng| generate(&config, &mut rng),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
