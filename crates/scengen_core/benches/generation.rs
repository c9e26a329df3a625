//! Generation benchmarks for scengen_core.
//!
//! Run with: `cargo bench -p scengen_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scengen_core::data::{ContentTables, Era};
use scengen_core::opfor::{OpForGenerator, OpForGeneratorConfig};
use scengen_core::random::SeededRandom;
use scengen_core::scenario::{ScenarioGenerator, ScenarioGeneratorConfig};

/// Full scenario and OpFor-only generation against the built-in catalog.
pub fn generation_benchmark(c: &mut Criterion) {
    let content = ContentTables::builtin();
    let scenarios = ScenarioGenerator::new(&content);
    let opfor = OpForGenerator::new(&content);

    let small = ScenarioGeneratorConfig::new(5_000, 4, "Pirates", Era::ClanInvasion)
        .with_modifiers(3, true)
        .with_seed(42);
    c.bench_function("scenario_5k_bv", |b| {
        b.iter(|| scenarios.generate(black_box(&small)))
    });

    let large = ScenarioGeneratorConfig::new(30_000, 24, "Federated Suns", Era::SuccessionWars)
        .with_modifiers(5, true)
        .with_seed(42);
    c.bench_function("scenario_30k_bv", |b| {
        b.iter(|| scenarios.generate(black_box(&large)))
    });

    let config = OpForGeneratorConfig::new(12_000, "Clan Wolf", Era::ClanInvasion)
        .with_lance_bounds(5, 15);
    c.bench_function("opfor_12k_bv", |b| {
        b.iter(|| {
            let mut rng = SeededRandom::new(7);
            opfor.generate(black_box(&config), &mut rng)
        })
    });
}

criterion_group!(benches, generation_benchmark);
criterion_main!(benches);
