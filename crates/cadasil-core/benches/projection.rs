//! Criterion benchmarks for the survival projection.
//!
//! Covers a long trajectory (young, mild), a mid-length one, and the
//! single-step case (old, severe).

use cadasil_common::{DiseaseStage, Sex};
use cadasil_core::model::{horizon_table, simulate, DEFAULT_HORIZONS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_simulate(c: &mut Criterion) {
    let cases = [
        ("age18_stage0_f", 18.0, DiseaseStage::Stage0, Sex::Female),
        ("age45_stage1a_f", 45.0, DiseaseStage::Stage1A, Sex::Female),
        ("age90_stage4a_m", 90.0, DiseaseStage::Stage4A, Sex::Male),
    ];

    let mut group = c.benchmark_group("simulate");
    for (name, age, stage, sex) in cases {
        group.bench_with_input(BenchmarkId::new("simulate", name), &age, |b, &age| {
            b.iter(|| black_box(simulate(black_box(age), stage, sex)));
        });
    }
    group.finish();
}

fn bench_horizon_table(c: &mut Criterion) {
    let result = simulate(45.0, DiseaseStage::Stage1A, Sex::Female);
    c.bench_function("horizon_table/default", |b| {
        b.iter(|| black_box(horizon_table(black_box(&result), &DEFAULT_HORIZONS)));
    });
}

criterion_group!(benches, bench_simulate, bench_horizon_table);
criterion_main!(benches);
