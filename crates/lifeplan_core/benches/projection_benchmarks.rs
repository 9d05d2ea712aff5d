//! Criterion benchmarks for lifeplan_core projections
//!
//! Run with: cargo bench -p lifeplan_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lifeplan_core::builder::{ProjectionBuilder, build_projection};
use lifeplan_core::model::{PolicyConfig, Rates, YearRecord};
use lifeplan_core::runner::{find_optimal_withdrawal, run_projection};

fn create_base_records(horizon_years: u8, policy: &PolicyConfig) -> Vec<YearRecord> {
    let config = ProjectionBuilder::new(2025, 60, 60 + horizon_years)
        .salary_through(5, 90_000.0)
        .non_registered(600_000.0, 400_000.0)
        .rrsp(250_000.0)
        .tfsa(80_000.0)
        .rrif(50_000.0)
        .annual_expenses(55_000.0, 5_000.0)
        .benefit(8, 8_000.0)
        .build();
    build_projection(&config, policy)
}

fn bench_run_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_projection");
    let policy = PolicyConfig::default();
    let rates = Rates::new(0.02, 0.03);

    for horizon in [10u8, 30, 50].iter() {
        let base = create_base_records(*horizon, &policy);

        group.bench_with_input(BenchmarkId::new("years", horizon), horizon, |b, _| {
            b.iter(|| {
                let mut records = base.clone();
                run_projection(black_box(&mut records), black_box(rates), &policy, 0.0);
                records
            })
        });
    }

    group.finish();
}

fn bench_optimal_withdrawal_search(c: &mut Criterion) {
    let policy = PolicyConfig::default();
    let rates = Rates::new(0.02, 0.03);
    let base = create_base_records(30, &policy);

    c.bench_function("optimal_withdrawal_30yr", |b| {
        b.iter(|| find_optimal_withdrawal(black_box(&base), black_box(rates), &policy, 0.0))
    });
}

criterion_group!(benches, bench_run_projection, bench_optimal_withdrawal_search);
criterion_main!(benches);
