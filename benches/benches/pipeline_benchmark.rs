//! Benchmarks for the cleaning, deduplication, and aggregation hot paths.
//!
//! Run with: `cargo bench --package tickbar-bench`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickbar_bench::{SyntheticDay, synthetic_data_dir};
use tickbar_lib::prelude::*;
use tickbar_lib::{clean, dedup};

const SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn clean_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");

    for rows in SIZES {
        let raw = SyntheticDay::new(first_day(), rows).raw_ticks();
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &raw, |b, raw| {
            b.iter(|| clean(black_box(raw.clone())).unwrap());
        });
    }

    group.finish();
}

fn dedup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");

    for rows in SIZES {
        let ticks = SyntheticDay::new(first_day(), rows).ticks();
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ticks, |b, ticks| {
            b.iter(|| dedup(black_box(ticks.clone())));
        });
    }

    group.finish();
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let ticks = SyntheticDay::new(first_day(), 1_000_000).ticks();
    let window = WindowSpec::parse("2024-01-02 09:30:00", "2024-01-02 16:00:00").unwrap();

    for interval in ["1s", "1m", "1h"] {
        let aggregator = BarAggregator::new(window, interval.parse().unwrap());
        group.throughput(Throughput::Elements(ticks.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(interval), &ticks, |b, ticks| {
            b.iter(|| aggregator.aggregate(black_box(ticks)));
        });
    }

    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let days = 5;
    let rows = 100_000;
    let dir = synthetic_data_dir(first_day(), days, rows).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default());
    let sources = pipeline.discover(dir.path()).unwrap();

    group.throughput(Throughput::Elements((days * rows) as u64));
    group.bench_function("load_clean_dedup", |b| {
        b.iter(|| pipeline.run(black_box(&sources)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    clean_benchmark,
    dedup_benchmark,
    aggregate_benchmark,
    pipeline_benchmark
);
criterion_main!(benches);
