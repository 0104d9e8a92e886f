// ABOUTME: Criterion benchmarks for the XP leveling calculator
// ABOUTME: Measures single summaries, parallel batches and backend payload reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

//! Criterion benchmarks for the progression engine.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use siccus::progression::{
    compute_batch, compute_summary, ExperienceState, ProgressReport, ProgressionConfig,
};

/// Batch sizes for leaderboard-style workloads
const BATCH_SIZES: [usize; 3] = [100, 10_000, 100_000];

fn generate_states(count: usize) -> Vec<ExperienceState> {
    (0..count)
        .filter_map(|index| {
            let xp_total = i64::try_from(index * 137 % 250_000).ok()?;
            ExperienceState::new(xp_total, 100).ok()
        })
        .collect()
}

fn bench_compute_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_summary");

    group.bench_function("mid_level", |b| {
        b.iter(|| compute_summary(black_box(1450), black_box(100)));
    });

    group.bench_function("near_i64_max", |b| {
        b.iter(|| compute_summary(black_box(i64::MAX - 1), black_box(i64::MAX)));
    });

    group.bench_function("rejected_input", |b| {
        b.iter(|| compute_summary(black_box(-1), black_box(100)));
    });

    group.finish();
}

fn bench_compute_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_batch");

    for count in BATCH_SIZES {
        let states = generate_states(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("parallel", count), &states, |b, states| {
            b.iter(|| compute_batch(black_box(states)));
        });
        group.bench_with_input(BenchmarkId::new("sequential", count), &states, |b, states| {
            b.iter(|| {
                black_box(states)
                    .iter()
                    .map(ExperienceState::summary)
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

fn bench_reconciliation(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconciliation");
    let config = ProgressionConfig::default();

    let payload = json!({
        "xpTotal": 1450,
        "energiaTotal": 85,
        "saludTotal": 92,
        "nivel": 12,
        "xpToNext": 550,
        "progressPct": 72.5
    });

    group.bench_function("drifted_backend_payload", |b| {
        b.iter(|| ProgressReport::from_backend(black_box(&payload), black_box(&config)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_summary,
    bench_compute_batch,
    bench_reconciliation,
);
criterion_main!(benches);
