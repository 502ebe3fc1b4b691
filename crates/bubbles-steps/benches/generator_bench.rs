//! Benchmarks for bubble-sort step generation
//!
//! Measures performance of:
//! - Event generation for random, sorted and reversed arrays
//! - Full order-model replay

use bubbles_steps::{generate, OrderModel, ValueSpec};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, SeedableRng};

fn random_values(count: usize) -> Vec<u32> {
    let spec = ValueSpec { count, max_value: 999 };
    spec.generate(&mut StdRng::seed_from_u64(count as u64))
        .expect("valid spec")
}

/// Benchmark generation across array shapes
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for &n in &[8usize, 64, 256, 1024] {
        let random = random_values(n);
        let sorted: Vec<u32> = (1..=n as u32).collect();
        let reversed: Vec<u32> = sorted.iter().rev().copied().collect();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("random", n), &random, |b, v| {
            b.iter(|| generate(black_box(v)))
        });
        group.bench_with_input(BenchmarkId::new("sorted", n), &sorted, |b, v| {
            b.iter(|| generate(black_box(v)))
        });
        group.bench_with_input(BenchmarkId::new("reversed", n), &reversed, |b, v| {
            b.iter(|| generate(black_box(v)))
        });
    }
    group.finish();
}

/// Benchmark rebuilding the final order from a full sequence
fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");

    for &n in &[8usize, 64, 256] {
        let values = random_values(n);
        let events = generate(&values);

        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| OrderModel::replay(black_box(&values), black_box(&events), events.len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_replay);
criterion_main!(benches);
