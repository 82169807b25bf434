mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use daily_field::prelude::{
    deterministic_shuffle, deterministic_subset, rank_by_hash, string_hash, SeededStream,
};
use rand::RngCore;

fn hash_and_stream_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/primitives");

    group.bench_function("string_hash/date", |b| {
        b.iter(|| black_box(string_hash(black_box("2024-01-01-resonant-27"))));
    });

    group.throughput(common::elements_throughput(1024));
    group.bench_function("stream/next_u32_x1024", |b| {
        let mut rng = SeededStream::new("2024-01-01");
        b.iter(|| {
            for _ in 0..1024 {
                black_box(rng.next_u32());
            }
        });
    });

    group.finish();
}

fn shuffle_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/shuffle");

    for &n in &[8usize, 64, 1024, 16384] {
        let items: Vec<u32> = (0..n as u32).collect();
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(deterministic_shuffle("2024-01-01", &items)));
        });

        group.bench_with_input(BenchmarkId::new("subset_8", n), &n, |b, _| {
            b.iter(|| black_box(deterministic_subset("2024-01-01", &items, 8).expect("subset")));
        });
    }

    group.finish();
}

fn rank_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/rank_by_hash");

    for &n in &[8usize, 256, 4096] {
        group.throughput(common::elements_throughput(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || common::make_ids(n),
                |ids| black_box(rank_by_hash("2024-01-01", &ids)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = hash_and_stream_benches,
              shuffle_benches,
              rank_benches
}
criterion_main!(benches);
