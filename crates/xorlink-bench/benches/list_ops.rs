//! Criterion micro-benchmarks for XOR-linked list operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use xorlink_bench::{checked_list, filled_list, release_arena, SIZES};
use xorlink_list::XorList;

/// Benchmark: build a list of n elements with `push`, then `free` it.
fn bench_push_free(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_free");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut list = XorList::with_arena(release_arena());
                for i in 0..n as u64 {
                    list.push(black_box(i));
                }
                list.free();
            });
        });
    }
    group.finish();
}

/// Benchmark: alternate push_front/pop_right on a steady 1K-element list.
fn bench_queue_churn(c: &mut Criterion) {
    let mut list = filled_list(1_000);
    let mut next = 1_000u64;
    c.bench_function("queue_churn_1k", |b| {
        b.iter(|| {
            list.push_front(next);
            next += 1;
            black_box(list.pop_right());
        });
    });
}

/// Benchmark: indexed access near the tail vs in the middle.
///
/// Lookups walk from the nearer end, so `at(-2)` should be flat in n while
/// `at(n / 2)` grows linearly.
fn bench_indexed_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_access");
    for n in SIZES {
        let list = filled_list(n);
        group.bench_with_input(BenchmarkId::new("near_tail", n), &n, |b, _| {
            b.iter(|| black_box(list.at(black_box(-2))));
        });
        group.bench_with_input(BenchmarkId::new("middle", n), &n, |b, &n| {
            let mid = (n / 2) as isize;
            b.iter(|| black_box(list.at(black_box(mid))));
        });
    }
    group.finish();
}

/// Benchmark: forward and backward iteration over 10K elements.
fn bench_iterate(c: &mut Criterion) {
    let list = filled_list(10_000);
    c.bench_function("iter_sum_10k", |b| {
        b.iter(|| black_box(list.iter().sum::<u64>()));
    });
    c.bench_function("iter_rev_sum_10k", |b| {
        b.iter(|| black_box(list.iter().rev().sum::<u64>()));
    });
}

/// Benchmark: remove every third element of a fresh 10K list.
fn bench_delete_by(c: &mut Criterion) {
    c.bench_function("delete_by_10k", |b| {
        b.iter_batched(
            || filled_list(10_000),
            |mut list| black_box(list.delete_by(|v| v % 3 == 0)),
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: the same build/teardown with tracking and poisoning on.
fn bench_checked_overhead(c: &mut Criterion) {
    c.bench_function("checked_build_free_1k", |b| {
        b.iter(|| {
            let mut list = checked_list(black_box(1_000));
            list.free();
        });
    });
}

criterion_group!(
    benches,
    bench_push_free,
    bench_queue_churn,
    bench_indexed_access,
    bench_iterate,
    bench_delete_by,
    bench_checked_overhead
);
criterion_main!(benches);
