//! Criterion micro-benchmarks for the sorted-sequence primitives.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use silt_bench::ascending_ids;
use silt_core::sorted::{merge_into, remove_from_sorted};

fn bench_remove_from_sorted(c: &mut Criterion) {
    let target = ascending_ids(1, 10_000, 40_000);
    let to_remove = ascending_ids(2, 2_000, 40_000);
    c.bench_function("remove_from_sorted_10k_minus_2k", |b| {
        b.iter(|| {
            let mut v = target.clone();
            remove_from_sorted(&mut v, &to_remove);
            black_box(v.len());
        })
    });
}

fn bench_merge_into(c: &mut Criterion) {
    let into = ascending_ids(3, 10_000, 40_000);
    let from = ascending_ids(4, 2_000, 40_000);
    c.bench_function("merge_into_10k_plus_2k", |b| {
        b.iter(|| {
            let mut v = into.clone();
            merge_into(&mut v, &from);
            black_box(v.len());
        })
    });
}

criterion_group!(benches, bench_remove_from_sorted, bench_merge_into);
criterion_main!(benches);
