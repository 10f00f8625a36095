//! Benchmarks for the overhead of the slot machinery itself.
//!
//! The slot is meant to compile down to the plain `Option` dance it wraps,
//! so the interesting comparisons are against doing nothing and against a
//! bare heap allocation.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use owned_slot::{HeapKind, OwnedSlot, ResourceKind};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

/// Kind whose release does nothing, to isolate the slot bookkeeping.
struct NoopKind;

impl ResourceKind for NoopKind {
    type Handle = u64;

    fn release(_handle: u64) {}
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_lifecycle");

    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    group.bench_function("empty_slot_create_drop", |b| {
        b.iter(|| {
            let slot = OwnedSlot::<NoopKind>::empty();
            black_box(&slot);
        });
    });

    group.bench_function("owning_slot_create_drop", |b| {
        b.iter(|| {
            let slot = OwnedSlot::<NoopKind>::new(black_box(1_u64));
            black_box(&slot);
        });
    });

    group.bench_function("transfer", |b| {
        b.iter(|| {
            let mut src = OwnedSlot::<NoopKind>::new(black_box(1_u64));
            let mut dest = OwnedSlot::<NoopKind>::empty();
            let previous = dest.transfer_from(&mut src);
            black_box(previous);
        });
    });

    group.bench_function("bare_heap_allocate_release", |b| {
        b.iter(|| {
            let data = vec![0_u8; 64];
            black_box(&data);
        });
    });

    group.bench_function("slot_heap_allocate_release", |b| {
        b.iter(|| {
            let slot = HeapKind::<u8>::allocate(black_box(64));
            black_box(&slot);
        });
    });

    group.finish();
}
