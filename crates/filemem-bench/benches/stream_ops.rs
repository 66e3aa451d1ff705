//! Criterion micro-benchmarks for append-write growth and sequential reads.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use filemem_arena::BufferArena;
use filemem_bench::{run_read, run_write, WriteProfile};
use filemem_test_utils::seeded_payload;

/// Benchmark: fresh buffer per iteration, so every run pays initial
/// allocation plus all doubling steps.
fn bench_write_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_fresh");
    for (name, profile) in [
        ("streaming_4k", WriteProfile::streaming()),
        ("burst_1m", WriteProfile::burst()),
        ("trickle_1b", WriteProfile::trickle()),
    ] {
        let payload = seeded_payload(1, profile.total);
        group.throughput(Throughput::Bytes(profile.total as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &profile, |b, &profile| {
            b.iter(|| {
                let mut arena = BufferArena::default();
                let h = arena.create().unwrap();
                black_box(run_write(&arena, h, &payload, profile).unwrap());
            });
        });
    }
    group.finish();
}

/// Benchmark: rewrite the same buffer, reusing storage grown by the
/// previous iteration (no reallocation in steady state).
fn bench_write_reused(c: &mut Criterion) {
    let profile = WriteProfile::streaming();
    let payload = seeded_payload(2, profile.total);
    let mut arena = BufferArena::default();
    let h = arena.create().unwrap();
    run_write(&arena, h, &payload, profile).unwrap();

    let mut group = c.benchmark_group("write_reused");
    group.throughput(Throughput::Bytes(profile.total as u64));
    group.bench_function("streaming_4k", |b| {
        b.iter(|| black_box(run_write(&arena, h, &payload, profile).unwrap()));
    });
    group.finish();
}

/// Benchmark: sequential read of 1 MiB at several read sizes.
fn bench_read(c: &mut Criterion) {
    let mut arena = BufferArena::default();
    let h = arena.create_from(seeded_payload(3, 1 << 20)).unwrap();

    let mut group = c.benchmark_group("read_1m");
    group.throughput(Throughput::Bytes(1 << 20));
    for chunk in [512usize, 4096, 65_536] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| black_box(run_read(&arena, h, chunk).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write_fresh, bench_write_reused, bench_read);
criterion_main!(benches);
