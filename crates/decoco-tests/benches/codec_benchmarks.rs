//! Codec throughput benchmarks
//!
//! Measures whole-buffer compression and decompression for every registered
//! codec across data patterns, plus the cost of small bounded windows.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use decoco_compression::{
    compress_with, decompress_with, entries, ChunkSize, Compressor, Decompressor, Level,
};
use decoco_tests::{generate_test_data, CommonSizes, TestDataPattern};
use std::hint::black_box;
use std::time::Duration;

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

/// Benchmark compression for each codec, size and pattern
fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for (size_name, size) in CommonSizes::all() {
        group.throughput(Throughput::Bytes(size as u64));
        for pattern in [TestDataPattern::Text, TestDataPattern::Mixed] {
            let data = generate_test_data(size, pattern);
            for entry in entries() {
                let id = format!("{}/{}", entry.name, pattern.label());
                group.bench_with_input(BenchmarkId::new(id, size_name), &data, |b, data| {
                    b.iter(|| {
                        let mut compressor = Compressor::with_defaults(entry.codec).unwrap();
                        black_box(compress_with(&mut compressor, data).unwrap())
                    });
                });
            }
        }
    }

    group.finish();
}

/// Benchmark decompression of pre-compressed payloads
fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let data = generate_test_data(CommonSizes::LARGE, TestDataPattern::Mixed);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for entry in entries() {
        let mut compressor = Compressor::with_defaults(entry.codec).unwrap();
        let packed = compress_with(&mut compressor, &data).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(entry.name), &packed, |b, packed| {
            b.iter(|| {
                let mut decompressor = Decompressor::with_defaults(entry.codec).unwrap();
                black_box(decompress_with(&mut decompressor, packed).unwrap())
            });
        });
    }

    group.finish();
}

/// Benchmark level presets for one codec
fn bench_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("zstd_levels");
    let data = generate_test_data(CommonSizes::MEDIUM, TestDataPattern::Text);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for (name, level) in [
        ("fast", Level::Fast),
        ("balanced", Level::Balanced),
        ("small", Level::Small),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &level, |b, &level| {
            b.iter(|| {
                let mut compressor = Compressor::zstd(level, ChunkSize::default()).unwrap();
                black_box(compress_with(&mut compressor, &data).unwrap())
            });
        });
    }

    group.finish();
}

/// Benchmark the growth loop with small output windows
fn bench_window_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("gzip_window");
    let data = generate_test_data(CommonSizes::MEDIUM, TestDataPattern::Mixed);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for window in [64usize, 1024, 16 * 1024] {
        let chunk = ChunkSize::new(window).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(window), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut compressor = Compressor::gzip(Level::Balanced, chunk).unwrap();
                black_box(compress_with(&mut compressor, &data).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_compress, bench_decompress, bench_levels, bench_window_sizes
}
criterion_main!(benches);
