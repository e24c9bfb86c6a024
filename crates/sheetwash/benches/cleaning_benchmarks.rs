//! Cleaning and standardization performance benchmarks.
//!
//! Measures each stage on generated survey data of increasing size.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sheetwash::input::{Parser, default_coercions};
use sheetwash::store::CsvStore;
use sheetwash::{GeneratorConfig, Table, clean, generate, standardize};

/// Generated table, already coerced.
fn generated_table(rows: usize) -> Table {
    generate(&GeneratorConfig::new(25566).with_samples(rows))
        .coerce(&default_coercions())
        .unwrap()
}

/// Benchmark coercion of raw strings into a typed table.
fn bench_coerce(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");
    let coercions = default_coercions();

    for rows in [100, 1_000, 10_000].iter() {
        let raw = generate(&GeneratorConfig::new(25566).with_samples(*rows));

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &raw, |b, raw| {
            b.iter(|| black_box(raw.coerce(&coercions).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the cleaning engine.
fn bench_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");

    for rows in [100, 1_000, 10_000, 100_000].iter() {
        let table = generated_table(*rows);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| black_box(clean(table).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark standardization of an already cleaned table.
fn bench_standardize(c: &mut Criterion) {
    let mut group = c.benchmark_group("standardize");

    for rows in [100, 1_000, 10_000, 100_000].iter() {
        let cleaned = clean(&generated_table(*rows)).unwrap().table;

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &cleaned, |b, table| {
            b.iter(|| black_box(standardize(table)))
        });
    }

    group.finish();
}

/// Benchmark CSV parsing of a generated worksheet.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path());

    for rows in [1_000, 10_000].iter() {
        let raw = generate(&GeneratorConfig::new(25566).with_samples(*rows));
        let path = store.store_raw("Arkusz1", &raw).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &bytes, |b, bytes| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_bytes(bytes).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_coerce,
    bench_clean,
    bench_standardize,
    bench_parse,
);

criterion_main!(benches);
