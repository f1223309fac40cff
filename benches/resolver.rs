#![allow(unused)]
extern crate netoffice_compat;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use netoffice_compat::{
    file::decompress_gzip,
    metadata::{loader::LibraryMetadata, store::embedded_resource},
    LibraryKey, SupportTable,
};
use std::hint::black_box;

/// Benchmark loading the embedded support tables
///
/// Covers decompression and parsing of a single table as well as the full parallel
/// load performed by `SupportTable::new`.
fn bench_load(c: &mut Criterion) {
    let compressed = embedded_resource(LibraryKey::Excel);
    let data = decompress_gzip(compressed).unwrap();

    println!(
        "Benchmarking ExcelApi table: {} bytes compressed, {} bytes raw",
        compressed.len(),
        data.len()
    );

    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("decompress_gzip", |b| {
        b.iter(|| black_box(decompress_gzip(black_box(compressed)).unwrap()));
    });
    group.bench_function("LibraryMetadata::from_bytes", |b| {
        b.iter(|| black_box(LibraryMetadata::from_bytes(black_box(&data)).unwrap()));
    });
    group.finish();

    c.bench_function("SupportTable::new", |b| {
        b.iter(|| black_box(SupportTable::new().unwrap()));
    });
}

/// Benchmark the query operations against the embedded tables
fn bench_queries(c: &mut Criterion) {
    let table = SupportTable::new().unwrap();

    let mut group = c.benchmark_group("queries");
    group.bench_function("type_call_support/method", |b| {
        b.iter(|| {
            black_box(table.type_call_support(black_box(
                "NetOffice.ExcelApi.Workbook::SaveAs(System.Object)",
            )))
        });
    });
    group.bench_function("type_call_support/property", |b| {
        b.iter(|| {
            black_box(table.type_call_support(black_box(
                "NetOffice.ExcelApi.Range::set_Value(System.Object,System.Object)",
            )))
        });
    });
    group.bench_function("type_call_support/miss", |b| {
        b.iter(|| {
            black_box(table.type_call_support(black_box("NetOffice.ExcelApi.Range::Nope()")))
        });
    });
    group.bench_function("type_support", |b| {
        b.iter(|| black_box(table.type_support(black_box("NetOffice.WordApi.Document"))));
    });
    group.bench_function("enum_member_support", |b| {
        b.iter(|| {
            black_box(table.enum_member_support(
                black_box("NetOffice.ExcelApi.Enums.XlFileFormat"),
                black_box(51),
            ))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_load, bench_queries);
criterion_main!(benches);
