mod common;

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use listscan_core::layout::{DensityClusterer, SpatialClusterer, centroids, extract_lists};
use listscan_core::utils::Point;

use common::{XorShift64, list_page};

fn scattered(seed: u64, count: usize) -> Vec<Point> {
    let mut rng = XorShift64::new(seed);
    (0..count)
        .map(|_| (rng.gen_f64(0.0, 2400.0), rng.gen_f64(0.0, 3200.0)))
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let clusterer = DensityClusterer::default();
    let mut group = c.benchmark_group("partition");
    for count in [100usize, 1_000, 10_000] {
        let points = scattered(0x5eed ^ count as u64, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| black_box(clusterer.partition(black_box(points))))
        });
    }
    group.finish();
}

fn bench_extract_lists(c: &mut Criterion) {
    let clusterer = DensityClusterer::default();
    let mut group = c.benchmark_group("extract_lists");
    for (lists, rows) in [(2usize, 20usize), (6, 60)] {
        let page = list_page(42, lists, rows);
        group.throughput(Throughput::Elements(page.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("page", format!("{lists}x{rows}")),
            &page,
            |b, page| b.iter(|| black_box(extract_lists(black_box(page), &clusterer))),
        );
    }
    group.finish();
}

fn bench_centroids(c: &mut Criterion) {
    let page = list_page(7, 8, 100);
    c.bench_function("centroids/800", |b| {
        b.iter(|| black_box(centroids(black_box(&page))))
    });
}

criterion_group!(benches, bench_partition, bench_extract_lists, bench_centroids);
criterion_main!(benches);
