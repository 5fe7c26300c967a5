//! Performance benchmarks for routesnap.
//!
//! Run with: `cargo bench`
//!
//! Measures index construction and nearest-point query latency on
//! synthetic routes sized like real navigation workloads.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use routesnap::synthetic::{targets_near_route, RouteScenario};
use routesnap::{LatLng, RouteIndex};

fn scenario(sub_segments: usize) -> RouteScenario {
    RouteScenario {
        origin: LatLng::new(47.37, 8.55),
        segment_count: 20,
        points_per_segment: sub_segments / 20 + 1,
        step_meters: 15.0,
        seed: 1234,
    }
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for size in [1_000, 10_000, 50_000] {
        let route = scenario(size).generate();
        group.bench_with_input(BenchmarkId::from_parameter(size), &route, |b, route| {
            b.iter(|| RouteIndex::new(black_box(route)).unwrap());
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_nearest_point");

    for size in [100, 1_000, 10_000, 50_000] {
        let route = scenario(size).generate();
        let index = RouteIndex::new(&route).unwrap();
        let targets = targets_near_route(&route, 64, 150.0, 77);

        group.bench_with_input(BenchmarkId::new("near", size), &index, |b, index| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % targets.len();
                black_box(index.find_nearest_point(&targets[i]))
            });
        });
    }

    // Worst case: a target outside every search radius forces the
    // global-sort fallback.
    let route = scenario(10_000).generate();
    let index = RouteIndex::new(&route).unwrap();
    let far = LatLng::new(40.0, 2.0);
    group.bench_function("far_fallback", |b| {
        b.iter(|| black_box(index.find_nearest_point(&far)));
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_query);
criterion_main!(benches);
