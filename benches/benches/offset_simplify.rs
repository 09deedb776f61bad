// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use groundcover_geom::{offset_polyline, simplify_polyline};
use kurbo::Point;

/// A wavy polyline with `n` vertices, roughly one pixel apart.
fn gen_wavy_line(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            Point::new(x, (x * 0.15).sin() * 40.0)
        })
        .collect()
}

fn bench_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("offset_polyline");
    for &n in &[64usize, 1024, 16384] {
        let line = gen_wavy_line(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("wavy_n{n}"), |b| {
            b.iter(|| black_box(offset_polyline(black_box(&line), 3.0)))
        });
    }
    group.finish();
}

fn bench_simplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify_polyline");
    for &n in &[64usize, 1024, 16384] {
        let line = gen_wavy_line(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("wavy_n{n}"), |b| {
            b.iter(|| black_box(simplify_polyline(black_box(&line), 1.0)))
        });
    }
    group.finish();
}

fn bench_simplify_then_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify_then_offset");
    let line = gen_wavy_line(4096);
    group.bench_function("pipeline_order", |b| {
        b.iter(|| {
            let simplified = simplify_polyline(black_box(&line), 1.0);
            black_box(offset_polyline(&simplified, 3.0))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_offset, bench_simplify, bench_simplify_then_offset);
criterion_main!(benches);
