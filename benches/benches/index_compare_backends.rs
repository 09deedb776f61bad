// Copyright 2025 the Groundcover Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use groundcover_index::{Aabb, LinearScan, RTreeBackend, TileIndexGeneric};

fn gen_tile_rects(n: usize, tile: f64) -> Vec<Aabb> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Aabb::from_xywh(x as f64 * tile, y as f64 * tile, tile, tile));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, w: f64, h: f64) -> Vec<Aabb> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (extent - w);
        let y0 = rng.next_f64() * (extent - h);
        out.push(Aabb::from_xywh(x0, y0, w, h));
    }
    out
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear");
    for &n in &[8usize, 16, 32] {
        let rects = gen_tile_rects(n, 256.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_query_tiles_n{n}"), |b| {
            b.iter_batched(
                TileIndexGeneric::<u32, LinearScan>::new,
                |mut idx| {
                    for (i, r) in (0_u32..).zip(rects.iter().copied()) {
                        let _ = idx.insert(r, i);
                    }
                    let mut hits = 0_usize;
                    for q in 0..128 {
                        let x = (q % 32) as f64 * 200.0;
                        let y = (q / 32) as f64 * 200.0;
                        hits += idx.query_point(x, y).count();
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_rtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree");
    for &n in &[8usize, 16, 32] {
        let rects = gen_tile_rects(n, 256.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_query_tiles_n{n}"), |b| {
            b.iter_batched(
                TileIndexGeneric::<u32, RTreeBackend>::new,
                |mut idx| {
                    for (i, r) in (0_u32..).zip(rects.iter().copied()) {
                        let _ = idx.insert(r, i);
                    }
                    let mut hits = 0_usize;
                    for q in 0..128 {
                        let x = (q % 32) as f64 * 200.0;
                        let y = (q / 32) as f64 * 200.0;
                        hits += idx.query_point(x, y).count();
                    }
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_rtree_random_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_random");
    let rects = gen_random_rects(4096, 8192.0, 300.0, 300.0);
    group.bench_function("insert_then_rect_queries", |b| {
        b.iter_batched(
            TileIndexGeneric::<u32, RTreeBackend>::new,
            |mut idx| {
                for (i, r) in (0_u32..).zip(rects.iter().copied()) {
                    let _ = idx.insert(r, i);
                }
                let mut hits = 0_usize;
                for q in 0..256 {
                    let x = (q % 16) as f64 * 500.0;
                    let y = (q / 16) as f64 * 500.0;
                    hits += idx.search(Aabb::from_xywh(x, y, 400.0, 400.0)).count();
                }
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_linear, bench_rtree, bench_rtree_random_overlap);
criterion_main!(benches);
