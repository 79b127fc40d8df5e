// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Rect};
use showboard_control::placement::{Footprint, covered_area, place_in_emptiest_cell};

/// `count` overlapping cards scattered over the canvas, every other one tilted.
fn scatter(count: usize) -> Vec<Footprint> {
    let card = Rect::new(-80.0, -60.0, 80.0, 60.0);
    (0..count)
        .map(|i| {
            let x = 100.0 + (i * 197 % 1600) as f64;
            let y = 80.0 + (i * 131 % 740) as f64;
            let angle = if i % 2 == 0 { 0.0 } else { 0.3 * i as f64 };
            Footprint::from_rect(card, Affine::translate((x, y)) * Affine::rotate(angle))
        })
        .collect()
}

fn bench_place(c: &mut Criterion) {
    let canvas = Rect::new(0.0, 0.0, 1800.0, 900.0);
    let mut group = c.benchmark_group("placement/emptiest_cell");
    for count in [4usize, 32, 128] {
        let siblings = scatter(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &siblings,
            |b, siblings| {
                b.iter(|| black_box(place_in_emptiest_cell(canvas, siblings)));
            },
        );
    }
    group.finish();
}

fn bench_covered_area(c: &mut Criterion) {
    let cell = Rect::new(600.0, 300.0, 1200.0, 600.0);
    let siblings = scatter(32);
    c.bench_function("placement/covered_area", |b| {
        b.iter(|| black_box(covered_area(cell, black_box(&siblings))));
    });
}

criterion_group!(benches, bench_place, bench_covered_area);
criterion_main!(benches);
