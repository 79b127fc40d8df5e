// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect, Vec2};
use showboard_transform::{
    AffineState, GestureOptions, PointerPairs, ResizeDirection, ResizeOptions, TransformEngine,
    TransformLink,
};

fn bench_decompose(c: &mut Criterion) {
    let matrix = Affine::translate((120.0, -40.0)) * Affine::rotate(0.7) * Affine::scale(2.5);
    c.bench_function("state/decompose", |b| {
        b.iter(|| black_box(AffineState::decompose(black_box(matrix))));
    });
}

fn bench_gesture_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/gesture");

    // A pinch with a slow twist, replayed as `steps` incremental moves.
    for steps in [16usize, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            b.iter_batched(
                TransformEngine::default,
                |mut engine| {
                    let center = Point::new(400.0, 300.0);
                    let mut last = (center - Vec2::new(50.0, 0.0), center + Vec2::new(50.0, 0.0));
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        let arm = Vec2::from_angle(t) * (50.0 + 100.0 * t);
                        let next = (center - arm, center + arm);
                        let mut pairs = PointerPairs::new(last.0, last.1, next.0, next.1);
                        black_box(engine.gesture(&mut pairs, GestureOptions::default()));
                        last = (next.0, pairs.to2);
                    }
                    black_box(engine);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let rect = Rect::new(-200.0, -150.0, 200.0, 150.0);
    let options = ResizeOptions {
        keep_aspect_ratio: true,
        ..ResizeOptions::default()
    };
    let mut group = c.benchmark_group("engine/resize");
    for (name, rotation) in [("axis_aligned", 0.0), ("rotated", 30.0)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut engine = TransformEngine::default();
                    engine.rotate_by(rotation);
                    engine
                },
                |mut engine| {
                    black_box(engine.resize(
                        rect,
                        ResizeDirection::BOTTOM_RIGHT,
                        black_box(Vec2::new(40.0, 25.0)),
                        &options,
                    ))
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_linked_translate(c: &mut Criterion) {
    let frame = TransformEngine::default().into_shared();
    let content = TransformEngine::default().into_shared();
    content.borrow_mut().scale_to(0.5);
    let _link = TransformLink::attach(&content, &frame).expect("invertible");
    c.bench_function("link/translate", |b| {
        b.iter(|| frame.borrow_mut().translate(black_box(Vec2::new(1.0, -1.0))));
    });
}

criterion_group!(
    benches,
    bench_decompose,
    bench_gesture_stream,
    bench_resize,
    bench_linked_translate
);
criterion_main!(benches);
