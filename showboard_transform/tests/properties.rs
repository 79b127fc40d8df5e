// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for decomposition and coverage.

use kurbo::{Affine, Point, Rect, Vec2};
use proptest::prelude::*;
use showboard_transform::{AffineState, TransformEngine};

proptest! {
    #[test]
    fn decomposition_round_trips(
        sx in 0.05_f64..20.0,
        sy in 0.05_f64..20.0,
        degrees in 0.0_f64..360.0,
        tx in -1000.0_f64..1000.0,
        ty in -1000.0_f64..1000.0,
    ) {
        let matrix = Affine::translate((tx, ty))
            * Affine::rotate(degrees.to_radians())
            * Affine::scale_non_uniform(sx, sy);
        let state = AffineState::decompose(matrix).unwrap();
        prop_assert!((state.scale().x - sx).abs() < 1e-6);
        prop_assert!((state.scale().y - sy).abs() < 1e-6);
        prop_assert!((state.translation() - Vec2::new(tx, ty)).hypot() < 1e-6);
        for (a, b) in state.full().as_coeffs().iter().zip(matrix.as_coeffs()) {
            prop_assert!((a - b).abs() < 1e-6, "{:?} vs {:?}", state.full(), matrix);
        }
    }

    #[test]
    fn keep_outer_of_always_covers(
        w in 1.0_f64..500.0,
        h in 1.0_f64..500.0,
        degrees in 0.0_f64..360.0,
        tx in -2000.0_f64..2000.0,
        ty in -2000.0_f64..2000.0,
    ) {
        let mut engine = TransformEngine::default();
        engine.rotate_by(degrees);
        engine.translate(Vec2::new(tx, ty));
        let border = Rect::new(0.0, 0.0, 800.0, 600.0);
        let self_rect = Rect::from_center_size(Point::ORIGIN, (w, h));
        engine.keep_outer_of(border, self_rect);
        let rendered = engine.full().transform_rect_bbox(self_rect);
        prop_assert!(rendered.x0 <= border.x0 + 1e-6);
        prop_assert!(rendered.y0 <= border.y0 + 1e-6);
        prop_assert!(rendered.x1 >= border.x1 - 1e-6);
        prop_assert!(rendered.y1 >= border.y1 - 1e-6);
    }
}
