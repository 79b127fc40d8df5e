// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for automatic placement.
//!
//! The emptiest third of the canvas wins, rows first, and the centre cell
//! wins ties.

use kurbo::{Affine, Point, Rect};
use showboard_control::placement::{Footprint, covered_area, place_in_emptiest_cell};

const CANVAS: Rect = Rect::new(0.0, 0.0, 900.0, 900.0);

fn block(x0: f64, y0: f64, x1: f64, y1: f64) -> Footprint {
    Footprint::from_rect(Rect::new(x0, y0, x1, y1), Affine::IDENTITY)
}

#[test]
fn empty_canvas_prefers_centre() {
    assert_eq!(place_in_emptiest_cell(CANVAS, &[]), Point::new(450.0, 450.0));
}

#[test]
fn fully_covered_canvas_prefers_centre() {
    let all = block(-10.0, -10.0, 910.0, 910.0);
    assert_eq!(place_in_emptiest_cell(CANVAS, &[all]), Point::new(450.0, 450.0));
}

#[test]
fn first_empty_cell_in_reading_order_wins() {
    // Cover the top row and the left column.
    let siblings = [block(0.0, 0.0, 900.0, 300.0), block(0.0, 0.0, 300.0, 900.0)];
    // Centre cell (row 1, col 1) is the first empty one.
    assert_eq!(
        place_in_emptiest_cell(CANVAS, &siblings),
        Point::new(450.0, 450.0)
    );

    // Also cover the centre: the next empty cell is row 1, col 2.
    let siblings = [
        block(0.0, 0.0, 900.0, 300.0),
        block(0.0, 0.0, 300.0, 900.0),
        block(300.0, 300.0, 600.0, 600.0),
    ];
    assert_eq!(
        place_in_emptiest_cell(CANVAS, &siblings),
        Point::new(750.0, 450.0)
    );
}

#[test]
fn least_covered_cell_wins_when_none_is_empty() {
    // Everything is covered except a sliver in the bottom-right cell.
    let siblings = [
        block(0.0, 0.0, 900.0, 600.0),
        block(0.0, 600.0, 600.0, 900.0),
        block(600.0, 600.0, 880.0, 900.0),
    ];
    assert_eq!(
        place_in_emptiest_cell(CANVAS, &siblings),
        Point::new(750.0, 750.0)
    );
}

#[test]
fn overlapping_siblings_are_not_double_counted() {
    let cell = Rect::new(0.0, 0.0, 300.0, 300.0);
    let a = block(0.0, 0.0, 200.0, 300.0);
    let b = block(100.0, 0.0, 300.0, 300.0);
    assert!((covered_area(cell, &[a, b]) - 90_000.0).abs() < 1e-6);
}

#[test]
fn rotated_sibling_covers_a_diamond() {
    // A 200×200 square turned 45° about the canvas centre.
    let transform =
        Affine::translate((450.0, 450.0)) * Affine::rotate(core::f64::consts::FRAC_PI_4);
    let diamond = Footprint::from_rect(Rect::new(-100.0, -100.0, 100.0, 100.0), transform);
    let centre = Rect::new(300.0, 300.0, 600.0, 600.0);
    // The diamond's half-diagonal is 141.4, inside the 150 half-width cell.
    assert!((covered_area(centre, &[diamond]) - 40_000.0).abs() < 1e-6);
    // The canvas centre is taken, so the first corner cell wins.
    assert_eq!(
        place_in_emptiest_cell(CANVAS, &[diamond]),
        Point::new(150.0, 150.0)
    );
}

#[test]
fn footprint_bounds_follow_rotation() {
    let f = Footprint::from_rect(
        Rect::new(0.0, 0.0, 2.0, 1.0),
        Affine::rotate(core::f64::consts::FRAC_PI_2),
    );
    let b = f.bounds();
    assert!((b.width() - 1.0).abs() < 1e-9);
    assert!((b.height() - 2.0).abs() < 1e-9);
}
