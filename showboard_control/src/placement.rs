// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Initial placement: find the emptiest third of the canvas.
//!
//! Sibling controls are described by [`Footprint`]s, their bounding boxes
//! mapped into the canvas (so rotated siblings are rotated quads). The
//! canvas is split into a 3×3 grid and the cell least covered by the union
//! of all footprints wins; the centre cell wins ties.
//!
//! ```
//! use kurbo::{Affine, Point, Rect};
//! use showboard_control::placement::{Footprint, place_in_emptiest_cell};
//!
//! let canvas = Rect::new(0.0, 0.0, 900.0, 900.0);
//! assert_eq!(place_in_emptiest_cell(canvas, &[]), Point::new(450.0, 450.0));
//!
//! // Something already sits in the middle: the top-left cell is picked.
//! let middle = Footprint::from_rect(Rect::new(300.0, 300.0, 600.0, 600.0), Affine::IDENTITY);
//! assert_eq!(place_in_emptiest_cell(canvas, &[middle]), Point::new(150.0, 150.0));
//! ```

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect};
use smallvec::SmallVec;

/// Areas and lengths at or below this are treated as zero.
const EPSILON: f64 = 1e-12;

/// Relative difference in cell coverage below which two cells tie.
const TIE_TOLERANCE: f64 = 1e-9;

/// A clipped convex polygon; a quad clipped by a rect has at most 8 vertices.
type Polygon = SmallVec<[Point; 8]>;

/// The outline of a control in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    corners: [Point; 4],
}

impl Footprint {
    /// Maps `rect` (in the control's local coordinates) through `transform`.
    #[must_use]
    pub fn from_rect(rect: Rect, transform: Affine) -> Self {
        Self {
            corners: [
                transform * Point::new(rect.x0, rect.y0),
                transform * Point::new(rect.x1, rect.y0),
                transform * Point::new(rect.x1, rect.y1),
                transform * Point::new(rect.x0, rect.y1),
            ],
        }
    }

    /// The four corners, in order around the outline.
    #[must_use]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Axis-aligned bounds of the outline.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let [a, b, c, d] = self.corners;
        Rect::from_points(a, b).union_pt(c).union_pt(d)
    }
}

/// Area of a simple polygon, by the shoelace formula.
///
/// The polygon is implicitly closed; a repeated closing vertex is harmless.
#[must_use]
pub fn polygon_area(points: &[Point]) -> f64 {
    let Some(&last) = points.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut twice = 0.0;
    for &p in points {
        twice += prev.x * p.y - p.x * prev.y;
        prev = p;
    }
    twice.abs() / 2.0
}

/// Sutherland–Hodgman clip of a convex polygon against an axis-aligned rect.
fn clip_to_rect(points: &[Point], rect: Rect) -> Polygon {
    let mut poly: Polygon = points.iter().copied().collect();
    // Each edge: signed distance inside the half plane (positive is inside).
    let edges: [&dyn Fn(Point) -> f64; 4] = [
        &|p| p.x - rect.x0,
        &|p| rect.x1 - p.x,
        &|p| p.y - rect.y0,
        &|p| rect.y1 - p.y,
    ];
    for inside in edges {
        if poly.is_empty() {
            break;
        }
        let input = core::mem::take(&mut poly);
        let mut prev = input[input.len() - 1];
        let mut prev_d = inside(prev);
        for &p in &input {
            let d = inside(p);
            if (d >= 0.0) != (prev_d >= 0.0) {
                let t = prev_d / (prev_d - d);
                poly.push(prev.lerp(p, t));
            }
            if d >= 0.0 {
                poly.push(p);
            }
            prev = p;
            prev_d = d;
        }
    }
    poly
}

/// x coordinate where segments `a0–a1` and `b0–b1` cross, if they do.
fn crossing_x(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<f64> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(s);
    if denom.abs() <= EPSILON {
        return None;
    }
    let q = b0 - a0;
    let t = q.cross(s) / denom;
    let u = q.cross(r) / denom;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then(|| a0.x + t * r.x)
}

/// Vertical extent of a convex polygon along the line at `x`.
fn span_at(poly: &[Point], x: f64) -> Option<(f64, f64)> {
    let mut span: Option<(f64, f64)> = None;
    let mut prev = *poly.last()?;
    for &p in poly {
        let (lo, hi) = if prev.x <= p.x { (prev, p) } else { (p, prev) };
        if lo.x <= x && x <= hi.x && hi.x - lo.x > EPSILON {
            let y = lo.y + (hi.y - lo.y) * (x - lo.x) / (hi.x - lo.x);
            span = Some(match span {
                Some((y0, y1)) => (y0.min(y), y1.max(y)),
                None => (y, y),
            });
        }
        prev = p;
    }
    span
}

/// Exact area of the union of convex polygons.
///
/// Between consecutive breakpoints (vertex x coordinates and the x of every
/// edge crossing) the covered length along a vertical line changes
/// linearly, so sampling each slab at its midpoint integrates exactly.
fn union_area(polys: &[Polygon]) -> f64 {
    match polys {
        [] => return 0.0,
        [single] => return polygon_area(single),
        _ => {}
    }
    let mut xs: Vec<f64> = polys.iter().flatten().map(|p| p.x).collect();
    for (i, a) in polys.iter().enumerate() {
        for b in &polys[i + 1..] {
            for (a0, a1) in edges(a) {
                for (b0, b1) in edges(b) {
                    xs.extend(crossing_x(a0, a1, b0, b1));
                }
            }
        }
    }
    xs.sort_by(f64::total_cmp);
    xs.dedup_by(|a, b| (*a - *b).abs() <= EPSILON);

    let mut spans: Vec<(f64, f64)> = Vec::with_capacity(polys.len());
    let mut area = 0.0;
    for slab in xs.windows(2) {
        let width = slab[1] - slab[0];
        if width <= EPSILON {
            continue;
        }
        let mid = (slab[0] + slab[1]) / 2.0;
        spans.clear();
        spans.extend(polys.iter().filter_map(|poly| span_at(poly, mid)));
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut covered = 0.0;
        let mut current: Option<(f64, f64)> = None;
        for &(y0, y1) in &spans {
            current = match current {
                Some((c0, c1)) if y0 <= c1 => Some((c0, c1.max(y1))),
                Some((c0, c1)) => {
                    covered += c1 - c0;
                    Some((y0, y1))
                }
                None => Some((y0, y1)),
            };
        }
        if let Some((c0, c1)) = current {
            covered += c1 - c0;
        }
        area += covered * width;
    }
    area
}

fn edges(poly: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    poly.iter()
        .copied()
        .zip(poly.iter().copied().cycle().skip(1))
}

/// Area of `cell` covered by the union of `occupied`.
#[must_use]
pub fn covered_area(cell: Rect, occupied: &[Footprint]) -> f64 {
    let clipped: Vec<Polygon> = occupied
        .iter()
        .filter(|f| f.bounds().overlaps(cell))
        .map(|f| clip_to_rect(f.corners(), cell))
        .filter(|poly| poly.len() >= 3 && polygon_area(poly) > EPSILON)
        .collect();
    union_area(&clipped)
}

/// Picks the centre of the 3×3 cell of `area` least covered by `occupied`.
///
/// Cells are visited row by row, left to right; a strictly smaller coverage
/// wins, except that the centre cell also wins a tie with the best so far.
/// The initial best is a fully covered cell.
#[must_use]
pub fn place_in_emptiest_cell(area: Rect, occupied: &[Footprint]) -> Point {
    let dx = area.width() / 3.0;
    let dy = area.height() / 3.0;
    let mut min_area = dx * dy;
    // Coverage is computed in floating point; differences below this are ties.
    let tolerance = TIE_TOLERANCE * min_area;
    let mut pos = area.center();
    for i in 0..3 {
        for j in 0..3 {
            let x0 = area.x0 + f64::from(j) * dx;
            let y0 = area.y0 + f64::from(i) * dy;
            let cell = Rect::new(x0, y0, x0 + dx, y0 + dy);
            let covered = covered_area(cell, occupied);
            if (min_area - covered).abs() <= tolerance && i == 1 && j == 1 {
                pos = cell.center();
            } else if min_area - covered > tolerance {
                min_area = covered;
                pos = cell.center();
            }
        }
    }
    tracing::debug!(?pos, min_area, "placed in emptiest cell");
    pos
}
