// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch state helper: turn two-pointer move events into gesture steps.
//!
//! ## Usage
//!
//! 1) Start a pinch by calling [`PinchTracker::start`] with both pointer positions.
//! 2) On each move event, call [`PinchTracker::update`] to get the [`PointerPairs`] since the last update.
//! 3) Feed the pairs to a gesture, then call [`PinchTracker::settle`] so a snapped second pointer is remembered.
//! 4) End the pinch with [`PinchTracker::end`] to reset state.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use showboard_control::pinch::PinchTracker;
//!
//! let mut pinch = PinchTracker::default();
//! pinch.start(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
//! assert!(pinch.is_active());
//!
//! let pairs = pinch.update(Point::new(0.0, 0.0), Point::new(150.0, 0.0)).unwrap();
//! assert_eq!(pairs.from2, Point::new(100.0, 0.0));
//! assert_eq!(pairs.to2, Point::new(150.0, 0.0));
//!
//! // The spans grew by half since the pinch started.
//! let ratio = pinch.total_scale(Point::new(0.0, 0.0), Point::new(150.0, 0.0)).unwrap();
//! assert_eq!(ratio, 1.5);
//! ```

use kurbo::Point;
use showboard_transform::PointerPairs;

/// Tracks pinch state for two-pointer move processing
#[derive(Debug, Clone, Default, Copy)]
pub struct PinchTracker {
    /// Pointer positions when the pinch started
    pub start_pos: Option<(Point, Point)>,
    /// Last settled pointer positions
    pub last_pos: Option<(Point, Point)>,
}

impl PinchTracker {
    /// Start tracking a new pinch from the given pointer positions.
    pub fn start(&mut self, p1: Point, p2: Point) {
        self.start_pos = Some((p1, p2));
        self.last_pos = Some((p1, p2));
    }

    /// Update with new pointer positions, returning the step since the last update.
    pub fn update(&mut self, p1: Point, p2: Point) -> Option<PointerPairs> {
        self.start_pos?;
        let Some((from1, from2)) = self.last_pos else {
            self.last_pos = Some((p1, p2));
            return None;
        };
        self.last_pos = Some((p1, p2));
        Some(PointerPairs::new(from1, from2, p1, p2))
    }

    /// Record the `to` points of a step after a gesture has possibly adjusted them.
    pub fn settle(&mut self, pairs: &PointerPairs) {
        if self.start_pos.is_some() {
            self.last_pos = Some((pairs.to1, pairs.to2));
        }
    }

    /// Ratio of the current pointer span to the span when the pinch started.
    ///
    /// Returns `None` when no pinch is active or the pointers started on top
    /// of each other.
    pub fn total_scale(&self, p1: Point, p2: Point) -> Option<f64> {
        let (s1, s2) = self.start_pos?;
        let span = (s2 - s1).hypot();
        if span == 0.0 {
            return None;
        }
        Some((p2 - p1).hypot() / span)
    }

    /// End the current pinch and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a pinch is active
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }
}
