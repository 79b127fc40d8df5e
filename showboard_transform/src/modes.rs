// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability flags and resize parameters.

use kurbo::{Insets, Rect, Vec2};

use crate::limits::{SizeLimits, TransformConfig};

/// Which transformations an object accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Capabilities {
    /// The object may be translated.
    pub movable: bool,
    /// The object may be scaled or resized.
    pub scalable: bool,
    /// The object may be rotated.
    pub rotatable: bool,
    /// Resizes keep the width to height ratio.
    pub keep_aspect_ratio: bool,
    /// Size changes are applied to the object's layout instead of its scale.
    pub layout_scale: bool,
}

impl Capabilities {
    /// Nothing may change.
    pub const FIXED: Self = Self {
        movable: false,
        scalable: false,
        rotatable: false,
        keep_aspect_ratio: false,
        layout_scale: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            movable: true,
            scalable: true,
            rotatable: true,
            ..Self::FIXED
        }
    }
}

/// Edge weights describing which handle is being dragged.
///
/// Each weight is usually `0.0` or `±1.0`; a drag delta is multiplied by the
/// weight of every edge before the edge moves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeDirection {
    /// Weight of the left edge.
    pub left: f64,
    /// Weight of the top edge.
    pub top: f64,
    /// Weight of the right edge.
    pub right: f64,
    /// Weight of the bottom edge.
    pub bottom: f64,
}

impl ResizeDirection {
    /// Left edge handle.
    pub const LEFT: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Top edge handle.
    pub const TOP: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Right edge handle.
    pub const RIGHT: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// Bottom edge handle.
    pub const BOTTOM: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Top-left corner handle.
    pub const TOP_LEFT: Self = Self::new(1.0, 1.0, 0.0, 0.0);
    /// Top-right corner handle.
    pub const TOP_RIGHT: Self = Self::new(0.0, 1.0, 1.0, 0.0);
    /// Bottom-left corner handle.
    pub const BOTTOM_LEFT: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Bottom-right corner handle.
    pub const BOTTOM_RIGHT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a direction from its four edge weights.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// `right - left`; zero for vertical-only drags.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// `bottom - top`; zero for horizontal-only drags.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Moves the edges of `rect` by `delta` scaled with each edge weight.
    pub(crate) fn adjust(&self, rect: Rect, delta: Vec2) -> Rect {
        Rect::new(
            rect.x0 + delta.x * self.left,
            rect.y0 + delta.y * self.top,
            rect.x1 + delta.x * self.right,
            rect.y1 + delta.y * self.bottom,
        )
    }
}

/// Parameters for [`TransformEngine::resize`](crate::TransformEngine::resize).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeOptions {
    /// Frame padding included in the rect passed to `resize`.
    pub padding: Insets,
    /// Keep the width to height ratio.
    pub keep_aspect_ratio: bool,
    /// Validate the size only; leave the engine's scale alone.
    pub layout_scale: bool,
    /// Absolute size bounds.
    pub limits: SizeLimits,
}

impl ResizeOptions {
    /// Options derived from an object's capabilities and limits.
    #[must_use]
    pub fn new(capabilities: Capabilities, config: &TransformConfig, padding: Insets) -> Self {
        Self {
            padding,
            keep_aspect_ratio: capabilities.keep_aspect_ratio,
            layout_scale: capabilities.layout_scale,
            limits: config.size_limits,
        }
    }
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            padding: Insets::ZERO,
            keep_aspect_ratio: false,
            layout_scale: false,
            limits: SizeLimits::UNBOUNDED,
        }
    }
}

/// The result of a resize request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub enum ResizeOutcome {
    /// The resize was accepted.
    Applied {
        /// The new rendered local rect, centred on the origin, padding included.
        rect: Rect,
        /// The displacement actually applied, in parent space.
        delta: Vec2,
    },
    /// The resize would have collapsed a dimension; nothing changed.
    Rejected,
}

impl ResizeOutcome {
    /// Returns `true` if the resize was accepted.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// The new rect, if accepted.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Applied { rect, .. } => Some(*rect),
            Self::Rejected => None,
        }
    }

    /// The applied displacement; zero when rejected.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        match self {
            Self::Applied { delta, .. } => *delta,
            Self::Rejected => Vec2::ZERO,
        }
    }
}

/// Removes `padding` from the inside of `rect`.
pub(crate) fn inset(rect: Rect, padding: Insets) -> Rect {
    Rect::new(
        rect.x0 + padding.x0,
        rect.y0 + padding.y0,
        rect.x1 - padding.x1,
        rect.y1 - padding.y1,
    )
}

/// Adds `padding` around `rect`.
pub(crate) fn outset(rect: Rect, padding: Insets) -> Rect {
    Rect::new(
        rect.x0 - padding.x0,
        rect.y0 - padding.y0,
        rect.x1 + padding.x1,
        rect.y1 + padding.y1,
    )
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Rect, Vec2};

    use super::{Capabilities, ResizeDirection, ResizeOutcome, inset, outset};

    #[test]
    fn direction_extents() {
        assert_eq!(ResizeDirection::LEFT.width(), -1.0);
        assert_eq!(ResizeDirection::LEFT.height(), 0.0);
        assert_eq!(ResizeDirection::BOTTOM_RIGHT.width(), 1.0);
        assert_eq!(ResizeDirection::BOTTOM_RIGHT.height(), 1.0);
    }

    #[test]
    fn adjust_moves_weighted_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let moved = ResizeDirection::TOP_LEFT.adjust(r, Vec2::new(2.0, 3.0));
        assert_eq!(moved, Rect::new(2.0, 3.0, 10.0, 10.0));
    }

    #[test]
    fn padding_round_trips() {
        let r = Rect::new(-50.0, -40.0, 50.0, 40.0);
        let p = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(outset(inset(r, p), p), r);
    }

    #[test]
    fn rejected_outcome_has_zero_delta() {
        assert_eq!(ResizeOutcome::Rejected.delta(), Vec2::ZERO);
        assert!(ResizeOutcome::Rejected.rect().is_none());
    }

    #[test]
    fn default_capabilities_allow_affine_changes() {
        let caps = Capabilities::default();
        assert!(caps.movable && caps.scalable && caps.rotatable);
        assert!(!caps.keep_aspect_ratio && !caps.layout_scale);
    }
}
