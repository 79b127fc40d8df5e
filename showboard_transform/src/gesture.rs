// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-pointer gesture input and capability gating.

use kurbo::{Point, Size, Vec2};

use crate::engine::TransformEngine;
use crate::limits::{ScaleLimits, TransformConfig};
use crate::modes::Capabilities;

/// Two pointers, each moving from a `from` point to a `to` point, in parent
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPairs {
    /// First pointer, previous position.
    pub from1: Point,
    /// Second pointer, previous position.
    pub from2: Point,
    /// First pointer, new position.
    pub to1: Point,
    /// Second pointer, new position. Rewritten when the rotation snaps.
    pub to2: Point,
}

impl PointerPairs {
    /// Creates a set of pointer pairs.
    #[must_use]
    pub fn new(from1: Point, from2: Point, to1: Point, to2: Point) -> Self {
        Self {
            from1,
            from2,
            to1,
            to2,
        }
    }
}

/// What a single gesture step may do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureOptions {
    /// Apply the translation residual.
    pub allow_translate: bool,
    /// Apply the span ratio as a uniform scale.
    pub allow_scale: bool,
    /// Apply the change in pointer angle.
    pub allow_rotate: bool,
    /// Bounds for the resulting absolute scale factor.
    pub scale_limits: ScaleLimits,
    /// Report the scale factor instead of applying it to the engine.
    pub layout_scale: bool,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            allow_translate: true,
            allow_scale: true,
            allow_rotate: true,
            scale_limits: ScaleLimits::UNBOUNDED,
            layout_scale: false,
        }
    }
}

/// What a gesture step did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureReport {
    /// Relative scale factor of this step (1 if none).
    pub scale: f64,
    /// Rotation applied in degrees, snap correction included.
    pub rotation: f64,
    /// Whether the rotation snapped to an axis.
    pub snapped: bool,
    /// Translation applied.
    pub translation: Vec2,
    /// In layout-scale mode, the factor the caller should apply to its layout.
    pub layout_scale: Option<f64>,
}

/// Masks gesture options with an object's capabilities and derives its scale
/// range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureResolver {
    config: TransformConfig,
}

impl GestureResolver {
    /// Creates a resolver over the given limits.
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Options for an object with `capabilities` and unscaled `content_size`.
    ///
    /// Scalable objects get the factor range that keeps them inside the size
    /// limits; others fall back to the configured gesture range.
    #[must_use]
    pub fn options(&self, capabilities: Capabilities, content_size: Size) -> GestureOptions {
        let scale_limits = if capabilities.scalable {
            ScaleLimits::for_content(content_size, self.config.size_limits)
        } else {
            self.config.gesture_scale
        };
        GestureOptions {
            allow_translate: capabilities.movable,
            allow_scale: capabilities.scalable,
            allow_rotate: capabilities.rotatable,
            scale_limits,
            layout_scale: capabilities.layout_scale,
        }
    }

    /// Options for `engine`'s current capabilities.
    #[must_use]
    pub fn resolve(&self, engine: &TransformEngine, content_size: Size) -> GestureOptions {
        self.options(engine.capabilities(), content_size)
    }

    /// Resolves options for `engine` and runs one gesture step on it.
    pub fn apply(
        &self,
        engine: &mut TransformEngine,
        content_size: Size,
        pairs: &mut PointerPairs,
    ) -> GestureReport {
        let options = self.resolve(engine, content_size);
        engine.gesture(pairs, options)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::GestureResolver;
    use crate::{Capabilities, ScaleLimits, TransformConfig};

    #[test]
    fn capabilities_mask_options() {
        let resolver = GestureResolver::new(TransformConfig::default());
        let caps = Capabilities {
            rotatable: false,
            ..Capabilities::default()
        };
        let options = resolver.options(caps, Size::new(100.0, 100.0));
        assert!(options.allow_translate);
        assert!(options.allow_scale);
        assert!(!options.allow_rotate);
    }

    #[test]
    fn scalable_objects_use_content_range() {
        let resolver = GestureResolver::new(TransformConfig::default());
        let options = resolver.options(Capabilities::default(), Size::new(240.0, 120.0));
        assert_eq!(options.scale_limits.min, 0.5);
        assert!((options.scale_limits.max - 4096.0 / 240.0).abs() < 1e-12);
    }

    #[test]
    fn fixed_size_objects_use_default_range() {
        let resolver = GestureResolver::new(TransformConfig::default());
        let options = resolver.options(Capabilities::FIXED, Size::new(240.0, 120.0));
        assert_eq!(options.scale_limits, ScaleLimits::DEFAULT);
        assert!(!options.allow_scale);
    }
}
