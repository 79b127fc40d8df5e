// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transform engine: the single mutation point for an object's transform.

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Affine, Insets, Point, Rect, Size, Vec2};

use crate::event::{ChangeOrigin, ListenerId, Listeners, TransformEvent};
use crate::gesture::{GestureOptions, GestureReport, PointerPairs};
use crate::limits::TransformConfig;
use crate::modes::{Capabilities, ResizeDirection, ResizeOptions, ResizeOutcome, inset, outset};
use crate::state::{
    AffineState, FUZZY_ZERO, RotationDelta, angle_degrees, fuzzy_is_zero, rotate_vec,
};

/// An engine that can be linked to another one.
pub type SharedEngine = Rc<RefCell<TransformEngine>>;

/// Owns an object's [`AffineState`] and publishes every change to it.
///
/// Each mutating operation snapshots the previous composite, mutates, then
/// emits exactly one [`TransformEvent::BeforeChange`] /
/// [`TransformEvent::Changed`] pair and bumps [`revision`](Self::revision).
/// Listeners run synchronously, in subscription order.
///
/// Operations here are primitives: they do not consult
/// [`Capabilities`]. Gating happens in
/// [`GestureResolver`](crate::GestureResolver) and in the caller.
#[derive(Debug)]
pub struct TransformEngine {
    state: AffineState,
    capabilities: Capabilities,
    config: TransformConfig,
    revision: u64,
    listeners: Listeners,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(Capabilities::default(), TransformConfig::default())
    }
}

impl TransformEngine {
    /// Creates an engine with the identity transform.
    #[must_use]
    pub fn new(capabilities: Capabilities, config: TransformConfig) -> Self {
        Self {
            state: AffineState::IDENTITY,
            capabilities,
            config,
            revision: 0,
            listeners: Listeners::default(),
        }
    }

    /// Creates an engine from an initial absolute transform.
    #[must_use]
    pub fn with_transform(
        initial: Affine,
        capabilities: Capabilities,
        config: TransformConfig,
    ) -> Self {
        Self {
            state: AffineState::from_affine(initial),
            ..Self::new(capabilities, config)
        }
    }

    /// Wraps the engine for use with [`TransformLink`](crate::TransformLink).
    #[must_use]
    pub fn into_shared(self) -> SharedEngine {
        Rc::new(RefCell::new(self))
    }

    /// The current decomposition.
    #[must_use]
    pub fn state(&self) -> &AffineState {
        &self.state
    }

    /// The composite transform used for rendering.
    #[must_use]
    pub fn full(&self) -> Affine {
        self.state.full()
    }

    /// Current scale factors.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.state.scale()
    }

    /// Current rotation in degrees, in `[0, 360)`.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.state.rotation_degrees()
    }

    /// Current translation.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.state.translation()
    }

    /// What the object accepts.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Replaces the capability set.
    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    /// The limits this engine was configured with.
    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Replaces the limits.
    pub fn set_config(&mut self, config: TransformConfig) {
        self.config = config;
    }

    /// Resize options built from this engine's capabilities and limits.
    #[must_use]
    pub fn resize_options(&self, padding: Insets) -> ResizeOptions {
        ResizeOptions::new(self.capabilities, &self.config, padding)
    }

    /// Bumped once per published change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a listener; it receives every event from now on.
    pub fn subscribe(&mut self, listener: impl FnMut(&TransformEvent) + 'static) -> ListenerId {
        self.listeners.add(alloc::boxed::Box::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn publish(&mut self, previous: Affine, origin: ChangeOrigin) {
        self.revision = self.revision.wrapping_add(1);
        let current = self.state.full();
        self.listeners
            .emit(&TransformEvent::BeforeChange { previous, origin });
        self.listeners
            .emit(&TransformEvent::Changed { current, origin });
    }

    /// Replaces the whole state.
    pub fn assign(&mut self, state: AffineState, origin: ChangeOrigin) {
        let previous = self.state.full();
        self.state = state;
        self.publish(previous, origin);
    }

    /// Replaces the state with the decomposition of `matrix`.
    pub fn set_transform(&mut self, matrix: Affine) {
        self.assign(AffineState::from_affine(matrix), ChangeOrigin::Direct);
    }

    /// Moves the local origin by `delta`. A zero delta publishes nothing.
    pub fn translate(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let previous = self.state.full();
        self.state.translate(delta);
        self.publish(previous, ChangeOrigin::Direct);
    }

    /// Moves the local origin to `point`.
    pub fn translate_to(&mut self, point: Point) {
        self.translate(point.to_vec2() - self.state.translation());
    }

    /// Rotates by `delta` degrees, snapping near the axes.
    pub fn rotate_by(&mut self, delta: f64) -> RotationDelta {
        let previous = self.state.full();
        let result = self.state.apply_rotation_delta(delta);
        self.publish(previous, ChangeOrigin::Direct);
        result
    }

    /// Rotates about the object's own origin; see [`rotate_about`](Self::rotate_about).
    pub fn rotate(&mut self, from: Point, to: &mut Point) -> RotationDelta {
        self.rotate_about(self.state.translation().to_point(), from, to)
    }

    /// Rotates by the angle swept from `from` to `to` around `center`.
    ///
    /// When the result snaps, `to` is turned about `center` by the correction
    /// so the pointer agrees with the snapped orientation.
    pub fn rotate_about(&mut self, center: Point, from: Point, to: &mut Point) -> RotationDelta {
        let delta = angle_degrees(*to - center) - angle_degrees(from - center);
        let result = self.rotate_by(delta);
        if result.snapped {
            *to = center + rotate_vec(*to - center, result.delta);
        }
        result
    }

    /// Sets both scale factors to `scale`.
    pub fn scale_to(&mut self, scale: f64) {
        let previous = self.state.full();
        self.state.set_scale(Vec2::new(scale, scale));
        self.publish(previous, ChangeOrigin::Direct);
    }

    /// Multiplies the scale factors.
    pub fn scale_by(&mut self, factors: Vec2) {
        let previous = self.state.full();
        self.state.scale_by(factors);
        self.publish(previous, ChangeOrigin::Direct);
    }

    /// Resizes from a handle drag.
    ///
    /// `rect` is the rendered local rect, centred on the origin and including
    /// `options.padding`. `delta` is the pointer displacement in parent
    /// space. Single-edge drags that would collapse the object are rejected,
    /// as is any result with a non-positive dimension.
    ///
    /// Unless `options.layout_scale` is set, the accepted size is applied to
    /// the scale factors and the object is shifted so the fixed edges stay
    /// put. Either way the returned rect is the new rendered rect, centred
    /// on the origin with padding re-added, and the returned delta is the
    /// displacement that was actually applied.
    pub fn resize(
        &mut self,
        rect: Rect,
        direction: ResizeDirection,
        delta: Vec2,
        options: &ResizeOptions,
    ) -> ResizeOutcome {
        let mut by_width = fuzzy_is_zero(direction.height());
        let mut by_height = fuzzy_is_zero(direction.width());
        let origin = inset(rect, options.padding);
        if origin.width() <= FUZZY_ZERO || origin.height() <= FUZZY_ZERO {
            tracing::debug!(?rect, "resize rejected: empty origin rect");
            return ResizeOutcome::Rejected;
        }
        let rotated = self.state.is_rotated();
        let mut delta = if rotated {
            self.state.to_local_frame(delta)
        } else {
            delta
        };

        let mut result = direction.adjust(origin, delta);
        if (by_width && result.width() <= FUZZY_ZERO)
            || (by_height && result.height() <= FUZZY_ZERO)
        {
            tracing::debug!(?origin, ?result, "resize rejected: collapsed edge");
            return ResizeOutcome::Rejected;
        }

        let mut keep_aspect = options.keep_aspect_ratio;
        let mut size = result.size();
        if keep_aspect {
            let sw = size.width / origin.width();
            let sh = size.height / origin.height();
            if by_height || (sw < sh && !by_width) {
                size.width = origin.width() * sh;
            } else {
                size.height = origin.height() * sw;
            }
            size = options.limits.fit_proportional(size);
        } else {
            let clamped = Size::new(
                options.limits.clamp(size.width),
                options.limits.clamp(size.height),
            );
            if clamped != size {
                keep_aspect = true;
            }
            size = clamped;
            by_width = false;
            by_height = false;
        }
        if size.width <= FUZZY_ZERO || size.height <= FUZZY_ZERO || !size.is_finite() {
            tracing::debug!(?origin, ?size, "resize rejected: degenerate size");
            return ResizeOutcome::Rejected;
        }
        result = Rect::from_origin_size(result.origin(), size);

        if keep_aspect {
            delta = Vec2::new(
                (size.width - origin.width()) * direction.width(),
                (size.height - origin.height()) * direction.height(),
            );
            result = if by_height {
                Rect::from_origin_size(
                    (result.x0, origin.y0 + delta.y * direction.top),
                    (size.width, origin.height() + delta.y * direction.height()),
                )
            } else if by_width {
                Rect::from_origin_size(
                    (origin.x0 + delta.x * direction.left, result.y0),
                    (origin.width() + delta.x * direction.width(), size.height),
                )
            } else {
                direction.adjust(origin, delta)
            };
        }

        if !options.layout_scale {
            let previous = self.state.full();
            self.state.scale_by(Vec2::new(
                result.width() / origin.width(),
                result.height() / origin.height(),
            ));
            let shift = self.state.to_parent_frame(result.center() - origin.center());
            self.state.translate(shift);
            self.publish(previous, ChangeOrigin::Direct);
        }

        if rotated {
            delta = self.state.to_parent_frame(delta);
        }
        ResizeOutcome::Applied {
            rect: outset(
                Rect::from_center_size(Point::ORIGIN, result.size()),
                options.padding,
            ),
            delta,
        }
    }

    /// Runs one step of a two-pointer gesture.
    ///
    /// The span ratio scales (clamped to `options.scale_limits`), the change
    /// in pointer angle rotates (snapping near the axes), and the residual
    /// translation keeps `from2` mapped onto `to2`. When the rotation snaps,
    /// `pairs.to2` is turned about `to1` by the correction.
    pub fn gesture(&mut self, pairs: &mut PointerPairs, options: GestureOptions) -> GestureReport {
        let PointerPairs {
            from1,
            from2,
            to1,
            to2,
        } = *pairs;
        let previous = self.state.full();
        let origin = self.state.translation();
        let mut report = GestureReport {
            scale: 1.0,
            ..GestureReport::default()
        };
        let mut anchor = from2.to_vec2() - origin;

        if options.allow_scale {
            let from_span = (from2 - from1).hypot();
            let mut s = if fuzzy_is_zero(from_span) {
                1.0
            } else {
                (to2 - to1).hypot() / from_span
            };
            let base = if options.layout_scale {
                1.0
            } else {
                self.state.scale().x
            };
            if !fuzzy_is_zero(base) {
                s = options.scale_limits.clamp(base * s) / base;
            }
            report.scale = s;
            if options.layout_scale {
                report.layout_scale = Some(s);
            } else {
                self.state.scale_by(Vec2::new(s, s));
            }
            anchor *= s;
        }

        if options.allow_rotate {
            let mut rotation = angle_degrees(to2 - to1) - angle_degrees(from2 - from1);
            let applied = self.state.apply_rotation_delta(rotation);
            if applied.snapped {
                rotation += applied.delta;
                pairs.to2 = to1 + rotate_vec(to2 - to1, applied.delta);
            }
            report.rotation = rotation;
            report.snapped = applied.snapped;
            anchor = rotate_vec(anchor, rotation);
        }

        if options.allow_translate {
            let translation = pairs.to2.to_vec2() - origin - anchor;
            self.state.translate(translation);
            report.translation = translation;
        }

        if options.allow_scale || options.allow_rotate || options.allow_translate {
            self.publish(previous, ChangeOrigin::Direct);
        }
        report
    }

    /// Rescales to an absolute `scale` while keeping the content under the
    /// centre of `border` in place, then keeps the result inside `border`.
    ///
    /// Per axis, a rendered rect smaller than the border is centred; a larger
    /// one has any edge that crossed into the border moved flush with it.
    /// Returns the new rendered rect.
    pub fn scale_keep_to_center(&mut self, border: Rect, self_rect: Rect, scale: f64) -> Rect {
        let previous = self.state.full();
        let center = border.center();
        let anchor = if previous.determinant().abs() > FUZZY_ZERO {
            previous.inverse() * center
        } else {
            self_rect.center()
        };
        self.state.set_scale(Vec2::new(scale, scale));
        let full = self.state.full();
        let rendered = full.transform_rect_bbox(self_rect);
        let size = rendered.size();
        let moved = rendered.center() + (center - full * anchor);
        let target = Point::new(
            fit_axis(moved.x, size.width, border.x0, border.x1),
            fit_axis(moved.y, size.height, border.y0, border.y1),
        );
        self.state.translate(target - rendered.center());
        self.publish(previous, ChangeOrigin::Direct);
        Rect::from_center_size(target, size)
    }

    /// Scales up and shifts so the rendered rect covers `border` completely.
    ///
    /// The upscale is uniform and only happens when the rendered rect is
    /// smaller than `border` on some axis. Returns the new rendered rect.
    pub fn keep_outer_of(&mut self, border: Rect, self_rect: Rect) -> Rect {
        let previous = self.state.full();
        let mut rendered = previous.transform_rect_bbox(self_rect);
        tracing::debug!(?border, ?rendered, "keep_outer_of before");
        if rendered.width() > FUZZY_ZERO && rendered.height() > FUZZY_ZERO {
            if rendered.width() < border.width() || rendered.height() < border.height() {
                let factor = (border.width() / rendered.width())
                    .max(border.height() / rendered.height());
                self.state.scale_by(Vec2::new(factor, factor));
                rendered = self.state.full().transform_rect_bbox(self_rect);
            }
        } else {
            tracing::warn!(?rendered, "keep_outer_of on an empty rect, not scaling");
        }
        let shift = Vec2::new(
            cover_axis(rendered.x0, rendered.x1, border.x0, border.x1),
            cover_axis(rendered.y0, rendered.y1, border.y0, border.y1),
        );
        self.state.translate(shift);
        let rendered = rendered + shift;
        self.publish(previous, ChangeOrigin::Direct);
        tracing::debug!(?rendered, "keep_outer_of after");
        rendered
    }
}

/// Centre on `[lo, hi]` if `extent` fits, otherwise pull the crossed edge flush.
fn fit_axis(center: f64, extent: f64, lo: f64, hi: f64) -> f64 {
    let half = extent / 2.0;
    if extent < hi - lo {
        (lo + hi) / 2.0
    } else if center - half > lo {
        lo + half
    } else if center + half < hi {
        hi - half
    } else {
        center
    }
}

/// Shift that leaves `[border_lo, border_hi]` covered by `[lo, hi]`.
fn cover_axis(lo: f64, hi: f64, border_lo: f64, border_hi: f64) -> f64 {
    if lo > border_lo {
        border_lo - lo
    } else if hi < border_hi {
        border_hi - hi
    } else {
        0.0
    }
}
