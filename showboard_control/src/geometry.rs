// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-control geometry: sizing, placement, and interaction entry points.

use kurbo::{Insets, Point, Rect, Size, Vec2};
use showboard_transform::{
    Capabilities, GestureReport, GestureResolver, PointerPairs, ResizeDirection, RotationDelta,
    SharedEngine, TransformConfig, TransformEngine,
};

use crate::flags::{ControlFlags, SelectMode};
use crate::placement::{Footprint, place_in_emptiest_cell};

/// Width of the edge band that selects a [`HELP_SELECT`](ControlFlags::HELP_SELECT) control.
pub const CROSS_LENGTH: f64 = 20.0;

/// Size hint components below this are fractions of the parent size.
const RELATIVE_HINT_LIMIT: f64 = 10.0;

/// Computes the initial scale factor that fits `content` into `available`.
///
/// The factor halves until the content fits. With `expand`, it then doubles
/// while twice the size still fits strictly inside. Non-positive or
/// non-finite sizes yield `1.0`.
#[must_use]
pub fn initial_scale(content: Size, available: Size, expand: bool) -> f64 {
    let usable = |s: Size| s.is_finite() && s.width > 0.0 && s.height > 0.0;
    if !usable(content) || !usable(available) {
        tracing::warn!(?content, ?available, "cannot fit content, keeping scale");
        return 1.0;
    }
    let mut size = content;
    let mut scale = 1.0;
    while size.width > available.width || size.height > available.height {
        size = size / 2.0;
        scale /= 2.0;
    }
    if expand {
        while size.width * 2.0 < available.width && size.height * 2.0 < available.height {
            size = size * 2.0;
            scale *= 2.0;
        }
    }
    scale
}

/// Resolves relative components of a size hint against `parent`.
///
/// A width below 10 is a fraction of the parent width. A negative height is
/// an aspect ratio applied to the resolved width; a height in `[0, 10)` is a
/// fraction of the parent height. Other components are absolute.
#[must_use]
pub fn adjust_size_hint(size: Size, parent: Size) -> Size {
    let mut size = size;
    if size.width < RELATIVE_HINT_LIMIT {
        size.width *= parent.width;
    }
    if size.height < 0.0 {
        size.height = size.width * -size.height;
    } else if size.height < RELATIVE_HINT_LIMIT {
        size.height *= parent.height;
    }
    size
}

/// The geometric side of a whiteboard control.
///
/// Owns the control's [`TransformEngine`] (shared so it can be linked), its
/// [`ControlFlags`], the laid-out content size, and the optional frame
/// padding drawn around the content.
#[derive(Debug)]
pub struct ControlGeometry {
    engine: SharedEngine,
    flags: ControlFlags,
    content: Size,
    padding: Option<Insets>,
    size_hint: Option<Size>,
    pending_size: Option<Size>,
    resolver: GestureResolver,
}

impl ControlGeometry {
    /// Creates a control with an identity transform and empty content.
    #[must_use]
    pub fn new(capabilities: Capabilities, config: TransformConfig, flags: ControlFlags) -> Self {
        Self {
            engine: TransformEngine::new(capabilities, config).into_shared(),
            flags,
            content: Size::ZERO,
            padding: None,
            size_hint: None,
            pending_size: None,
            resolver: GestureResolver::new(config),
        }
    }

    /// Creates a control hosting a canvas larger than the view.
    ///
    /// Such controls always fill the canvas and never rotate.
    #[must_use]
    pub fn for_large_canvas(
        capabilities: Capabilities,
        config: TransformConfig,
        flags: ControlFlags,
    ) -> Self {
        let capabilities = Capabilities {
            rotatable: false,
            ..capabilities
        };
        Self::new(
            capabilities,
            config,
            flags | ControlFlags::FULL_LAYOUT | ControlFlags::LARGE_CANVAS,
        )
    }

    /// The transform engine, for linking and rendering.
    #[must_use]
    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    /// Current flags.
    #[must_use]
    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    /// Sets or clears `flags`.
    pub fn set_flags(&mut self, flags: ControlFlags, on: bool) {
        self.flags.set(flags, on);
    }

    /// Marks the control selected or not.
    pub fn select(&mut self, selected: bool) {
        self.flags.set(ControlFlags::SELECTED, selected);
    }

    /// Marks the content as loaded.
    pub fn finish_loading(&mut self) {
        self.flags.insert(ControlFlags::LOAD_FINISHED);
    }

    /// Laid-out content size, before scaling.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Sets the laid-out content size.
    pub fn set_content_size(&mut self, size: Size) {
        self.content = size;
    }

    /// Frame padding around the content, if the control is framed.
    #[must_use]
    pub fn padding(&self) -> Option<Insets> {
        self.padding
    }

    /// Frames the content with `padding`, or removes the frame.
    pub fn set_padding(&mut self, padding: Option<Insets>) {
        self.padding = padding;
    }

    fn capabilities(&self) -> Capabilities {
        self.engine.borrow().capabilities()
    }

    /// Records a requested size before the content has loaded.
    ///
    /// Relative components are resolved against `canvas`. Ignored once the
    /// content has loaded or when restoring a session. The hint replaces the
    /// available size in [`init_scale`](Self::init_scale).
    pub fn set_size_hint(&mut self, size: Size, canvas: Rect) {
        if self
            .flags
            .intersects(ControlFlags::LOAD_FINISHED | ControlFlags::RESTORE_SESSION)
        {
            return;
        }
        self.size_hint = Some(adjust_size_hint(size, canvas.size()));
    }

    /// Resizes the content, deferring while the control is being adjusted.
    pub fn set_size(&mut self, size: Size, canvas: Rect) {
        let size = adjust_size_hint(size, canvas.size());
        if self.flags.contains(ControlFlags::ADJUSTING) {
            self.pending_size = Some(size);
        } else {
            self.content = size;
        }
    }

    /// Enters or leaves adjusting mode; leaving applies any deferred size.
    pub fn adjusting(&mut self, adjusting: bool) {
        self.flags.set(ControlFlags::ADJUSTING, adjusting);
        if !adjusting && let Some(size) = self.pending_size.take() {
            self.content = size;
        }
    }

    /// Follows a canvas resize; only full-layout controls react.
    pub fn relayout(&mut self, canvas: Rect) {
        if self.flags.contains(ControlFlags::FULL_LAYOUT) {
            self.content = canvas.size();
        }
    }

    /// Fits freshly loaded content into `available` and returns the factor.
    ///
    /// Skipped (returning `None`) for full-layout controls, after loading
    /// finished, or when restoring a session. Layout-scaled controls resize
    /// their content; others are scaled. Framed controls subtract the frame
    /// from `available` first and are shifted to centre the content.
    pub fn init_scale(&mut self, available: Size) -> Option<f64> {
        if self.flags.intersects(
            ControlFlags::FULL_LAYOUT | ControlFlags::LOAD_FINISHED | ControlFlags::RESTORE_SESSION,
        ) {
            return None;
        }
        let mut available = self.size_hint.take().unwrap_or(available);
        if let Some(padding) = self.padding {
            available.width -= padding.x_value();
            available.height -= padding.y_value();
        }
        let scale = initial_scale(
            self.content,
            available,
            self.flags.contains(ControlFlags::EXPAND_SCALE),
        );
        let mut engine = self.engine.borrow_mut();
        if engine.capabilities().layout_scale {
            self.content = self.content * scale;
        } else {
            engine.scale_to(scale);
        }
        if let Some(padding) = self.padding {
            engine.translate(Vec2::new(
                (padding.x0 - padding.x1) / 2.0,
                (padding.y0 - padding.y1) / 2.0,
            ));
        }
        Some(scale)
    }

    /// The rect the control occupies in its own frame, centred on the origin.
    ///
    /// Unframed content is scaled by the current scale factors; a frame adds
    /// its padding around the unscaled content.
    #[must_use]
    pub fn bound_rect(&self) -> Rect {
        let rect = Rect::from_center_size(Point::ORIGIN, self.content);
        match self.padding {
            Some(padding) => rect + padding,
            None => {
                let scale = self.engine.borrow().scale();
                Rect::new(
                    rect.x0 * scale.x,
                    rect.y0 * scale.y,
                    rect.x1 * scale.x,
                    rect.y1 * scale.y,
                )
            }
        }
    }

    /// Decides whether `point`, in content coordinates centred on the origin,
    /// selects the control.
    #[must_use]
    pub fn select_test(&self, point: Point) -> SelectMode {
        if self.flags.contains(ControlFlags::FULL_SELECT) {
            return SelectMode::Select;
        }
        if self.flags.contains(ControlFlags::LARGE_CANVAS) {
            return SelectMode::PassSelect;
        }
        let rect = Rect::from_center_size(Point::ORIGIN, self.content);
        if !rect.contains(point) {
            return SelectMode::NotSelect;
        }
        if !self.flags.contains(ControlFlags::LOAD_FINISHED) {
            return SelectMode::Select;
        }
        if self.flags.contains(ControlFlags::HELP_SELECT) {
            let inner = rect.inset(-CROSS_LENGTH);
            return if inner.contains(point) {
                SelectMode::NotSelect
            } else {
                SelectMode::Select
            };
        }
        SelectMode::NotSelect
    }

    /// Moves the control by `delta` in canvas coordinates.
    pub fn move_by(&mut self, delta: Vec2) {
        self.engine.borrow_mut().translate(delta);
    }

    /// Resizes from a handle drag.
    ///
    /// `delta` is replaced by the displacement actually applied, which is
    /// zero when the resize is rejected. On success layout-scaled controls
    /// adopt the new content size. Returns `false` if the resize was rejected.
    pub fn resize(&mut self, direction: ResizeDirection, delta: &mut Vec2) -> bool {
        let rect = self.bound_rect();
        let padding = self.padding.unwrap_or(Insets::ZERO);
        let mut engine = self.engine.borrow_mut();
        let options = engine.resize_options(padding);
        let outcome = engine.resize(rect, direction, *delta, &options);
        *delta = outcome.delta();
        let Some(rect) = outcome.rect() else {
            return false;
        };
        if options.layout_scale {
            self.content = Size::new(
                rect.width() - padding.x_value(),
                rect.height() - padding.y_value(),
            );
        }
        true
    }

    /// Runs one gesture step, masked by the control's capabilities.
    ///
    /// Layout-scaled controls grow their frame by the reported factor.
    pub fn gesture(&mut self, pairs: &mut PointerPairs) -> GestureReport {
        let report = {
            let mut engine = self.engine.borrow_mut();
            self.resolver.apply(&mut engine, self.content, pairs)
        };
        if let Some(factor) = report.layout_scale {
            let padding = self.padding.unwrap_or(Insets::ZERO);
            let frame = self.bound_rect().size() * factor;
            self.content = Size::new(
                frame.width - padding.x_value(),
                frame.height - padding.y_value(),
            );
        }
        report
    }

    /// Rotates about the control's origin; `None` if it cannot rotate.
    pub fn rotate(&mut self, from: Point, to: &mut Point) -> Option<RotationDelta> {
        if !self.capabilities().rotatable {
            return None;
        }
        Some(self.engine.borrow_mut().rotate(from, to))
    }

    /// Rotates about `center`; `None` if the control cannot rotate.
    pub fn rotate_about(
        &mut self,
        center: Point,
        from: Point,
        to: &mut Point,
    ) -> Option<RotationDelta> {
        if !self.capabilities().rotatable {
            return None;
        }
        Some(self.engine.borrow_mut().rotate_about(center, from, to))
    }

    /// Places a newly attached control on `canvas` and returns where.
    ///
    /// Full-layout and restored controls stay where they are. Others move to
    /// the canvas centre or, with [`AUTO_POSITION`](ControlFlags::AUTO_POSITION),
    /// to the cell least covered by `siblings`.
    pub fn init_position(&mut self, canvas: Rect, siblings: &[Footprint]) -> Option<Point> {
        if self
            .flags
            .intersects(ControlFlags::FULL_LAYOUT | ControlFlags::RESTORE_SESSION)
        {
            return None;
        }
        let pos = if self.flags.contains(ControlFlags::AUTO_POSITION) {
            place_in_emptiest_cell(canvas, siblings)
        } else {
            canvas.center()
        };
        self.engine.borrow_mut().translate(pos.to_vec2());
        Some(pos)
    }

    /// This control's outline in canvas coordinates, for placing others.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        let rect = Rect::from_center_size(Point::ORIGIN, self.content);
        let rect = match self.padding {
            Some(padding) => rect + padding,
            None => rect,
        };
        Footprint::from_rect(rect, self.engine.borrow().full())
    }

    /// Rescales a background control to `scale` around the canvas centre,
    /// keeping it within `canvas`. Returns the rendered rect.
    pub fn scale_within(&mut self, canvas: Rect, scale: f64) -> Rect {
        let content = Rect::from_center_size(Point::ORIGIN, self.content);
        self.engine
            .borrow_mut()
            .scale_keep_to_center(canvas, content, scale)
    }

    /// Grows and shifts a background control until it covers `canvas`.
    /// Returns the rendered rect.
    pub fn cover_canvas(&mut self, canvas: Rect) -> Rect {
        let content = Rect::from_center_size(Point::ORIGIN, self.content);
        self.engine.borrow_mut().keep_outer_of(canvas, content)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{adjust_size_hint, initial_scale};

    #[test]
    fn initial_scale_halves_until_it_fits() {
        let scale = initial_scale(Size::new(1000.0, 500.0), Size::new(300.0, 300.0), false);
        assert_eq!(scale, 0.25);
    }

    #[test]
    fn initial_scale_expands_small_content() {
        let available = Size::new(1000.0, 1000.0);
        assert_eq!(initial_scale(Size::new(100.0, 100.0), available, false), 1.0);
        assert_eq!(initial_scale(Size::new(100.0, 100.0), available, true), 8.0);
    }

    #[test]
    fn initial_scale_ignores_empty_sizes() {
        assert_eq!(initial_scale(Size::ZERO, Size::new(10.0, 10.0), true), 1.0);
        assert_eq!(initial_scale(Size::new(10.0, 10.0), Size::ZERO, false), 1.0);
    }

    #[test]
    fn size_hint_fractions_and_aspect() {
        let parent = Size::new(800.0, 600.0);
        assert_eq!(
            adjust_size_hint(Size::new(0.5, 0.5), parent),
            Size::new(400.0, 300.0)
        );
        assert_eq!(
            adjust_size_hint(Size::new(0.5, -0.75), parent),
            Size::new(400.0, 300.0)
        );
        assert_eq!(
            adjust_size_hint(Size::new(320.0, 240.0), parent),
            Size::new(320.0, 240.0)
        );
    }
}
