// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scale / rotation / translation decomposition of a control transform.

use kurbo::{Affine, Point, Vec2};

use crate::error::GeometryError;

/// Magnitudes at or below this are treated as zero.
pub(crate) const FUZZY_ZERO: f64 = 1e-12;

/// Cosine above which a rotation snaps to the nearest horizontal orientation (≈2.56°).
const SNAP_COS_AXIS: f64 = 0.999;
/// Absolute cosine below which a rotation snaps to the nearest vertical orientation (≈2.56°).
const SNAP_COS_PERPENDICULAR: f64 = 0.0447;

const UNIT_X: Vec2 = Vec2::new(1.0, 0.0);

pub(crate) fn fuzzy_is_zero(v: f64) -> bool {
    v.abs() <= FUZZY_ZERO
}

/// Returns the direction of `v` in degrees, in `[0, 360)`.
///
/// Vectors whose x component is (nearly) zero, including the zero vector,
/// map to 90° or 270°. Pinch gestures routinely pass through coincident
/// points, so this never fails.
#[must_use]
pub fn angle_degrees(v: Vec2) -> f64 {
    if fuzzy_is_zero(v.x) {
        return if v.y < 0.0 { 270.0 } else { 90.0 };
    }
    let mut degrees = v.atan2().to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    if degrees >= 360.0 {
        degrees -= 360.0;
    }
    degrees
}

/// Rotates `v` by `degrees` (positive is clockwise in a y-down space).
#[must_use]
pub fn rotate_vec(v: Vec2, degrees: f64) -> Vec2 {
    turn(v, Vec2::from_angle(degrees.to_radians()))
}

/// Complex multiplication: rotates `v` by the unit direction `dir`.
fn turn(v: Vec2, dir: Vec2) -> Vec2 {
    Vec2::new(v.x * dir.x - v.y * dir.y, v.x * dir.y + v.y * dir.x)
}

/// Rotates `v` by the inverse of the unit direction `dir`.
fn unturn(v: Vec2, dir: Vec2) -> Vec2 {
    turn(v, Vec2::new(dir.x, -dir.y))
}

fn rotation_matrix(dir: Vec2) -> Affine {
    Affine::new([dir.x, dir.y, -dir.y, dir.x, 0.0, 0.0])
}

/// Result of applying a rotation delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationDelta {
    /// When `snapped` is false, the unmodified input delta (degrees).
    ///
    /// When `snapped` is true, the correction (degrees) the snap added on top
    /// of the requested delta. Callers rotate any dependent on-screen point
    /// by this amount so that it agrees with the snapped orientation.
    pub delta: f64,
    /// Whether the rotation was snapped to 0°, 90°, 180° or 270°.
    pub snapped: bool,
}

/// A shear-free affine transform split into scale, rotation and translation.
///
/// Scale is applied first, then rotation, then translation. In `kurbo`
/// notation (`A * B` applies `B` first):
///
/// - [`scale_rotate`](Self::scale_rotate) is `R * S`,
/// - [`rotate_translate`](Self::rotate_translate) is `T * R`,
/// - [`full`](Self::full) is `T * R * S`.
///
/// The rotation is stored as a unit direction vector and renormalised on
/// every update, so incremental rotations never accumulate skew. All
/// composites are rebuilt inside each mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineState {
    scale: Vec2,
    rotation: Vec2,
    translation: Vec2,
    scale_rotate: Affine,
    rotate_translate: Affine,
    full: Affine,
}

impl Default for AffineState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineState {
    /// Unit scale, no rotation, no translation.
    pub const IDENTITY: Self = Self {
        scale: Vec2::new(1.0, 1.0),
        rotation: UNIT_X,
        translation: Vec2::ZERO,
        scale_rotate: Affine::IDENTITY,
        rotate_translate: Affine::IDENTITY,
        full: Affine::IDENTITY,
    };

    /// Composes a state from its three factors.
    #[must_use]
    pub fn new(scale: Vec2, rotation_degrees: f64, translation: Vec2) -> Self {
        Self::from_parts(
            scale,
            Vec2::from_angle(rotation_degrees.to_radians()),
            translation,
        )
    }

    fn from_parts(scale: Vec2, rotation: Vec2, translation: Vec2) -> Self {
        let mut state = Self {
            scale,
            rotation,
            translation,
            ..Self::IDENTITY
        };
        state.rebuild();
        state
    }

    /// Splits `matrix` into scale, rotation and translation.
    ///
    /// The translation is the image of the origin, the rotation is the
    /// direction of the transformed x axis, and the scale is what remains
    /// once both are removed, read back as a diagonal. The result is exact for
    /// shear-free input; sheared input is not rejected but is not meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateScale`] when either scale factor is
    /// zero or not finite.
    pub fn decompose(matrix: Affine) -> Result<Self, GeometryError> {
        let translation = (matrix * Point::ORIGIN).to_vec2();
        let scale_rotate = Affine::translate(-translation) * matrix;
        let [a, b, ..] = scale_rotate.as_coeffs();
        let x_axis = Vec2::new(a, b);
        let rotation = if fuzzy_is_zero(x_axis.x) {
            Vec2::new(0.0, if x_axis.y < 0.0 { -1.0 } else { 1.0 })
        } else {
            x_axis / x_axis.hypot()
        };
        let unrotated = rotation_matrix(Vec2::new(rotation.x, -rotation.y)) * scale_rotate;
        let scale = (unrotated * Point::new(1.0, 1.0)).to_vec2();
        if !scale.is_finite() || fuzzy_is_zero(scale.x) || fuzzy_is_zero(scale.y) {
            return Err(GeometryError::DegenerateScale { scale });
        }
        Ok(Self::from_parts(scale, rotation, translation))
    }

    /// Like [`decompose`](Self::decompose), but never fails.
    ///
    /// A degenerate matrix keeps its translation and falls back to identity
    /// scale and rotation; the fallback is logged.
    #[must_use]
    pub fn from_affine(matrix: Affine) -> Self {
        match Self::decompose(matrix) {
            Ok(state) => state,
            Err(error) => {
                tracing::warn!(%error, ?matrix, "falling back to identity scale");
                Self::from_parts(
                    Vec2::new(1.0, 1.0),
                    UNIT_X,
                    (matrix * Point::ORIGIN).to_vec2(),
                )
            }
        }
    }

    /// Scale factors along the local x and y axes.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// The pure rotation factor.
    #[must_use]
    pub fn rotation(&self) -> Affine {
        rotation_matrix(self.rotation)
    }

    /// The rotation angle in degrees, in `[0, 360)`.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        angle_degrees(self.rotation)
    }

    /// Returns `true` unless the rotation is exactly the identity.
    #[must_use]
    pub fn is_rotated(&self) -> bool {
        !(fuzzy_is_zero(self.rotation.y) && self.rotation.x > 0.0)
    }

    /// Offset of the local origin in parent coordinates.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Scale followed by rotation.
    #[must_use]
    pub fn scale_rotate(&self) -> Affine {
        self.scale_rotate
    }

    /// Rotation followed by translation.
    #[must_use]
    pub fn rotate_translate(&self) -> Affine {
        self.rotate_translate
    }

    /// The composite transform used for rendering.
    #[must_use]
    pub fn full(&self) -> Affine {
        self.full
    }

    /// Maps a vector from the parent frame into the unrotated local frame.
    pub(crate) fn to_local_frame(&self, v: Vec2) -> Vec2 {
        unturn(v, self.rotation)
    }

    /// Maps a vector from the unrotated local frame into the parent frame.
    pub(crate) fn to_parent_frame(&self, v: Vec2) -> Vec2 {
        turn(v, self.rotation)
    }

    pub(crate) fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.rebuild();
    }

    pub(crate) fn scale_by(&mut self, factors: Vec2) {
        self.scale = Vec2::new(self.scale.x * factors.x, self.scale.y * factors.y);
        self.rebuild();
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.translation += delta;
        self.rebuild();
    }

    /// Rotates by `delta` degrees, snapping to the nearest axis-aligned
    /// orientation when the result lands within ≈2.56° of one.
    pub(crate) fn apply_rotation_delta(&mut self, delta: f64) -> RotationDelta {
        let rotated = turn(self.rotation, Vec2::from_angle(delta.to_radians()));
        let rotated = rotated / rotated.hypot();
        let (cos, sin) = (rotated.x, rotated.y);
        let target = if cos > SNAP_COS_AXIS {
            Some(UNIT_X)
        } else if cos.abs() < SNAP_COS_PERPENDICULAR {
            Some(Vec2::new(0.0, if sin > 0.0 { 1.0 } else { -1.0 }))
        } else if cos < -SNAP_COS_AXIS {
            Some(Vec2::new(-1.0, 0.0))
        } else {
            None
        };
        let result = match target {
            Some(target) => {
                let correction = unturn(target, rotated).atan2().to_degrees();
                tracing::trace!(delta, correction, "rotation snapped");
                self.rotation = target;
                RotationDelta {
                    delta: correction,
                    snapped: true,
                }
            }
            None => {
                self.rotation = rotated;
                RotationDelta {
                    delta,
                    snapped: false,
                }
            }
        };
        self.rebuild();
        result
    }

    fn rebuild(&mut self) {
        let scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);
        let rotate = rotation_matrix(self.rotation);
        self.scale_rotate = rotate * scale;
        self.rotate_translate = Affine::translate(self.translation) * rotate;
        self.full = self.rotate_translate * scale;
    }
}
