// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size and scale limits.

use kurbo::Size;

/// Absolute size bounds, in parent units, for a resized object.
///
/// A `min` of zero disables the lower bound. Both bounds apply per dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SizeLimits {
    /// Smallest allowed width or height.
    pub min: f64,
    /// Largest allowed width or height.
    pub max: f64,
}

impl SizeLimits {
    /// Default bounds for controls on a whiteboard: 120 to 4096 units.
    pub const DEFAULT: Self = Self {
        min: 120.0,
        max: 4096.0,
    };

    /// No bounds at all.
    pub const UNBOUNDED: Self = Self {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Creates limits, swapping the arguments if they are out of order.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamps a single dimension.
    ///
    /// The lower bound only applies when it is positive, so unbounded limits
    /// leave negative inputs untouched for the caller to reject.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        let mut value = value;
        if self.min > 0.0 && value < self.min {
            value = self.min;
        }
        if value > self.max {
            value = self.max;
        }
        value
    }

    /// Enforces the limits on `size` while keeping its aspect ratio.
    ///
    /// The minimum is applied first, then the maximum; each adjustment
    /// rescales both dimensions, so the maximum wins when the two conflict.
    #[must_use]
    pub fn fit_proportional(&self, size: Size) -> Size {
        let Size {
            mut width,
            mut height,
        } = size;
        if self.min > 0.0 {
            if width < self.min {
                height *= self.min / width;
                width = self.min;
            }
            if height < self.min {
                width *= self.min / height;
                height = self.min;
            }
        }
        if width > self.max {
            height *= self.max / width;
            width = self.max;
        }
        if height > self.max {
            width *= self.max / height;
            height = self.max;
        }
        Size::new(width, height)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Range for an absolute, uniform scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScaleLimits {
    /// Smallest allowed factor.
    pub min: f64,
    /// Largest allowed factor.
    pub max: f64,
}

impl ScaleLimits {
    /// Default gesture range for objects whose size is not otherwise bounded.
    pub const DEFAULT: Self = Self {
        min: 1.0,
        max: 10.0,
    };

    /// Any positive factor.
    pub const UNBOUNDED: Self = Self {
        min: 0.0,
        max: f64::INFINITY,
    };

    /// Derives the factor range that keeps `content` inside `limits`.
    ///
    /// Both bounds follow the larger dimension: the minimum is reached when
    /// the larger side hits `limits.min`, the maximum when it hits
    /// `limits.max`. Empty content is unbounded.
    #[must_use]
    pub fn for_content(content: Size, limits: SizeLimits) -> Self {
        if !(content.width > 0.0 && content.height > 0.0) {
            return Self::UNBOUNDED;
        }
        Self {
            min: (limits.min / content.width).min(limits.min / content.height),
            max: (limits.max / content.width).min(limits.max / content.height),
        }
    }

    /// Saturating clamp; never panics, even when `min > max`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Limits threaded into every [`TransformEngine`](crate::TransformEngine).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformConfig {
    /// Absolute size bounds used by resize and scalable gestures.
    pub size_limits: SizeLimits,
    /// Gesture factor range for objects that are not scalable by size.
    pub gesture_scale: ScaleLimits,
}
