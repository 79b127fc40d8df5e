// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use thiserror::Error;

/// Geometry that cannot be decomposed or inverted.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// A scale factor is zero or not finite.
    #[error("degenerate scale factors ({}, {})", .scale.x, .scale.y)]
    DegenerateScale {
        /// The scale factors read back from the matrix.
        scale: Vec2,
    },
    /// A reference matrix has a zero determinant.
    #[error("transform is not invertible")]
    Singular,
}
