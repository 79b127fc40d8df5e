// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=showboard_control --heading-base-level=0

//! Showboard Control: the geometry of whiteboard controls.
//!
//! A control is anything placed on a Showboard canvas: an image, a document,
//! a web page, a drawing. This crate covers the parts of its life that are
//! pure geometry, on top of the transform engine in `showboard_transform`:
//!
//! - [`ControlGeometry`]: initial scale and position, size hints, deferred
//!   resizes while adjusting, handle resize, gestures, rotation, selection
//!   hit bands, and the fit/cover helpers for background controls.
//! - [`placement`]: footprints of sibling controls and the 3×3 emptiest
//!   cell search used for automatic placement.
//! - [`pinch`]: a small state machine turning two-pointer move events into
//!   gesture steps.
//!
//! It does not load content, draw frames or route events; callers report
//! content sizes and pointer positions and read the engine's transform back.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use showboard_control::{ControlFlags, ControlGeometry};
//! use showboard_transform::{Capabilities, TransformConfig};
//!
//! let canvas = Rect::new(0.0, 0.0, 1800.0, 900.0);
//! let mut control = ControlGeometry::new(
//!     Capabilities::default(),
//!     TransformConfig::default(),
//!     ControlFlags::AUTO_POSITION,
//! );
//!
//! // A 4000×3000 image loads; it is halved until it fits the canvas.
//! control.set_content_size(Size::new(4000.0, 3000.0));
//! assert_eq!(control.init_scale(canvas.size()), Some(0.25));
//!
//! // With nothing else on the canvas it lands in the centre.
//! let pos = control.init_position(canvas, &[]);
//! assert_eq!(pos, Some(Point::new(900.0, 450.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod flags;
mod geometry;
pub mod pinch;
pub mod placement;

pub use flags::{ControlFlags, SelectMode};
pub use geometry::{CROSS_LENGTH, ControlGeometry, adjust_size_hint, initial_scale};
