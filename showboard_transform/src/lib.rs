// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=showboard_transform --heading-base-level=0

//! Showboard Transform: the 2D affine transform engine behind whiteboard
//! controls.
//!
//! Every object on a Showboard canvas carries a shear-free affine transform
//! made of a scale, a rotation and a translation. This crate owns that
//! decomposition and the operations that change it:
//!
//! - [`AffineState`]: the three factors and their composites, rebuilt on every
//!   change, with axis snapping for rotations that land near 0°, 90°, 180° or
//!   270°.
//! - [`TransformEngine`]: translate, rotate, scale, handle-driven
//!   [`resize`](TransformEngine::resize) with aspect lock and size limits,
//!   two-pointer [`gesture`](TransformEngine::gesture) steps, and the
//!   background helpers [`scale_keep_to_center`](TransformEngine::scale_keep_to_center)
//!   and [`keep_outer_of`](TransformEngine::keep_outer_of). Each mutation
//!   publishes one [`TransformEvent`] pair.
//! - [`GestureResolver`]: masks gestures with an object's [`Capabilities`]
//!   and derives its scale range from [`TransformConfig`].
//! - [`TransformLink`]: keeps two engines in the relative arrangement they had
//!   when linked.
//!
//! It does **not** render, hit test or route input. Callers pass rectangles
//! and pointer positions in and read [`full`](TransformEngine::full) back out.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use showboard_transform::{GestureOptions, PointerPairs, TransformEngine};
//!
//! let mut engine = TransformEngine::default();
//! engine.translate(Vec2::new(100.0, 50.0));
//!
//! // Spread two fingers to twice their distance.
//! let mut pairs = PointerPairs::new(
//!     Point::new(100.0, 50.0),
//!     Point::new(200.0, 50.0),
//!     Point::new(100.0, 50.0),
//!     Point::new(300.0, 50.0),
//! );
//! let report = engine.gesture(&mut pairs, GestureOptions::default());
//! assert_eq!(report.scale, 2.0);
//!
//! // The point that was under the second finger follows it.
//! let local = Point::new(100.0, 0.0);
//! let moved = engine.full() * local;
//! assert!((moved - pairs.to2).hypot() < 1e-9);
//! ```
//!
//! ## Linking
//!
//! ```rust
//! use kurbo::Vec2;
//! use showboard_transform::{TransformEngine, TransformLink};
//!
//! let frame = TransformEngine::default().into_shared();
//! let content = TransformEngine::default().into_shared();
//! content.borrow_mut().translate(Vec2::new(10.0, 0.0));
//!
//! let _link = TransformLink::attach(&content, &frame).unwrap();
//! frame.borrow_mut().translate(Vec2::new(5.0, 5.0));
//! assert_eq!(content.borrow().translation(), Vec2::new(15.0, 5.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod error;
mod event;
mod gesture;
mod limits;
mod link;
mod modes;
mod state;

pub use engine::{SharedEngine, TransformEngine};
pub use error::GeometryError;
pub use event::{ChangeOrigin, ListenerId, TransformEvent};
pub use gesture::{GestureOptions, GestureReport, GestureResolver, PointerPairs};
pub use limits::{ScaleLimits, SizeLimits, TransformConfig};
pub use link::TransformLink;
pub use modes::{Capabilities, ResizeDirection, ResizeOptions, ResizeOutcome};
pub use state::{AffineState, RotationDelta, angle_degrees, rotate_vec};
