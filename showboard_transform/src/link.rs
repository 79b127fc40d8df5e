// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping two engines in a fixed relative arrangement.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use kurbo::Affine;

use crate::engine::{SharedEngine, TransformEngine};
use crate::error::GeometryError;
use crate::event::{ChangeOrigin, ListenerId, TransformEvent};
use crate::state::{AffineState, FUZZY_ZERO};

/// A two-way binding between engines that preserves their relative transform.
///
/// On [`attach`](Self::attach) the link captures `S = this.full()` and
/// `T = other.full()`. From then on a direct change to `other` reassigns
/// `this` to `S * other * T⁻¹`, and a direct change to `this` reassigns
/// `other` to `S⁻¹ * this * T`. Propagated changes carry
/// [`ChangeOrigin::Linked`] and are never propagated again, so a change
/// reaches the peer exactly once.
///
/// The link holds weak references. Dropping it (or calling
/// [`detach`](Self::detach)) unregisters both listeners.
#[derive(Debug)]
pub struct TransformLink {
    this: Weak<RefCell<TransformEngine>>,
    other: Weak<RefCell<TransformEngine>>,
    this_listener: ListenerId,
    other_listener: ListenerId,
}

impl TransformLink {
    /// Binds `this` to `other` in their current arrangement.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Singular`] if either current transform
    /// cannot be inverted.
    ///
    /// # Panics
    ///
    /// Panics if either engine is currently borrowed.
    pub fn attach(this: &SharedEngine, other: &SharedEngine) -> Result<Self, GeometryError> {
        let s = this.borrow().full();
        let t = other.borrow().full();
        let s_inv = invert(s)?;
        let t_inv = invert(t)?;

        let target = Rc::downgrade(this);
        let other_listener = other.borrow_mut().subscribe(move |event| {
            if let Some(current) = direct_change(event) {
                forward(&target, s * current * t_inv);
            }
        });
        let target = Rc::downgrade(other);
        let this_listener = this.borrow_mut().subscribe(move |event| {
            if let Some(current) = direct_change(event) {
                forward(&target, s_inv * current * t);
            }
        });

        Ok(Self {
            this: Rc::downgrade(this),
            other: Rc::downgrade(other),
            this_listener,
            other_listener,
        })
    }

    /// Removes the binding.
    pub fn detach(self) {}
}

impl Drop for TransformLink {
    fn drop(&mut self) {
        release(&self.this, self.this_listener);
        release(&self.other, self.other_listener);
    }
}

fn invert(matrix: Affine) -> Result<Affine, GeometryError> {
    if matrix.determinant().abs() <= FUZZY_ZERO {
        return Err(GeometryError::Singular);
    }
    Ok(matrix.inverse())
}

fn direct_change(event: &TransformEvent) -> Option<Affine> {
    match *event {
        TransformEvent::Changed {
            current,
            origin: ChangeOrigin::Direct,
        } => Some(current),
        _ => None,
    }
}

fn forward(target: &Weak<RefCell<TransformEngine>>, matrix: Affine) {
    let Some(target) = target.upgrade() else {
        return;
    };
    let Ok(mut engine) = target.try_borrow_mut() else {
        tracing::trace!("linked engine is busy, skipping propagation");
        return;
    };
    engine.assign(AffineState::from_affine(matrix), ChangeOrigin::Linked);
}

fn release(engine: &Weak<RefCell<TransformEngine>>, id: ListenerId) {
    if let Some(engine) = engine.upgrade() {
        match engine.try_borrow_mut() {
            Ok(mut engine) => {
                engine.unsubscribe(id);
            }
            Err(_) => tracing::warn!(?id, "engine busy while detaching link"),
        }
    }
}
