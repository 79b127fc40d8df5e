// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Affine;

/// Who caused a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A direct call on the engine.
    Direct,
    /// Propagation through a [`TransformLink`](crate::TransformLink).
    ///
    /// Linked changes are never propagated further.
    Linked,
}

/// A change notification; each mutation emits one `BeforeChange` followed by
/// one `Changed`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformEvent {
    /// Emitted first, carrying the composite from before the mutation.
    BeforeChange {
        /// The previous full transform.
        previous: Affine,
        /// Who caused the change.
        origin: ChangeOrigin,
    },
    /// Emitted second, carrying the new composite.
    Changed {
        /// The new full transform.
        current: Affine,
        /// Who caused the change.
        origin: ChangeOrigin,
    },
}

impl TransformEvent {
    /// Who caused the change.
    #[must_use]
    pub fn origin(&self) -> ChangeOrigin {
        match self {
            Self::BeforeChange { origin, .. } | Self::Changed { origin, .. } => *origin,
        }
    }
}

/// Handle returned by [`TransformEngine::subscribe`](crate::TransformEngine::subscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TransformEvent)>;

/// Ordered listener registry.
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("next", &self.next)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let len = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != len
    }

    pub(crate) fn emit(&mut self, event: &TransformEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}
