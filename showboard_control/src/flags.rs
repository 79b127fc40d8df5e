// Copyright 2025 the Showboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Behaviour and lifecycle flags of a control.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ControlFlags: u16 {
        /// The control always fills the canvas.
        const FULL_LAYOUT     = 0b0000_0000_0001;
        /// Initial scaling may enlarge small content.
        const EXPAND_SCALE    = 0b0000_0000_0010;
        /// Initial placement picks the emptiest part of the canvas.
        const AUTO_POSITION   = 0b0000_0000_0100;
        /// Only a band along the edges selects the control.
        const HELP_SELECT     = 0b0000_0000_1000;
        /// Any point on the control selects it.
        const FULL_SELECT     = 0b0000_0001_0000;
        /// Geometry was restored from a saved session; skip initial layout.
        const RESTORE_SESSION = 0b0000_0010_0000;
        /// Content has finished loading.
        const LOAD_FINISHED   = 0b0000_0100_0000;
        /// The user is adjusting the control; size changes are deferred.
        const ADJUSTING       = 0b0000_1000_0000;
        /// The control is selected.
        const SELECTED        = 0b0001_0000_0000;
        /// The control hosts a canvas larger than the view.
        const LARGE_CANVAS    = 0b0010_0000_0000;
    }
}

/// Result of a selection hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectMode {
    /// The point selects the control.
    Select,
    /// The point does not select the control.
    NotSelect,
    /// The point passes through to whatever is below.
    PassSelect,
}
