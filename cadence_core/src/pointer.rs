// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame pointer sampling.
//!
//! The frame loop reads the pointer exactly once per frame into a
//! [`PointerSample`] and hands the same sample to every span. Re-sampling
//! mid-frame would let edge hit tests and drag lengths disagree.

use kurbo::Point;

use crate::backend::Backend;

/// The two pointer buttons the visualizer consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Starts and continues edge drags.
    Primary,
    /// Resets the interval to the padded exposure width.
    Secondary,
}

/// Pointer state captured once at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Pointer position in layout coordinates.
    pub position: Point,
    /// The primary button went down this frame (edge-triggered).
    pub primary_pressed: bool,
    /// The primary button is currently down (level-triggered).
    pub primary_held: bool,
    /// The secondary button went down this frame (edge-triggered).
    pub secondary_pressed: bool,
}

impl PointerSample {
    /// A sample at `position` with no buttons involved.
    #[must_use]
    pub const fn idle(position: Point) -> Self {
        Self {
            position,
            primary_pressed: false,
            primary_held: false,
            secondary_pressed: false,
        }
    }

    /// A sample for the frame in which the primary button goes down.
    #[must_use]
    pub const fn press(position: Point) -> Self {
        Self {
            position,
            primary_pressed: true,
            primary_held: true,
            secondary_pressed: false,
        }
    }

    /// A sample for a frame in which the primary button stays down.
    #[must_use]
    pub const fn held(position: Point) -> Self {
        Self {
            position,
            primary_pressed: false,
            primary_held: true,
            secondary_pressed: false,
        }
    }

    /// A sample for the frame in which the secondary button goes down.
    #[must_use]
    pub const fn secondary_click(position: Point) -> Self {
        Self {
            position,
            primary_pressed: false,
            primary_held: false,
            secondary_pressed: true,
        }
    }

    /// Reads the pointer state from a backend.
    #[must_use]
    pub fn poll<B: Backend + ?Sized>(backend: &B) -> Self {
        Self {
            position: backend.pointer_position(),
            primary_pressed: backend.button_pressed(PointerButton::Primary),
            primary_held: backend.button_held(PointerButton::Primary),
            secondary_pressed: backend.button_pressed(PointerButton::Secondary),
        }
    }
}
