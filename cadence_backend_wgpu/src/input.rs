// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer state accumulated from window events between frames.

use cadence_core::pointer::PointerButton;
use kurbo::Point;

/// Tracks the cursor and latches button presses until the frame ends.
///
/// A press and release that both arrive between two frames still reports
/// `pressed` for the next frame, so fast clicks are never lost.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    position: Point,
    pressed: [bool; 2],
    held: [bool; 2],
}

fn slot(button: PointerButton) -> usize {
    match button {
        PointerButton::Primary => 0,
        PointerButton::Secondary => 1,
    }
}

impl PointerTracker {
    /// Creates a tracker with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cursor move, in layout pixels.
    pub fn cursor_moved(&mut self, position: Point) {
        self.position = position;
    }

    /// Records a button transition.
    pub fn button(&mut self, button: PointerButton, down: bool) {
        let i = slot(button);
        if down && !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = down;
    }

    /// Clears the per-frame press latches.
    pub fn end_frame(&mut self) {
        self.pressed = [false; 2];
    }

    /// Last known cursor position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// `button` went down since the last [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn pressed(&self, button: PointerButton) -> bool {
        self.pressed[slot(button)]
    }

    /// `button` is currently down.
    #[must_use]
    pub fn held(&self, button: PointerButton) -> bool {
        self.held[slot(button)]
    }
}
