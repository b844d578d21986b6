// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for windowing and rendering integrations.
//!
//! `cadence_core` never touches a window, a GPU, or an input device. Backend
//! crates provide those pieces behind the [`Backend`] trait:
//!
//! - **Lifecycle**: The window is created by the backend's constructor and
//!   released when the backend is dropped. [`Backend::should_close`] is the
//!   single cancellation point, checked once per frame.
//!
//! - **Input**: Pointer position plus edge-triggered (`button_pressed`) and
//!   level-triggered (`button_held`) button state. Backends latch presses
//!   between frames so that a press is visible for exactly one frame.
//!
//! - **Drawing**: Filled rectangles, rectangle outlines, and text, issued
//!   between [`begin_frame`](Backend::begin_frame) and
//!   [`end_frame`](Backend::end_frame). `end_frame` presents the frame and
//!   may block on the display's swap cadence.
//!
//! # Crate boundaries
//!
//! `cadence_core` owns the data model, constraint resolution, tiling, and
//! this contract. Backend crates depend on `cadence_core` and provide
//! platform glue. Application code depends on both and wires them together
//! through [`FrameLoop`](crate::frame::FrameLoop).

use kurbo::{Point, Rect};

use crate::color::Rgba8;
use crate::pointer::PointerButton;

/// Window, input, and drawing capabilities required by the frame loop.
///
/// Coordinates are layout pixels with the origin at the top-left corner of
/// the window and `y` growing downward.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// while !backend.should_close() {
///     backend.begin_frame();
///     backend.clear(background);
///     let pointer = PointerSample::poll(&backend);
///     let resolution = resolver.resolve(&mut schedule, &pointer);
///     let tiling = Tiling::compute(&schedule, &resolution);
///     let plan = DrawPlan::build(&schedule, &tiling, &theme, |text, size| {
///         backend.measure_text(text, size)
///     });
///     plan.execute(&mut backend);
///     backend.end_frame();
/// }
/// ```
pub trait Backend {
    /// Returns `true` once the user has asked to close the window.
    fn should_close(&self) -> bool;

    /// Starts a new frame.
    fn begin_frame(&mut self);

    /// Finishes and presents the current frame.
    ///
    /// Edge-triggered button state is reset here.
    fn end_frame(&mut self);

    /// Fills the whole frame with `color`.
    fn clear(&mut self, color: Rgba8);

    /// Current pointer position.
    fn pointer_position(&self) -> Point;

    /// Returns `true` only during the frame in which `button` went down.
    fn button_pressed(&self, button: PointerButton) -> bool;

    /// Returns `true` while `button` is down.
    fn button_held(&self, button: PointerButton) -> bool;

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Outlines `rect` with a one-pixel border.
    ///
    /// The default draws the four edges as hairline fills, which matches a
    /// line-based border exactly.
    fn stroke_rect(&mut self, rect: Rect, color: Rgba8) {
        for edge in border_edges(rect, 1.0) {
            self.fill_rect(edge, color);
        }
    }

    /// Width of `text` rendered at `size`.
    fn measure_text(&self, text: &str, size: f64) -> f64;

    /// Draws `text` with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, size: f64, color: Rgba8);

    /// Replaces the window title.
    fn set_title(&mut self, title: &str);
}

/// The four edges of `rect` as rectangles of the given thickness, in the
/// order left, right, top, bottom.
///
/// The right and bottom edges straddle `x1`/`y1` so that adjacent tiles share
/// a single border line.
#[must_use]
pub fn border_edges(rect: Rect, thickness: f64) -> [Rect; 4] {
    let half = thickness / 2.0;
    [
        Rect::new(rect.x0, rect.y0, rect.x0 + thickness, rect.y1),
        Rect::new(rect.x1 - half, rect.y0, rect.x1 + half, rect.y1),
        Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + thickness),
        Rect::new(rect.x0, rect.y1 - half, rect.x1, rect.y1 + half),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_edges_cover_outline() {
        let edges = border_edges(Rect::new(10.0, 20.0, 110.0, 70.0), 1.0);
        assert_eq!(edges[0], Rect::new(10.0, 20.0, 11.0, 70.0));
        assert_eq!(edges[1], Rect::new(109.5, 20.0, 110.5, 70.0));
        assert_eq!(edges[2], Rect::new(10.0, 20.0, 110.0, 21.0));
        assert_eq!(edges[3], Rect::new(10.0, 69.5, 110.0, 70.5));
    }
}
