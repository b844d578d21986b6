// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A windowless backend that replays scripted pointer input.
//!
//! [`HeadlessBackend`] feeds one [`PointerSample`] per frame from a script and
//! records the draw calls of the most recent frame. It closes once the script
//! is exhausted, so [`FrameLoop::run`](cadence_core::frame::FrameLoop::run)
//! terminates.
//!
//! ```rust
//! use cadence_core::frame::FrameLoop;
//! use cadence_core::trace::Tracer;
//! use cadence_debug::headless::{HeadlessBackend, Script};
//! use kurbo::Point;
//!
//! let script = Script::new()
//!     .idle(Point::ZERO, 1)
//!     .secondary_click(Point::new(100.0, 150.0))
//!     .finish();
//! let mut backend = HeadlessBackend::new(script);
//! let frames = FrameLoop::default().run(&mut backend, &mut Tracer::none());
//! assert_eq!(frames, 2);
//! assert_eq!(backend.title(), "0 skipped frames");
//! ```

use cadence_core::backend::Backend;
use cadence_core::color::Rgba8;
use cadence_core::pointer::{PointerButton, PointerSample};
use kurbo::{Point, Rect};

/// Width of one character relative to the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`Backend::clear`].
    Clear(Rgba8),
    /// [`Backend::fill_rect`].
    Fill(Rect, Rgba8),
    /// [`Backend::stroke_rect`].
    Stroke(Rect, Rgba8),
    /// [`Backend::draw_text`].
    Text(String, Point, f64, Rgba8),
}

/// Builds a per-frame pointer script.
#[derive(Clone, Debug, Default)]
pub struct Script {
    samples: Vec<PointerSample>,
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rests the pointer at `position` for `frames` frames.
    #[must_use]
    pub fn idle(mut self, position: Point, frames: usize) -> Self {
        self.samples
            .extend(core::iter::repeat_n(PointerSample::idle(position), frames));
        self
    }

    /// Presses at `from`, moves to `to` over `steps` held frames, and releases
    /// at `to`.
    #[must_use]
    pub fn drag(mut self, from: Point, to: Point, steps: usize) -> Self {
        self.samples.push(PointerSample::press(from));
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            self.samples.push(PointerSample::held(from.lerp(to, t)));
        }
        self.samples.push(PointerSample::idle(to));
        self
    }

    /// A single secondary-button click at `position`.
    #[must_use]
    pub fn secondary_click(mut self, position: Point) -> Self {
        self.samples.push(PointerSample::secondary_click(position));
        self
    }

    /// Appends an arbitrary sample.
    #[must_use]
    pub fn sample(mut self, sample: PointerSample) -> Self {
        self.samples.push(sample);
        self
    }

    /// The finished script.
    #[must_use]
    pub fn finish(self) -> Vec<PointerSample> {
        self.samples
    }
}

/// A [`Backend`] without a window.
#[derive(Clone, Debug, Default)]
pub struct HeadlessBackend {
    script: Vec<PointerSample>,
    frame: usize,
    current: PointerSample,
    calls: Vec<DrawCall>,
    title: String,
    title_changes: usize,
}

impl HeadlessBackend {
    /// Creates a backend that replays `script`, one sample per frame.
    #[must_use]
    pub fn new(script: Vec<PointerSample>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Draw calls of the most recent frame, in order.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Text drawn in the most recent frame.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text(text, ..) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Current window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// How many times the title was set.
    #[must_use]
    pub fn title_changes(&self) -> usize {
        self.title_changes
    }

    /// Frames completed.
    #[must_use]
    pub fn frames_presented(&self) -> usize {
        self.frame
    }
}

impl Backend for HeadlessBackend {
    fn should_close(&self) -> bool {
        self.frame >= self.script.len()
    }

    fn begin_frame(&mut self) {
        self.calls.clear();
        self.current = self
            .script
            .get(self.frame)
            .copied()
            .unwrap_or(PointerSample::idle(self.current.position));
    }

    fn end_frame(&mut self) {
        self.frame += 1;
    }

    fn clear(&mut self, color: Rgba8) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn pointer_position(&self) -> Point {
        self.current.position
    }

    fn button_pressed(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.current.primary_pressed,
            PointerButton::Secondary => self.current.secondary_pressed,
        }
    }

    fn button_held(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.current.primary_held,
            PointerButton::Secondary => self.current.secondary_pressed,
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba8) {
        self.calls.push(DrawCall::Stroke(rect, color));
    }

    fn measure_text(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * GLYPH_ASPECT
    }

    fn draw_text(&mut self, text: &str, origin: Point, size: f64, color: Rgba8) {
        self.calls
            .push(DrawCall::Text(text.to_owned(), origin, size, color));
    }

    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
        self.title_changes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::config::{INFRACTION_LABEL, ScheduleConfig};
    use cadence_core::frame::FrameLoop;
    use cadence_core::theme::Theme;
    use cadence_core::trace::Tracer;

    #[test]
    fn script_drag_shape() {
        let script = Script::new()
            .drag(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 4)
            .finish();
        assert_eq!(script.len(), 6);
        assert!(script[0].primary_pressed);
        assert_eq!(script[2].position, Point::new(50.0, 0.0));
        assert!(script[4].primary_held);
        assert!(!script[5].primary_held);
    }

    #[test]
    fn drag_interval_to_timer_width() {
        let script = Script::new()
            .drag(Point::new(310.0, 160.0), Point::new(790.0, 160.0), 8)
            .finish();
        let mut backend = HeadlessBackend::new(script);
        let mut frame_loop = FrameLoop::default();
        let frames = frame_loop.run(&mut backend, &mut Tracer::none());

        assert_eq!(frames, 10);
        assert_eq!(backend.frames_presented(), 10);
        assert_eq!(frame_loop.schedule().interval.length(), 780.0);
        assert_eq!(backend.title(), "5 skipped frames");
        assert_eq!(backend.title_changes(), 5);
    }

    #[test]
    fn records_last_frame_only() {
        let script = Script::new().idle(Point::ZERO, 2).finish();
        let mut backend = HeadlessBackend::new(script);
        FrameLoop::default().run(&mut backend, &mut Tracer::none());
        assert_eq!(backend.calls()[0], DrawCall::Clear(Rgba8::WHITE));
        let texts: Vec<_> = backend.texts().collect();
        assert_eq!(texts, ["TIMER", "INTERVAL", "EXPOSURE", "PERIOD"]);
    }

    #[test]
    fn infraction_label_is_drawn() {
        let mut config = ScheduleConfig::timing_sim();
        config.min_period = 600.0;
        config.exposure.length = 20.0;
        let script = Script::new().idle(Point::ZERO, 2).finish();
        let mut backend = HeadlessBackend::new(script);
        FrameLoop::new(&config, Theme::timing_sim()).run(&mut backend, &mut Tracer::none());
        assert_eq!(backend.calls()[0], DrawCall::Clear(Rgba8::RED));
        assert_eq!(backend.texts().next(), Some(INFRACTION_LABEL));
    }

    #[test]
    fn measure_scales_with_size() {
        let backend = HeadlessBackend::default();
        assert_eq!(backend.measure_text("TIMER", 10.0), 30.0);
        assert_eq!(backend.measure_text("", 10.0), 0.0);
    }
}
