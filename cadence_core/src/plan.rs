// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw plan: an ordered sequence of draw commands for one frame.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::backend::Backend;
use crate::color::Rgba8;
use crate::schedule::Schedule;
use crate::span::Span;
use crate::theme::Theme;
use crate::tile::Tiling;

/// A single draw command in the plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Outline a rectangle with a one-pixel border.
    StrokeRect {
        /// Area to outline.
        rect: Rect,
        /// Border color.
        color: Rgba8,
    },
    /// Draw a line of text.
    Text {
        /// Text to draw.
        text: &'static str,
        /// Top-left corner of the text.
        origin: Point,
        /// Font size.
        size: f64,
        /// Text color.
        color: Rgba8,
    },
}

/// Draw commands for a single frame in back-to-front order.
///
/// Repeated tiles come first, then the primary spans (timer, interval,
/// exposure, period), each with its border, grab handle, and label. Nothing
/// drawn later overlaps a primary rectangle except its own decorations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawPlan {
    /// Commands in back-to-front order.
    pub commands: Vec<DrawCommand>,
}

impl DrawPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan for a tiled schedule.
    ///
    /// `measure` returns the width of a label at a given font size and is
    /// used to size the label boxes.
    #[must_use]
    pub fn build(
        schedule: &Schedule,
        tiling: &Tiling,
        theme: &Theme,
        measure: impl Fn(&str, f64) -> f64,
    ) -> Self {
        let mut plan = Self::new();
        plan.rebuild(schedule, tiling, theme, measure);
        plan
    }

    /// Rebuilds the plan in place, reusing its allocation.
    pub fn rebuild(
        &mut self,
        schedule: &Schedule,
        tiling: &Tiling,
        theme: &Theme,
        measure: impl Fn(&str, f64) -> f64,
    ) {
        self.commands.clear();
        for tile in tiling.repeated() {
            self.fill(tile.rect, tile.color);
            self.stroke(tile.rect, theme.border);
        }
        for span in schedule.spans() {
            self.push_primary(span, theme, &measure);
        }
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// The commands in back-to-front order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Issues every command to `backend`, in order.
    pub fn execute<B: Backend + ?Sized>(&self, backend: &mut B) {
        for command in &self.commands {
            match *command {
                DrawCommand::FillRect { rect, color } => backend.fill_rect(rect, color),
                DrawCommand::StrokeRect { rect, color } => backend.stroke_rect(rect, color),
                DrawCommand::Text {
                    text,
                    origin,
                    size,
                    color,
                } => backend.draw_text(text, origin, size, color),
            }
        }
    }

    fn fill(&mut self, rect: Rect, color: Rgba8) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke(&mut self, rect: Rect, color: Rgba8) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }

    fn push_primary(&mut self, span: &Span, theme: &Theme, measure: &impl Fn(&str, f64) -> f64) {
        let rect = span.rect();
        self.fill(rect, span.color());
        self.stroke(rect, theme.border);
        if let Some(handle) = span.handle_rect() {
            self.fill(handle, theme.handle);
        }

        let label = span.label();
        let text_origin = Point::new(
            libm::floor(span.origin().x + theme.label_offset),
            libm::floor(span.origin().y + theme.label_offset),
        );
        let label_box = Rect::from_origin_size(
            Point::new(text_origin.x - theme.text_padding, text_origin.y - 2.0),
            Size::new(
                measure(label, theme.text_size) + 2.0 * theme.text_padding,
                theme.text_size + 6.0,
            ),
        );
        self.fill(label_box, theme.label_background);
        self.commands.push(DrawCommand::Text {
            text: label,
            origin: text_origin,
            size: theme.text_size,
            color: theme.label_text,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfig;
    use crate::pointer::PointerSample;
    use crate::resolve::Resolver;
    use crate::span::SpanRole;

    /// Six pixels per character, like a small monospace font.
    fn measure(text: &str, _size: f64) -> f64 {
        6.0 * text.len() as f64
    }

    fn plan_for(pointer: PointerSample) -> (Schedule, Tiling, DrawPlan) {
        let config = ScheduleConfig::timing_sim();
        let mut schedule = Schedule::new(&config);
        let resolution = Resolver::new(&config).resolve(&mut schedule, &pointer);
        let tiling = Tiling::compute(&schedule, &resolution);
        let plan = DrawPlan::build(&schedule, &tiling, &Theme::timing_sim(), measure);
        (schedule, tiling, plan)
    }

    fn texts(plan: &DrawPlan) -> Vec<&'static str> {
        plan.commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(*text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn repeated_tiles_precede_primaries() {
        let (_, tiling, plan) = plan_for(PointerSample::idle(Point::ZERO));
        let repeated = tiling.repeated().count();
        // Fill and border for every repeated tile.
        for (i, command) in plan.commands()[..2 * repeated].iter().enumerate() {
            match command {
                DrawCommand::FillRect { .. } => assert_eq!(i % 2, 0),
                DrawCommand::StrokeRect { .. } => assert_eq!(i % 2, 1),
                DrawCommand::Text { .. } => panic!("text among repeated tiles"),
            }
        }
        // Four primaries without handles: fill, border, label box, text.
        assert_eq!(plan.commands().len(), 2 * repeated + 4 * 4);
    }

    #[test]
    fn labels_in_primary_order() {
        let (_, _, plan) = plan_for(PointerSample::idle(Point::ZERO));
        assert_eq!(texts(&plan), ["TIMER", "INTERVAL", "EXPOSURE", "PERIOD"]);
    }

    #[test]
    fn label_box_surrounds_text() {
        let (schedule, tiling, plan) = plan_for(PointerSample::idle(Point::ZERO));
        let timer_start = 2 * tiling.repeated().count();
        let commands = &plan.commands()[timer_start..timer_start + 4];
        assert_eq!(
            commands[0],
            DrawCommand::FillRect {
                rect: schedule.timer.rect(),
                color: Rgba8::RED,
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::FillRect {
                // "TIMER" is 30 px wide; 4 px padding on each side.
                rect: Rect::new(16.0, 18.0, 54.0, 34.0),
                color: Rgba8::BLACK,
            }
        );
        assert_eq!(
            commands[3],
            DrawCommand::Text {
                text: "TIMER",
                origin: Point::new(20.0, 20.0),
                size: 10.0,
                color: Rgba8::WHITE,
            }
        );
    }

    #[test]
    fn hovered_span_gets_handle_after_border() {
        // Hover the interval's right edge at x = 310.
        let (schedule, tiling, plan) = plan_for(PointerSample::idle(Point::new(310.0, 160.0)));
        let interval_start = 2 * tiling.repeated().count() + 4;
        let handle = schedule.span(SpanRole::Interval).handle_rect();
        assert!(handle.is_some(), "interval should be hovered");
        assert_eq!(
            plan.commands()[interval_start + 2],
            DrawCommand::FillRect {
                rect: Rect::new(300.0, 110.0, 310.0, 210.0),
                color: Rgba8::GRAY,
            }
        );
        assert_eq!(plan.commands().len(), 2 * tiling.repeated().count() + 17);
    }

    #[test]
    fn execute_forwards_in_order() {
        #[derive(Default)]
        struct Log(Vec<&'static str>);
        impl Backend for Log {
            fn should_close(&self) -> bool {
                true
            }
            fn begin_frame(&mut self) {}
            fn end_frame(&mut self) {}
            fn clear(&mut self, _: Rgba8) {}
            fn pointer_position(&self) -> Point {
                Point::ZERO
            }
            fn button_pressed(&self, _: crate::pointer::PointerButton) -> bool {
                false
            }
            fn button_held(&self, _: crate::pointer::PointerButton) -> bool {
                false
            }
            fn fill_rect(&mut self, _: Rect, _: Rgba8) {
                self.0.push("fill");
            }
            fn stroke_rect(&mut self, _: Rect, _: Rgba8) {
                self.0.push("stroke");
            }
            fn measure_text(&self, text: &str, size: f64) -> f64 {
                measure(text, size)
            }
            fn draw_text(&mut self, _: &str, _: Point, _: f64, _: Rgba8) {
                self.0.push("text");
            }
            fn set_title(&mut self, _: &str) {}
        }

        let (_, _, plan) = plan_for(PointerSample::idle(Point::ZERO));
        let mut log = Log::default();
        plan.execute(&mut log);
        assert_eq!(log.0.len(), plan.commands().len());
        assert_eq!(&log.0[log.0.len() - 4..], ["fill", "stroke", "fill", "text"]);
    }

    #[test]
    fn clear_empties_plan() {
        let (_, _, mut plan) = plan_for(PointerSample::idle(Point::ZERO));
        plan.clear();
        assert!(plan.commands().is_empty());
    }
}
