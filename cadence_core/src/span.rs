// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable one-dimensional spans.
//!
//! A [`Span`] is a horizontal extent with a fixed origin and height and a
//! mutable length. Its right edge can be grabbed and dragged with the
//! primary pointer button. Every assignment to the length is clamped into
//! `[min_length, max_length]`; bounds themselves may change every frame and
//! are re-applied immediately, because the rest of the frame reads the length
//! right away.
//!
//! # Interaction states
//!
//! ```text
//!            edge hit                 press on edge
//!   Idle ──────────────► Hovering ───────────────────► Dragging
//!    ▲  ◄──────────────     ▲                              │
//!    │     edge missed      │     released on edge         │
//!    │                      └──────────────────────────────┤
//!    └─────────────────────────────────────────────────────┘
//!                       released elsewhere
//! ```
//!
//! Non-editable spans never leave [`DragState::Idle`].

use kurbo::{Point, Rect, Size};

use crate::color::Rgba8;
use crate::config::SpanConfig;
use crate::pointer::PointerSample;

/// Which schedule quantity a span represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanRole {
    /// The outer window.
    Timer,
    /// The repeating unit inside the timer.
    Interval,
    /// The active part of each period.
    Exposure,
    /// Interval divided by the exposure count.
    Period,
}

impl SpanRole {
    /// All roles, outermost first. This is also the primary draw order.
    pub const ALL: [Self; 4] = [Self::Timer, Self::Interval, Self::Exposure, Self::Period];

    /// Position of this role in [`SpanRole::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Timer => 0,
            Self::Interval => 1,
            Self::Exposure => 2,
            Self::Period => 3,
        }
    }

    /// Lowercase name, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::Interval => "interval",
            Self::Exposure => "exposure",
            Self::Period => "period",
        }
    }
}

/// Pointer interaction state of a span's right edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragState {
    /// The pointer is elsewhere.
    #[default]
    Idle,
    /// The pointer rests on the edge; a press would start a drag.
    Hovering,
    /// The edge follows the pointer.
    Dragging,
}

/// What an [`update_interaction`](Span::update_interaction) call changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragTransition {
    /// No drag started or ended.
    #[default]
    None,
    /// A drag started this call.
    Started,
    /// A drag ended this call.
    Ended,
}

/// A horizontal extent whose right edge can be dragged.
#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    role: SpanRole,
    label: &'static str,
    origin: Point,
    length: f64,
    height: f64,
    min_length: f64,
    max_length: f64,
    editable: bool,
    edge_threshold: f64,
    handle_width: f64,
    state: DragState,
    color: Rgba8,
    tint: Rgba8,
}

impl Span {
    /// Creates an editable span with unbounded length.
    ///
    /// The edge band and handle default to 10 px; use the `with_*` methods
    /// to adjust.
    #[must_use]
    pub fn new(
        role: SpanRole,
        label: &'static str,
        origin: Point,
        length: f64,
        height: f64,
        color: Rgba8,
    ) -> Self {
        Self {
            role,
            label,
            origin,
            length,
            height,
            min_length: 0.0,
            max_length: f64::INFINITY,
            editable: true,
            edge_threshold: 10.0,
            handle_width: 10.0,
            state: DragState::Idle,
            color,
            tint: color.tint(),
        }
    }

    /// Creates a span from a configuration entry.
    #[must_use]
    pub fn from_config(
        role: SpanRole,
        config: &SpanConfig,
        edge_threshold: f64,
        handle_width: f64,
    ) -> Self {
        Self::new(
            role,
            config.label,
            config.origin,
            config.length,
            config.height,
            config.color,
        )
        .with_bounds(config.min_length, config.max_length)
        .with_editable(config.editable)
        .with_edge_threshold(edge_threshold)
        .with_handle_width(handle_width)
    }

    /// Returns this span with new bounds, clamping the length.
    #[must_use]
    pub fn with_bounds(mut self, min_length: f64, max_length: f64) -> Self {
        self.set_bounds(min_length, max_length);
        self
    }

    /// Returns this span with editing enabled or disabled.
    #[must_use]
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Returns this span with a different edge hit band half-width.
    #[must_use]
    pub fn with_edge_threshold(mut self, edge_threshold: f64) -> Self {
        self.edge_threshold = edge_threshold;
        self
    }

    /// Returns this span with a different grab handle width.
    #[must_use]
    pub fn with_handle_width(mut self, handle_width: f64) -> Self {
        self.handle_width = handle_width;
        self
    }

    /// Which schedule quantity this span represents.
    #[must_use]
    pub fn role(&self) -> SpanRole {
        self.role
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Replaces the display label.
    pub fn set_label(&mut self, label: &'static str) {
        self.label = label;
    }

    /// Fixed top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current width.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Fixed height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Current lower bound.
    #[must_use]
    pub fn min_length(&self) -> f64 {
        self.min_length
    }

    /// Current upper bound.
    #[must_use]
    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    /// Whether the right edge reacts to the pointer.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Current interaction state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.state
    }

    /// Primary fill color.
    #[must_use]
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Fill color for repeated tiles.
    #[must_use]
    pub fn tint(&self) -> Rgba8 {
        self.tint
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right_edge(&self) -> f64 {
        self.origin.x + self.length
    }

    /// The primary rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, Size::new(self.length, self.height))
    }

    /// The same rectangle moved to a different x coordinate.
    #[must_use]
    pub fn rect_at(&self, x: f64) -> Rect {
        Rect::from_origin_size(
            Point::new(x, self.origin.y),
            Size::new(self.length, self.height),
        )
    }

    /// The grab handle, present only while hovering or dragging.
    #[must_use]
    pub fn handle_rect(&self) -> Option<Rect> {
        match self.state {
            DragState::Idle => None,
            DragState::Hovering | DragState::Dragging => Some(Rect::from_origin_size(
                Point::new(self.right_edge() - self.edge_threshold, self.origin.y),
                Size::new(self.handle_width, self.height),
            )),
        }
    }

    /// Assigns a new length, clamped into the current bounds.
    pub fn set_length(&mut self, length: f64) {
        self.length = self.clamp(length);
    }

    /// Installs new bounds and re-clamps the length.
    ///
    /// If `min_length > max_length` the minimum wins.
    pub fn set_bounds(&mut self, min_length: f64, max_length: f64) {
        self.min_length = min_length;
        self.max_length = max_length;
        self.length = self.clamp(self.length);
    }

    /// Installs a new lower bound and re-clamps the length.
    pub fn set_min_length(&mut self, min_length: f64) {
        self.set_bounds(min_length, self.max_length);
    }

    /// Installs a new upper bound and re-clamps the length.
    pub fn set_max_length(&mut self, max_length: f64) {
        self.set_bounds(self.min_length, max_length);
    }

    /// Returns `true` if `point` lies within the edge band around the right
    /// edge and within the span's vertical extent.
    #[must_use]
    pub fn hit_test_right_edge(&self, point: Point) -> bool {
        if !self.editable {
            return false;
        }
        let edge = self.right_edge();
        (edge - self.edge_threshold..=edge + self.edge_threshold).contains(&point.x)
            && (self.origin.y..=self.origin.y + self.height).contains(&point.y)
    }

    /// Advances the interaction state machine with this frame's pointer
    /// sample, moving the edge while dragging.
    ///
    /// Calling this more than once per frame with the same sample is safe:
    /// a started drag stays started and the length is recomputed from the
    /// same pointer position.
    pub fn update_interaction(&mut self, pointer: &PointerSample) -> DragTransition {
        if !self.editable {
            self.state = DragState::Idle;
            return DragTransition::None;
        }

        let on_edge = self.hit_test_right_edge(pointer.position);
        let mut transition = DragTransition::None;

        if self.state != DragState::Dragging {
            if on_edge && pointer.primary_pressed {
                self.state = DragState::Dragging;
                transition = DragTransition::Started;
            } else {
                self.state = if on_edge {
                    DragState::Hovering
                } else {
                    DragState::Idle
                };
            }
        }

        if self.state == DragState::Dragging {
            if pointer.primary_held {
                self.set_length(pointer.position.x - self.origin.x);
            } else {
                self.state = if on_edge {
                    DragState::Hovering
                } else {
                    DragState::Idle
                };
                // A press released within the same frame is not a drag.
                transition = match transition {
                    DragTransition::Started => DragTransition::None,
                    _ => DragTransition::Ended,
                };
            }
        }

        transition
    }

    fn clamp(&self, length: f64) -> f64 {
        length.min(self.max_length).max(self.min_length)
    }
}
