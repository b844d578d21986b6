// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`FrameLoop`](crate::frame::FrameLoop) calls once a frame has been
//! resolved and drawn. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::span::{DragTransition, SpanRole};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Whether a drag started or ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// The primary button went down on a span's edge.
    Started,
    /// The primary button was released.
    Ended,
}

impl DragPhase {
    /// Maps a span transition to a phase; `None` for no transition.
    #[must_use]
    pub const fn from_transition(transition: DragTransition) -> Option<Self> {
        match transition {
            DragTransition::None => None,
            DragTransition::Started => Some(Self::Started),
            DragTransition::Ended => Some(Self::Ended),
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per frame after resolution and tiling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameResolvedEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Span lengths in [`SpanRole::ALL`] order.
    pub lengths: [f64; 4],
    /// Exposures per interval.
    pub num_exposures: u32,
    /// Whole intervals in the timer.
    pub num_intervals: u32,
    /// Rounding residue of the period derivation.
    pub period_gap: f64,
    /// `(period - exposure) / timer`.
    pub idle_fraction: f64,
    /// Constraint passes that ran.
    pub passes: u32,
    /// Tiles drawn, primaries included.
    pub tile_count: usize,
}

/// Emitted when a drag on a span starts or ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Span being dragged.
    pub role: SpanRole,
    /// Start or end.
    pub phase: DragPhase,
    /// Span length after this frame's resolution.
    pub length: f64,
}

/// Emitted when a secondary click snaps the interval to one exposure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResetEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Interval length after the reset.
    pub interval_length: f64,
}

/// Emitted when the idle-time infraction flag flips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfractionEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// New state of the flag.
    pub active: bool,
    /// Idle fraction that caused the flip.
    pub idle_fraction: f64,
}

/// Emitted when the window title changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TitleEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Skipped exposures shown in the title.
    pub skipped: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called once per frame after resolution and tiling.
    fn on_frame_resolved(&mut self, e: &FrameResolvedEvent) {
        _ = e;
    }

    /// Called when a drag starts or ends.
    fn on_drag(&mut self, e: &DragEvent) {
        _ = e;
    }

    /// Called when the interval is reset by a secondary click.
    fn on_reset(&mut self, e: &ResetEvent) {
        _ = e;
    }

    /// Called when the infraction flag flips.
    fn on_infraction(&mut self, e: &InfractionEvent) {
        _ = e;
    }

    /// Called when the window title changes.
    fn on_title(&mut self, e: &TitleEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameResolvedEvent`].
    #[inline]
    pub fn frame_resolved(&mut self, e: &FrameResolvedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_resolved(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DragEvent`].
    #[inline]
    pub fn drag(&mut self, e: &DragEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_drag(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResetEvent`].
    #[inline]
    pub fn reset(&mut self, e: &ResetEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reset(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`InfractionEvent`].
    #[inline]
    pub fn infraction(&mut self, e: &InfractionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_infraction(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TitleEvent`].
    #[inline]
    pub fn title(&mut self, e: &TitleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_title(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_drag() -> DragEvent {
        DragEvent {
            frame_index: 42,
            role: SpanRole::Interval,
            phase: DragPhase::Started,
            length: 300.0,
        }
    }

    #[test]
    fn drag_phase_from_transition() {
        assert_eq!(DragPhase::from_transition(DragTransition::None), None);
        assert_eq!(
            DragPhase::from_transition(DragTransition::Started),
            Some(DragPhase::Started)
        );
        assert_eq!(
            DragPhase::from_transition(DragTransition::Ended),
            Some(DragPhase::Ended)
        );
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_drag(&sample_drag());
        sink.on_reset(&ResetEvent {
            frame_index: 0,
            interval_length: 123.6,
        });
        sink.on_title(&TitleEvent {
            frame_index: 0,
            skipped: 1,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.drag(&sample_drag());
        tracer.infraction(&InfractionEvent {
            frame_index: 1,
            active: true,
            idle_fraction: 0.5,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            drags: Vec<(u64, SpanRole)>,
        }
        impl TraceSink for RecordingSink {
            fn on_drag(&mut self, e: &DragEvent) {
                self.drags.push((e.frame_index, e.role));
            }
        }

        let mut sink = RecordingSink { drags: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.drag(&sample_drag());
        tracer.reset(&ResetEvent {
            frame_index: 42,
            interval_length: 123.6,
        });
        drop(tracer);
        assert_eq!(sink.drags, &[(42, SpanRole::Interval)]);
    }
}
