// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Per-frame
//! `[frame]` lines can be suppressed to keep long sessions readable.

use std::io::Write;

use cadence_core::frame::skipped_title;
use cadence_core::trace::{
    DragEvent, DragPhase, FrameResolvedEvent, InfractionEvent, ResetEvent, TitleEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            frames: true,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            frames: true,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            frames: true,
        }
    }

    /// Enables or disables the per-frame `[frame]` line.
    #[must_use]
    pub fn with_frames(mut self, frames: bool) -> Self {
        self.frames = frames;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn phase_name(phase: DragPhase) -> &'static str {
    match phase {
        DragPhase::Started => "start",
        DragPhase::Ended => "end",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_resolved(&mut self, e: &FrameResolvedEvent) {
        if !self.frames {
            return;
        }
        let [timer, interval, exposure, period] = e.lengths;
        let _ = writeln!(
            self.writer,
            "[frame] frame={} timer={timer:.1} interval={interval:.1} \
             exposure={exposure:.1} period={period:.1} exposures={} intervals={} \
             idle={:.3} passes={}",
            e.frame_index, e.num_exposures, e.num_intervals, e.idle_fraction, e.passes,
        );
    }

    fn on_drag(&mut self, e: &DragEvent) {
        let _ = writeln!(
            self.writer,
            "[drag:{}] frame={} {} length={:.1}",
            phase_name(e.phase),
            e.frame_index,
            e.role.name(),
            e.length,
        );
    }

    fn on_reset(&mut self, e: &ResetEvent) {
        let _ = writeln!(
            self.writer,
            "[reset] frame={} interval={:.1}",
            e.frame_index, e.interval_length,
        );
    }

    fn on_infraction(&mut self, e: &InfractionEvent) {
        let state = if e.active { "RAISED" } else { "cleared" };
        let _ = writeln!(
            self.writer,
            "[infraction] frame={} {state} idle={:.3}",
            e.frame_index, e.idle_fraction,
        );
    }

    fn on_title(&mut self, e: &TitleEvent) {
        let _ = writeln!(
            self.writer,
            "[title] frame={} \"{}\"",
            e.frame_index,
            skipped_title(e.skipped),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::span::SpanRole;

    fn frame() -> FrameResolvedEvent {
        FrameResolvedEvent {
            frame_index: 1,
            lengths: [780.0, 300.0, 120.0, 150.0],
            num_exposures: 2,
            num_intervals: 2,
            period_gap: 0.0,
            idle_fraction: 0.0385,
            passes: 1,
            tile_count: 10,
        }
    }

    #[test]
    fn pretty_print_frame() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame_resolved(&frame());
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[frame]"), "got: {output}");
        assert!(output.contains("frame=1"), "got: {output}");
        assert!(output.contains("interval=300.0"), "got: {output}");
        assert!(output.contains("exposures=2"), "got: {output}");
    }

    #[test]
    fn frames_can_be_suppressed() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).with_frames(false);
        sink.on_frame_resolved(&frame());
        sink.on_drag(&DragEvent {
            frame_index: 4,
            role: SpanRole::Exposure,
            phase: DragPhase::Started,
            length: 120.0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[drag:start] frame=4 exposure length=120.0\n");
    }

    #[test]
    fn title_uses_window_text() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_title(&TitleEvent {
            frame_index: 0,
            skipped: 1,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "[title] frame=0 \"1 skipped frame\"\n");
    }
}
