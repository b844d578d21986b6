// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use cadence_core::span::SpanRole;
use cadence_core::trace::{
    DragEvent, DragPhase, FrameResolvedEvent, InfractionEvent, ResetEvent, TitleEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_RESOLVED: u8 = 1;
const TAG_DRAG: u8 = 2;
const TAG_RESET: u8 = 3;
const TAG_INFRACTION: u8 = 4;
const TAG_TITLE: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_role(&mut self, role: SpanRole) {
        self.write_u8(match role {
            SpanRole::Timer => 0,
            SpanRole::Interval => 1,
            SpanRole::Exposure => 2,
            SpanRole::Period => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_resolved(&mut self, e: &FrameResolvedEvent) {
        self.write_u8(TAG_FRAME_RESOLVED);
        self.write_u64(e.frame_index);
        for length in e.lengths {
            self.write_f64(length);
        }
        self.write_u32(e.num_exposures);
        self.write_u32(e.num_intervals);
        self.write_f64(e.period_gap);
        self.write_f64(e.idle_fraction);
        self.write_u32(e.passes);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "tile count capped at u32::MAX for recording"
        )]
        self.write_u32(e.tile_count.min(u32::MAX as usize) as u32);
    }

    fn on_drag(&mut self, e: &DragEvent) {
        self.write_u8(TAG_DRAG);
        self.write_u64(e.frame_index);
        self.write_role(e.role);
        self.write_u8(match e.phase {
            DragPhase::Started => 0,
            DragPhase::Ended => 1,
        });
        self.write_f64(e.length);
    }

    fn on_reset(&mut self, e: &ResetEvent) {
        self.write_u8(TAG_RESET);
        self.write_u64(e.frame_index);
        self.write_f64(e.interval_length);
    }

    fn on_infraction(&mut self, e: &InfractionEvent) {
        self.write_u8(TAG_INFRACTION);
        self.write_u64(e.frame_index);
        self.write_u8(u8::from(e.active));
        self.write_f64(e.idle_fraction);
    }

    fn on_title(&mut self, e: &TitleEvent) {
        self.write_u8(TAG_TITLE);
        self.write_u64(e.frame_index);
        self.write_u32(e.skipped);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`FrameResolvedEvent`].
    FrameResolved(FrameResolvedEvent),
    /// A [`DragEvent`].
    Drag(DragEvent),
    /// A [`ResetEvent`].
    Reset(ResetEvent),
    /// An [`InfractionEvent`].
    Infraction(InfractionEvent),
    /// A [`TitleEvent`].
    Title(TitleEvent),
}

impl RecordedEvent {
    /// Frame counter of the event.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        match self {
            Self::FrameResolved(e) => e.frame_index,
            Self::Drag(e) => e.frame_index,
            Self::Reset(e) => e.frame_index,
            Self::Infraction(e) => e.frame_index,
            Self::Title(e) => e.frame_index,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Decoding stops at the first truncated or unknown record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_role(&mut self) -> Option<SpanRole> {
        Some(match self.read_u8()? {
            0 => SpanRole::Timer,
            1 => SpanRole::Interval,
            2 => SpanRole::Exposure,
            _ => SpanRole::Period,
        })
    }

    fn decode_frame_resolved(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let mut lengths = [0.0; 4];
        for length in &mut lengths {
            *length = self.read_f64()?;
        }
        Some(RecordedEvent::FrameResolved(FrameResolvedEvent {
            frame_index,
            lengths,
            num_exposures: self.read_u32()?,
            num_intervals: self.read_u32()?,
            period_gap: self.read_f64()?,
            idle_fraction: self.read_f64()?,
            passes: self.read_u32()?,
            tile_count: self.read_u32()? as usize,
        }))
    }

    fn decode_drag(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Drag(DragEvent {
            frame_index: self.read_u64()?,
            role: self.read_role()?,
            phase: match self.read_u8()? {
                0 => DragPhase::Started,
                _ => DragPhase::Ended,
            },
            length: self.read_f64()?,
        }))
    }

    fn decode_reset(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reset(ResetEvent {
            frame_index: self.read_u64()?,
            interval_length: self.read_f64()?,
        }))
    }

    fn decode_infraction(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Infraction(InfractionEvent {
            frame_index: self.read_u64()?,
            active: self.read_u8()? != 0,
            idle_fraction: self.read_f64()?,
        }))
    }

    fn decode_title(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Title(TitleEvent {
            frame_index: self.read_u64()?,
            skipped: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FRAME_RESOLVED => self.decode_frame_resolved(),
            TAG_DRAG => self.decode_drag(),
            TAG_RESET => self.decode_reset(),
            TAG_INFRACTION => self.decode_infraction(),
            TAG_TITLE => self.decode_title(),
            _ => {
                self.pos = self.data.len();
                None
            }
        }
    }
}
