// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fan-out to two sinks.

use cadence_core::trace::{
    DragEvent, FrameResolvedEvent, InfractionEvent, ResetEvent, TitleEvent, TraceSink,
};

/// A [`TraceSink`] that forwards every event to `first`, then `second`.
///
/// [`Tracer`](cadence_core::trace::Tracer) holds a single sink; nest
/// `TeeSink`s to reach more than two.
#[derive(Debug, Default)]
pub struct TeeSink<A, B> {
    /// Receives each event first.
    pub first: A,
    /// Receives each event second.
    pub second: B,
}

impl<A: TraceSink, B: TraceSink> TeeSink<A, B> {
    /// Creates a tee over two sinks.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Consumes the tee and returns both sinks.
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for TeeSink<A, B> {
    fn on_frame_resolved(&mut self, e: &FrameResolvedEvent) {
        self.first.on_frame_resolved(e);
        self.second.on_frame_resolved(e);
    }

    fn on_drag(&mut self, e: &DragEvent) {
        self.first.on_drag(e);
        self.second.on_drag(e);
    }

    fn on_reset(&mut self, e: &ResetEvent) {
        self.first.on_reset(e);
        self.second.on_reset(e);
    }

    fn on_infraction(&mut self, e: &InfractionEvent) {
        self.first.on_infraction(e);
        self.second.on_infraction(e);
    }

    fn on_title(&mut self, e: &TitleEvent) {
        self.first.on_title(e);
        self.second.on_title(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretty::PrettyPrintSink;
    use crate::recorder::{RecorderSink, decode};

    #[test]
    fn both_sinks_see_every_event() {
        let mut tee = TeeSink::new(
            PrettyPrintSink::with_writer(Vec::<u8>::new()),
            RecorderSink::new(),
        );
        tee.on_reset(&ResetEvent {
            frame_index: 2,
            interval_length: 123.6,
        });
        tee.on_title(&TitleEvent {
            frame_index: 2,
            skipped: 0,
        });
        let (pretty, recorder) = tee.into_inner();
        let text = String::from_utf8(pretty.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(decode(recorder.as_bytes()).count(), 2);
    }
}
