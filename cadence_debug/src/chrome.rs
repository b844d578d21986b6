// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Events carry frame indices rather than wall-clock times, so timestamps are
//! synthesized as `frame_index * frame_us`.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Nominal frame duration at 60 Hz, in microseconds.
pub const FRAME_US_60HZ: f64 = 1_000_000.0 / 60.0;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Span lengths become counter tracks; drags, resets, title changes, and
/// infraction flips become instant events.
pub fn export(bytes: &[u8], frame_us: f64, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = frame_ts(recorded.frame_index(), frame_us);
        match recorded {
            RecordedEvent::FrameResolved(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "Lengths",
                    "cat": "Schedule",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "timer": e.lengths[0],
                        "interval": e.lengths[1],
                        "exposure": e.lengths[2],
                        "period": e.lengths[3],
                    }
                }));
                events.push(json!({
                    "ph": "C",
                    "name": "Counts",
                    "cat": "Schedule",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "exposures": e.num_exposures,
                        "intervals": e.num_intervals,
                        "tiles": e.tile_count,
                        "passes": e.passes,
                    }
                }));
            }
            RecordedEvent::Drag(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("Drag{:?}", e.phase),
                    "cat": "Interaction",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "role": e.role.name(),
                        "length": e.length,
                    }
                }));
            }
            RecordedEvent::Reset(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Reset",
                    "cat": "Interaction",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "interval": e.interval_length,
                    }
                }));
            }
            RecordedEvent::Infraction(e) => {
                let name = if e.active {
                    "InfractionRaised"
                } else {
                    "InfractionCleared"
                };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Schedule",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                        "idle_fraction": e.idle_fraction,
                    }
                }));
            }
            RecordedEvent::Title(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Title",
                    "cat": "Window",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "frame_index": e.frame_index,
                        "skipped": e.skipped,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn frame_ts(frame_index: u64, frame_us: f64) -> f64 {
    frame_index as f64 * frame_us
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use cadence_core::span::SpanRole;
    use cadence_core::trace::{DragEvent, DragPhase, ResetEvent, TraceSink};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_drag(&DragEvent {
            frame_index: 3,
            role: SpanRole::Timer,
            phase: DragPhase::Started,
            length: 780.0,
        });
        rec.on_reset(&ResetEvent {
            frame_index: 6,
            interval_length: 123.6,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), 1000.0, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 2);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "DragStarted");
        assert_eq!(parsed[0]["args"]["role"], "timer");
        assert_eq!(parsed[0]["ts"], 3000.0);

        assert_eq!(parsed[1]["name"], "Reset");
        assert_eq!(parsed[1]["ts"], 6000.0);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], FRAME_US_60HZ, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
