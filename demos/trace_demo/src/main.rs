// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted headless session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Replays a short pointer script (shrink the timer, reset the interval,
//! widen the exposure) through [`FrameLoop`] on a
//! [`HeadlessBackend`](cadence_debug::headless::HeadlessBackend), recording
//! events to both a [`PrettyPrintSink`](cadence_debug::pretty::PrettyPrintSink)
//! and a [`RecorderSink`](cadence_debug::recorder::RecorderSink), then exports
//! a Chrome trace JSON file.
//!
//! Run with: `cargo run -p trace_demo`

use std::fs::File;
use std::io::BufWriter;

use cadence_core::frame::FrameLoop;
use cadence_core::trace::Tracer;
use cadence_debug::chrome::{self, FRAME_US_60HZ};
use cadence_debug::headless::{HeadlessBackend, Script};
use cadence_debug::pretty::PrettyPrintSink;
use cadence_debug::recorder::RecorderSink;
use cadence_debug::tee::TeeSink;
use kurbo::Point;

/// Steps per scripted drag.
const DRAG_STEPS: usize = 10;

fn main() {
    // -- script ------------------------------------------------------------
    let script = Script::new()
        .idle(Point::new(400.0, 380.0), 2)
        // Timer right edge, 790 -> 500.
        .drag(Point::new(790.0, 60.0), Point::new(500.0, 60.0), DRAG_STEPS)
        // Right-click inside the interval.
        .secondary_click(Point::new(60.0, 160.0))
        // Exposure right edge, 130 -> 260.
        .drag(Point::new(130.0, 260.0), Point::new(260.0, 260.0), DRAG_STEPS)
        .idle(Point::new(400.0, 380.0), 2)
        .finish();

    // -- sinks -------------------------------------------------------------
    let pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut sink = TeeSink::new(pretty, RecorderSink::new());

    // -- run ---------------------------------------------------------------
    let mut backend = HeadlessBackend::new(script);
    let mut frame_loop = FrameLoop::default();
    let frames = {
        let mut tracer = Tracer::new(&mut sink);
        frame_loop.run(&mut backend, &mut tracer)
    };

    let schedule = frame_loop.schedule();
    println!(
        "final: timer={:.1} interval={:.1} exposure={:.1} period={:.1} title={:?}",
        schedule.timer.length(),
        schedule.interval.length(),
        schedule.exposure.length(),
        schedule.period.length(),
        backend.title(),
    );

    // -- export Chrome trace -----------------------------------------------
    let (_, recorder) = sink.into_inner();
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    chrome::export(recorder.as_bytes(), FRAME_US_60HZ, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({frames} frames)");
}
