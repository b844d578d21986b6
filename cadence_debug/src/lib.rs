// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for cadence
//! diagnostics.
//!
//! This crate provides [`TraceSink`](cadence_core::trace::TraceSink)
//! implementations for development and post-mortem analysis, plus a
//! windowless [`Backend`](cadence_core::backend::Backend):
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from
//!   recorded bytes.
//! - [`tee::TeeSink`]: forwards every event to two sinks.
//! - [`headless::HeadlessBackend`]: replays a scripted pointer and records
//!   draw calls, for tests and batch runs.

pub mod chrome;
pub mod headless;
pub mod pretty;
pub mod recorder;
pub mod tee;
