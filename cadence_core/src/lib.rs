// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint resolution and tiling for an interactive timing-schedule
//! visualizer.
//!
//! A schedule is four nested widths: a **timer** window, tiled by repeating
//! **intervals**, each tiled by repeating **periods**, each holding one
//! **exposure**. The user drags the right edges of the primary rectangles;
//! `cadence_core` keeps the four widths consistent and expands them into a
//! grid of repeated tiles every frame. It is `no_std` compatible (with
//! `alloc`).
//!
//! # Architecture
//!
//! One frame flows through the crate like this:
//!
//! ```text
//!   Backend (pointer state)
//!       │
//!       ▼
//!   PointerSample ──► Resolver::resolve() ──► Resolution
//!                            │                    │
//!                            ▼                    ▼
//!                        Schedule ──────► Tiling::compute()
//!                                                 │
//!                 ┌───────────────────────────────┘
//!                 ▼
//!   DrawPlan::rebuild() ──► DrawPlan::execute() ──► Backend (draw calls)
//! ```
//!
//! **[`span`]**: A single draggable extent with hover/drag state. All four
//! schedule quantities share this type and differ only in their
//! [`SpanRole`](span::SpanRole).
//!
//! **[`schedule`]**: The aggregate owning the four spans and the idle-time
//! infraction flag.
//!
//! **[`resolve`]**: The ordered constraint pass that couples timer, interval,
//! exposure, and period.
//!
//! **[`tile`]**: Expands resolved widths into primary and repeated tiles.
//!
//! **[`plan`]**: Lowers a tiling into back-to-front draw commands.
//!
//! **[`backend`]**: The [`Backend`](backend::Backend) trait that windowing
//! and rendering integrations implement.
//!
//! **[`frame`]**: [`FrameLoop`](frame::FrameLoop), which ties the above
//! together once per rendered frame.
//!
//! **[`config`]** and **[`theme`]**: Layout presets and colors.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod color;
pub mod config;
pub mod frame;
pub mod plan;
pub mod pointer;
pub mod resolve;
pub mod schedule;
pub mod span;
pub mod theme;
pub mod tile;
pub mod trace;
