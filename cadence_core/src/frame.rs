// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame interaction loop.
//!
//! [`FrameLoop`] owns all visualizer state and advances it one frame at a
//! time against a [`Backend`]:
//!
//! 1. begin the frame and clear it (red while the infraction flag from the
//!    previous frame is set);
//! 2. sample the pointer once;
//! 3. resolve the schedule;
//! 4. update the window title when the skipped-exposure count changes;
//! 5. tile, build the draw plan, and draw;
//! 6. store the infraction flag and relabel the timer for the next frame;
//! 7. end the frame;
//! 8. emit trace events.
//!
//! Hosts that own their event loop (winit, for example) call
//! [`FrameLoop::step`] once per redraw. Hosts with a blocking frame cadence
//! call [`FrameLoop::run`].

use alloc::format;
use alloc::string::String;

use crate::backend::Backend;
use crate::config::ScheduleConfig;
use crate::plan::DrawPlan;
use crate::pointer::PointerSample;
use crate::resolve::{Resolution, Resolver};
use crate::schedule::Schedule;
use crate::span::SpanRole;
use crate::theme::Theme;
use crate::tile::Tiling;
use crate::trace::{
    DragEvent, DragPhase, FrameResolvedEvent, InfractionEvent, ResetEvent, TitleEvent, Tracer,
};

/// Window title for a skipped-exposure count.
#[must_use]
pub fn skipped_title(skipped: u32) -> String {
    let plural = if skipped == 1 { "" } else { "s" };
    format!("{skipped} skipped frame{plural}")
}

/// Owns the schedule and drives it one frame at a time.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    schedule: Schedule,
    resolver: Resolver,
    theme: Theme,
    tiling: Tiling,
    plan: DrawPlan,
    frame_index: u64,
    title_skipped: Option<u32>,
    resolution: Resolution,
}

impl FrameLoop {
    /// Creates a loop with a fresh schedule.
    #[must_use]
    pub fn new(config: &ScheduleConfig, theme: Theme) -> Self {
        Self {
            schedule: Schedule::new(config),
            resolver: Resolver::new(config),
            theme,
            tiling: Tiling::new(),
            plan: DrawPlan::new(),
            frame_index: 0,
            title_skipped: None,
            resolution: Resolution::default(),
        }
    }

    /// The schedule as of the last frame.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The resolution of the last frame.
    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// The tiling of the last frame.
    #[must_use]
    pub fn tiling(&self) -> &Tiling {
        &self.tiling
    }

    /// The draw plan of the last frame.
    #[must_use]
    pub fn plan(&self) -> &DrawPlan {
        &self.plan
    }

    /// The theme used for drawing.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Frames completed so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Runs one frame and returns its resolution.
    pub fn step<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Resolution {
        backend.begin_frame();
        backend.clear(if self.schedule.infraction() {
            self.theme.infraction_background
        } else {
            self.theme.background
        });

        let pointer = PointerSample::poll(backend);
        let resolution = self.resolver.resolve(&mut self.schedule, &pointer);

        let skipped = resolution.skipped_exposures();
        let title_changed = self.title_skipped != Some(skipped);
        if title_changed {
            backend.set_title(&skipped_title(skipped));
            self.title_skipped = Some(skipped);
        }

        self.tiling.recompute(&self.schedule, &resolution);
        self.plan.rebuild(&self.schedule, &self.tiling, &self.theme, |text, size| {
            backend.measure_text(text, size)
        });
        self.plan.execute(backend);

        let infraction_changed = self.schedule.set_infraction(resolution.infraction);

        backend.end_frame();

        self.emit(tracer, &resolution, title_changed, infraction_changed);
        self.resolution = resolution;
        self.frame_index += 1;
        resolution
    }

    /// Steps until the backend asks to close. Returns the number of frames
    /// run.
    pub fn run<B: Backend + ?Sized>(&mut self, backend: &mut B, tracer: &mut Tracer<'_>) -> u64 {
        let start = self.frame_index;
        while !backend.should_close() {
            self.step(backend, tracer);
        }
        self.frame_index - start
    }

    fn emit(
        &self,
        tracer: &mut Tracer<'_>,
        resolution: &Resolution,
        title_changed: bool,
        infraction_changed: bool,
    ) {
        let frame_index = self.frame_index;
        for role in SpanRole::ALL {
            if let Some(phase) = DragPhase::from_transition(resolution.transition(role)) {
                tracer.drag(&DragEvent {
                    frame_index,
                    role,
                    phase,
                    length: self.schedule.span(role).length(),
                });
            }
        }
        if resolution.reset {
            tracer.reset(&ResetEvent {
                frame_index,
                interval_length: self.schedule.interval.length(),
            });
        }
        if title_changed {
            tracer.title(&TitleEvent {
                frame_index,
                skipped: resolution.skipped_exposures(),
            });
        }
        if infraction_changed {
            tracer.infraction(&InfractionEvent {
                frame_index,
                active: resolution.infraction,
                idle_fraction: resolution.idle_fraction,
            });
        }
        tracer.frame_resolved(&FrameResolvedEvent {
            frame_index,
            lengths: self.schedule.lengths(),
            num_exposures: resolution.num_exposures,
            num_intervals: self.tiling.num_intervals(),
            period_gap: resolution.period_gap,
            idle_fraction: resolution.idle_fraction,
            passes: resolution.passes,
            tile_count: self.tiling.tile_count(),
        });
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(&ScheduleConfig::default(), Theme::default())
    }
}
