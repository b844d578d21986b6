// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout presets and tuning constants.
//!
//! A [`ScheduleConfig`] fixes everything that does not change while the
//! visualizer runs: window size, span placement and bounds, the exposure
//! padding, the period floor, and the idle-time threshold. Two presets are
//! provided, [`ScheduleConfig::timing_sim`] (the default) and
//! [`ScheduleConfig::classic`], an earlier, coarser layout.

use kurbo::{Point, Size};

use crate::color::Rgba8;
use crate::resolve::ResolveMode;

/// Label shown on the timer while the idle-time infraction is active.
pub const INFRACTION_LABEL: &str = "***SENSOR IDLE TIME INFRACTION***";

/// Placement, bounds, and appearance of one span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanConfig {
    /// Display label.
    pub label: &'static str,
    /// Fixed top-left corner.
    pub origin: Point,
    /// Initial width.
    pub length: f64,
    /// Fixed height.
    pub height: f64,
    /// Initial lower bound on the width.
    pub min_length: f64,
    /// Initial upper bound on the width.
    pub max_length: f64,
    /// Whether the right edge can be dragged.
    pub editable: bool,
    /// Fill color of the primary rectangle.
    pub color: Rgba8,
}

/// Configuration for a [`Schedule`](crate::schedule::Schedule) and its
/// [`Resolver`](crate::resolve::Resolver).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleConfig {
    /// Window size in layout pixels.
    pub window_size: Size,
    /// Initial window title.
    pub window_title: &'static str,
    /// Half-width of the band around a right edge that counts as a hit.
    pub edge_threshold: f64,
    /// Width of the grab handle drawn while hovering or dragging.
    pub handle_width: f64,
    /// Fraction of an exposure reserved as padding (0.03 = 3%).
    pub exposure_padding: f64,
    /// Floor on the width each exposure occupies when counting exposures.
    pub min_period: f64,
    /// Idle fraction above which the infraction flag is raised.
    pub idle_threshold: f64,
    /// Timer label while no infraction is active.
    pub timer_label: &'static str,
    /// Timer label while the infraction is active.
    pub infraction_label: &'static str,
    /// How many constraint passes run per frame.
    pub resolve_mode: ResolveMode,
    /// The outer window.
    pub timer: SpanConfig,
    /// The repeating unit inside the timer.
    pub interval: SpanConfig,
    /// The active part of each period.
    pub exposure: SpanConfig,
    /// The derived period. Never editable.
    pub period: SpanConfig,
}

impl ScheduleConfig {
    /// The default layout: an 800×440 window with a 10 px edge band and a
    /// 50 px period floor.
    #[must_use]
    pub const fn timing_sim() -> Self {
        let padding = 0.03;
        Self {
            window_size: Size::new(800.0, 440.0),
            window_title: "timing sim",
            edge_threshold: 10.0,
            handle_width: 10.0,
            exposure_padding: padding,
            min_period: 50.0,
            idle_threshold: 0.25,
            timer_label: "TIMER",
            infraction_label: INFRACTION_LABEL,
            resolve_mode: ResolveMode::SinglePass,
            timer: span("TIMER", 10.0, 780.0, 20.0, true, Rgba8::RED),
            interval: span("INTERVAL", 110.0, 300.0, 20.0, true, Rgba8::GREEN),
            exposure: span(
                "EXPOSURE",
                210.0,
                120.0,
                20.0 * (1.0 - padding),
                true,
                Rgba8::BLUE,
            ),
            period: span("PERIOD", 330.0, 120.0, 0.0, false, Rgba8::PURPLE),
        }
    }

    /// The earlier layout: an 800×420 window, a 5 px edge band with a handle
    /// twice as wide, 100 px minimum timer and interval widths, and no period
    /// floor.
    #[must_use]
    pub const fn classic() -> Self {
        let padding = 0.03;
        Self {
            window_size: Size::new(800.0, 420.0),
            window_title: "timing sim",
            edge_threshold: 5.0,
            handle_width: 10.0,
            exposure_padding: padding,
            min_period: 0.0,
            idle_threshold: 0.25,
            timer_label: "TIMER",
            infraction_label: INFRACTION_LABEL,
            resolve_mode: ResolveMode::SinglePass,
            timer: span("TIMER", 10.0, 780.0, 100.0, true, Rgba8::RED),
            interval: span("INTERVAL", 110.0, 300.0, 100.0, true, Rgba8::GREEN),
            exposure: span("EXPOSURE", 210.0, 120.0, 20.0, true, Rgba8::BLUE),
            period: span(
                "PERIOD",
                310.0,
                120.0 * (1.0 + padding),
                0.0,
                false,
                Rgba8::PURPLE,
            ),
        }
    }

    /// Returns this configuration with a different resolve mode.
    #[must_use]
    pub const fn with_resolve_mode(mut self, mode: ResolveMode) -> Self {
        self.resolve_mode = mode;
        self
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::timing_sim()
    }
}

/// Spans share their x origin, height, and upper bound in both presets.
const fn span(
    label: &'static str,
    y: f64,
    length: f64,
    min_length: f64,
    editable: bool,
    color: Rgba8,
) -> SpanConfig {
    SpanConfig {
        label,
        origin: Point::new(10.0, y),
        length,
        height: 100.0,
        min_length,
        max_length: 780.0,
        editable,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_timing_sim() {
        assert_eq!(ScheduleConfig::default(), ScheduleConfig::timing_sim());
    }

    #[test]
    fn period_is_never_editable() {
        assert!(!ScheduleConfig::timing_sim().period.editable);
        assert!(!ScheduleConfig::classic().period.editable);
    }

    #[test]
    fn exposure_minimum_leaves_room_for_padding() {
        let config = ScheduleConfig::timing_sim();
        assert!(
            (config.exposure.min_length - 19.4).abs() < 1e-9,
            "got {}",
            config.exposure.min_length
        );
    }

    #[test]
    fn with_resolve_mode_overrides() {
        let config =
            ScheduleConfig::classic().with_resolve_mode(ResolveMode::Converge { max_passes: 4 });
        assert_eq!(config.resolve_mode, ResolveMode::Converge { max_passes: 4 });
        assert_eq!(config.edge_threshold, 5.0);
    }
}
