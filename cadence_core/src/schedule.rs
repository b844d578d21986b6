// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The schedule aggregate: four spans plus the idle-time infraction flag.
//!
//! The spans nest as timer ⊇ repeated interval ⊇ repeated (period ⊇
//! exposure). [`Schedule`] only stores them; the coupling rules live in
//! [`Resolver`](crate::resolve::Resolver).

use crate::config::{ScheduleConfig, SpanConfig};
use crate::span::{Span, SpanRole};

/// All mutable visualizer state.
///
/// Owned by the [`FrameLoop`](crate::frame::FrameLoop) and lent by reference
/// to the resolver and the tiler.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    /// The outer window.
    pub timer: Span,
    /// The repeating unit inside the timer.
    pub interval: Span,
    /// The active part of each period.
    pub exposure: Span,
    /// Interval divided by the exposure count.
    pub period: Span,
    infraction: bool,
    timer_label: &'static str,
    infraction_label: &'static str,
}

impl Schedule {
    /// Creates the four spans from a configuration.
    #[must_use]
    pub fn new(config: &ScheduleConfig) -> Self {
        let span = |role: SpanRole, span_config: &SpanConfig| {
            Span::from_config(
                role,
                span_config,
                config.edge_threshold,
                config.handle_width,
            )
        };
        Self {
            timer: span(SpanRole::Timer, &config.timer),
            interval: span(SpanRole::Interval, &config.interval),
            exposure: span(SpanRole::Exposure, &config.exposure),
            period: span(SpanRole::Period, &config.period),
            infraction: false,
            timer_label: config.timer_label,
            infraction_label: config.infraction_label,
        }
    }

    /// The span playing `role`.
    #[must_use]
    pub fn span(&self, role: SpanRole) -> &Span {
        match role {
            SpanRole::Timer => &self.timer,
            SpanRole::Interval => &self.interval,
            SpanRole::Exposure => &self.exposure,
            SpanRole::Period => &self.period,
        }
    }

    /// Mutable access to the span playing `role`.
    pub fn span_mut(&mut self, role: SpanRole) -> &mut Span {
        match role {
            SpanRole::Timer => &mut self.timer,
            SpanRole::Interval => &mut self.interval,
            SpanRole::Exposure => &mut self.exposure,
            SpanRole::Period => &mut self.period,
        }
    }

    /// The spans in primary draw order (timer, interval, exposure, period).
    #[must_use]
    pub fn spans(&self) -> [&Span; 4] {
        [&self.timer, &self.interval, &self.exposure, &self.period]
    }

    /// Current lengths in [`SpanRole::ALL`] order.
    #[must_use]
    pub fn lengths(&self) -> [f64; 4] {
        self.spans().map(Span::length)
    }

    /// Whether the idle-time infraction is active.
    #[must_use]
    pub fn infraction(&self) -> bool {
        self.infraction
    }

    /// Sets the infraction flag and relabels the timer to match.
    ///
    /// Returns `true` if the flag changed.
    pub fn set_infraction(&mut self, infraction: bool) -> bool {
        let changed = self.infraction != infraction;
        self.infraction = infraction;
        self.timer.set_label(if infraction {
            self.infraction_label
        } else {
            self.timer_label
        });
        changed
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(&ScheduleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INFRACTION_LABEL;

    #[test]
    fn spans_follow_config() {
        let schedule = Schedule::default();
        assert_eq!(schedule.lengths(), [780.0, 300.0, 120.0, 120.0]);
        assert_eq!(schedule.timer.label(), "TIMER");
        assert!(!schedule.period.is_editable());
        assert_eq!(schedule.exposure.origin().y, 210.0);
    }

    #[test]
    fn span_lookup_by_role() {
        let mut schedule = Schedule::default();
        for role in SpanRole::ALL {
            assert_eq!(schedule.span(role).role(), role);
            assert_eq!(schedule.span_mut(role).role(), role);
        }
    }

    #[test]
    fn infraction_relabels_timer() {
        let mut schedule = Schedule::default();
        assert!(schedule.set_infraction(true));
        assert_eq!(schedule.timer.label(), INFRACTION_LABEL);
        assert!(!schedule.set_infraction(true), "no change the second time");
        assert!(schedule.set_infraction(false));
        assert_eq!(schedule.timer.label(), "TIMER");
    }
}
