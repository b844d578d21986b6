// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expansion of resolved widths into a grid of tiles.
//!
//! The timer is tiled by intervals; each interval is tiled by periods, each
//! period holding one exposure. Every tile is a copy of its span's rectangle
//! moved along x:
//!
//! ```text
//!   interval i        at  x0 + i * interval
//!   period/exposure j at  x0 + i * interval + j * period
//! ```
//!
//! The tile at `i == 0` (and `j == 0`) coincides with the span itself and is
//! [`TileStyle::Primary`]; all others are [`TileStyle::Repeated`] and use the
//! span's tint.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::color::Rgba8;
use crate::resolve::Resolution;
use crate::schedule::Schedule;
use crate::span::{Span, SpanRole};

/// Whether a tile is the span itself or one of its repetitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileStyle {
    /// The span's own rectangle, drawn on top with label and handle.
    Primary,
    /// A repetition, drawn underneath in the span's tint.
    Repeated,
}

/// One rectangle of the tiling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    /// Which span this tile repeats.
    pub role: SpanRole,
    /// Placement in layout pixels.
    pub rect: Rect,
    /// Primary or repeated.
    pub style: TileStyle,
    /// Fill color: the span color for primaries, the tint for repetitions.
    pub color: Rgba8,
}

impl Tile {
    fn of(span: &Span, x: f64, primary: bool) -> Self {
        let (style, color) = if primary {
            (TileStyle::Primary, span.color())
        } else {
            (TileStyle::Repeated, span.tint())
        };
        Self {
            role: span.role(),
            rect: span.rect_at(x),
            style,
            color,
        }
    }
}

/// All tiles of one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tiling {
    num_intervals: u32,
    num_exposures: u32,
    tiles: Vec<Tile>,
}

impl Tiling {
    /// Creates an empty tiling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles a resolved schedule.
    #[must_use]
    pub fn compute(schedule: &Schedule, resolution: &Resolution) -> Self {
        let mut tiling = Self::new();
        tiling.recompute(schedule, resolution);
        tiling
    }

    /// Re-tiles in place, reusing the tile allocation.
    ///
    /// Tiles are stored per interval: the interval tile, then each period
    /// followed by its exposure.
    pub fn recompute(&mut self, schedule: &Schedule, resolution: &Resolution) {
        self.tiles.clear();
        self.num_intervals = interval_count(schedule.timer.length(), schedule.interval.length());
        self.num_exposures = resolution.num_exposures.max(1);

        let interval = &schedule.interval;
        let x0 = interval.origin().x;
        for i in 0..self.num_intervals {
            let interval_x = x0 + f64::from(i) * interval.length();
            self.tiles.push(Tile::of(interval, interval_x, i == 0));
            for j in 0..self.num_exposures {
                let x = interval_x + f64::from(j) * schedule.period.length();
                let primary = i == 0 && j == 0;
                self.tiles.push(Tile::of(&schedule.period, x, primary));
                self.tiles.push(Tile::of(&schedule.exposure, x, primary));
            }
        }
    }

    /// Whole intervals that fit in the timer.
    #[must_use]
    pub fn num_intervals(&self) -> u32 {
        self.num_intervals
    }

    /// Exposures per interval.
    #[must_use]
    pub fn num_exposures(&self) -> u32 {
        self.num_exposures
    }

    /// All tiles, interval by interval.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Total number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Only the repeated tiles.
    pub fn repeated(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles
            .iter()
            .filter(|tile| tile.style == TileStyle::Repeated)
    }

    /// Only the primary tiles.
    pub fn primary(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles
            .iter()
            .filter(|tile| tile.style == TileStyle::Primary)
    }
}

/// `floor(timer / interval)`, or zero when the interval is not positive.
#[must_use]
pub fn interval_count(timer: f64, interval: f64) -> u32 {
    if interval <= 0.0 || timer <= 0.0 {
        return 0;
    }
    let ratio = libm::floor(timer / interval);
    if ratio.is_nan() {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "ratio is non-negative; `as` saturates above u32::MAX"
    )]
    let count = ratio as u32;
    count
}
