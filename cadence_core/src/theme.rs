// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colors and label metrics used when lowering tiles into draw commands.

use crate::color::Rgba8;

/// Colors and text metrics for the draw plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Frame background.
    pub background: Rgba8,
    /// Frame background while the idle-time infraction is active.
    pub infraction_background: Rgba8,
    /// Rectangle outlines.
    pub border: Rgba8,
    /// Grab handle fill.
    pub handle: Rgba8,
    /// Box behind span labels.
    pub label_background: Rgba8,
    /// Label text.
    pub label_text: Rgba8,
    /// Label font size.
    pub text_size: f64,
    /// Horizontal padding of the label box to the left of the text.
    pub text_padding: f64,
    /// Offset of the label from the span's top-left corner.
    pub label_offset: f64,
}

impl Theme {
    /// Opaque black borders and label boxes.
    #[must_use]
    pub const fn timing_sim() -> Self {
        Self {
            background: Rgba8::WHITE,
            infraction_background: Rgba8::RED,
            border: Rgba8::BLACK,
            handle: Rgba8::GRAY,
            label_background: Rgba8::BLACK,
            label_text: Rgba8::WHITE,
            text_size: 10.0,
            text_padding: 4.0,
            label_offset: 10.0,
        }
    }

    /// Translucent borders and label boxes.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            border: Rgba8::BLACK.with_alpha(50),
            label_background: Rgba8::BLACK.with_alpha(200),
            ..Self::timing_sim()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::timing_sim()
    }
}
