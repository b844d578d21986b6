// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 8-bit RGBA colors.

/// Amount added to each RGB channel when deriving a repeated-tile tint.
pub const TINT_LIGHTEN: u8 = 40;

/// Alpha of a repeated-tile tint.
pub const TINT_ALPHA: u8 = 120;

/// A non-premultiplied sRGB color with 8 bits per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (255 is opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// The palette red.
    pub const RED: Self = Self::rgb(230, 41, 55);
    /// The palette green.
    pub const GREEN: Self = Self::rgb(0, 228, 48);
    /// The palette blue.
    pub const BLUE: Self = Self::rgb(0, 121, 241);
    /// The palette purple.
    pub const PURPLE: Self = Self::rgb(200, 122, 255);
    /// The palette gray, used for grab handles.
    pub const GRAY: Self = Self::rgb(130, 130, 130);

    /// Creates a color from all four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Returns this color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Adds `amount` to each RGB channel (saturating) and replaces the alpha.
    #[must_use]
    pub const fn lighten(self, amount: u8, alpha: u8) -> Self {
        Self::new(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
            alpha,
        )
    }

    /// The lighter, translucent variant used when a span is drawn as a
    /// repeated tile.
    #[must_use]
    pub const fn tint(self) -> Self {
        self.lighten(TINT_LIGHTEN, TINT_ALPHA)
    }

    /// Returns the channels as floats in `0.0..=1.0`.
    #[must_use]
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_saturates_channels() {
        let tint = Rgba8::PURPLE.tint();
        assert_eq!(tint, Rgba8::new(240, 162, 255, TINT_ALPHA));
    }

    #[test]
    fn tint_of_black_is_dark_gray() {
        assert_eq!(Rgba8::BLACK.tint(), Rgba8::new(40, 40, 40, 120));
    }

    #[test]
    fn float_channels() {
        let [r, g, b, a] = Rgba8::new(255, 0, 51, 255).to_f32_array();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6, "got {b}");
        assert_eq!(a, 1.0);
    }
}
