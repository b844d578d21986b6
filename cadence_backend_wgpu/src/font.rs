// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A built-in 5×7 bitmap font.
//!
//! Labels are short uppercase strings, so text is rasterized as filled cells
//! rather than through a glyph atlas. Each glyph occupies a cell grid of
//! `size / 8` pixels, five cells wide and seven tall, and advances six cells.
//! Lowercase letters render as uppercase; characters without a glyph render
//! as `?`.

use kurbo::{Point, Rect};

/// Glyph width in cells.
pub const GLYPH_COLUMNS: u32 = 5;

/// Glyph height in cells.
pub const GLYPH_ROWS: usize = 7;

/// Horizontal advance per character, in cells.
pub const ADVANCE_CELLS: f64 = 6.0;

/// Cells per unit of font size.
const CELLS_PER_EM: f64 = 8.0;

type Glyph = [u8; GLYPH_ROWS];

const UNKNOWN: Glyph = [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04];

/// Row bitmaps for `c`, most significant of the low five bits leftmost.
fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        ' ' => [0x00; GLYPH_ROWS],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '*' => [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => UNKNOWN,
    }
}

/// Side length of one glyph cell at `size`.
#[must_use]
pub fn cell_size(size: f64) -> f64 {
    size / CELLS_PER_EM
}

/// Width of `text` rendered at `size`.
#[must_use]
pub fn measure(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * ADVANCE_CELLS * cell_size(size)
}

/// Appends the filled cells of `text` to `out`.
///
/// Horizontally adjacent cells in a glyph row are merged into one rectangle.
pub fn glyph_rects(text: &str, origin: Point, size: f64, out: &mut Vec<Rect>) {
    let cell = cell_size(size);
    for (index, c) in text.chars().enumerate() {
        let x0 = origin.x + index as f64 * ADVANCE_CELLS * cell;
        for (row, bits) in glyph(c).into_iter().enumerate() {
            let y0 = origin.y + row as f64 * cell;
            let mut col = 0;
            while col < GLYPH_COLUMNS {
                if !lit(bits, col) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_COLUMNS && lit(bits, col) {
                    col += 1;
                }
                out.push(Rect::new(
                    x0 + f64::from(start) * cell,
                    y0,
                    x0 + f64::from(col) * cell,
                    y0 + cell,
                ));
            }
        }
    }
}

fn lit(bits: u8, col: u32) -> bool {
    bits & (0x10 >> col) != 0
}
