// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU-side batching of solid-color rectangles.

use bytemuck::{Pod, Zeroable};
use cadence_core::color::Rgba8;
use kurbo::{Rect, Size};

/// One vertex of a solid-color triangle.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Clip-space position.
    pub position: [f32; 2],
    /// Linear or sRGB color, matching the surface format.
    pub color: [f32; 4],
}

impl Vertex {
    /// Vertex attributes for the render pipeline.
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout for the render pipeline.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Converts an sRGB-encoded channel in `0.0..=1.0` to linear light.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Accumulates rectangles as triangle lists for one frame.
#[derive(Clone, Debug)]
pub struct QuadBatch {
    viewport: Size,
    linear: bool,
    vertices: Vec<Vertex>,
}

impl QuadBatch {
    /// Creates a batch for a viewport in layout pixels.
    ///
    /// `linear` is `true` when the target surface performs sRGB encoding, in
    /// which case colors are linearized before upload.
    #[must_use]
    pub fn new(viewport: Size, linear: bool) -> Self {
        Self {
            viewport,
            linear,
            vertices: Vec::new(),
        }
    }

    /// Changes the layout viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Removes all queued rectangles.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Queued vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Converts a color to the surface's encoding.
    #[must_use]
    pub fn encode(&self, color: Rgba8) -> [f32; 4] {
        let [r, g, b, a] = color.to_f32_array();
        if self.linear {
            [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
        } else {
            [r, g, b, a]
        }
    }

    /// Queues a filled rectangle.
    ///
    /// Empty rectangles and a zero-area viewport are skipped.
    pub fn push(&mut self, rect: Rect, color: Rgba8) {
        let rect = rect.abs();
        if rect.area() <= 0.0 || self.viewport.is_zero_area() {
            return;
        }
        let color = self.encode(color);
        let (x0, y0) = self.to_clip(rect.x0, rect.y0);
        let (x1, y1) = self.to_clip(rect.x1, rect.y1);
        let v = |x, y| Vertex {
            position: [x, y],
            color,
        };
        self.vertices.extend_from_slice(&[
            v(x0, y0),
            v(x1, y0),
            v(x1, y1),
            v(x0, y0),
            v(x1, y1),
            v(x0, y1),
        ]);
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "clip-space coordinates fit comfortably in f32"
    )]
    fn to_clip(&self, x: f64, y: f64) -> (f32, f32) {
        let cx = x / self.viewport.width * 2.0 - 1.0;
        let cy = 1.0 - y / self.viewport.height * 2.0;
        (cx as f32, cy as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_maps_to_clip_space() {
        let mut batch = QuadBatch::new(Size::new(800.0, 400.0), false);
        batch.push(Rect::new(0.0, 0.0, 400.0, 200.0), Rgba8::WHITE);
        let v = batch.vertices();
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [-1.0, 1.0]);
        assert_eq!(v[2].position, [0.0, 0.0]);
        assert_eq!(v[0].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_rect_is_skipped() {
        let mut batch = QuadBatch::new(Size::new(800.0, 400.0), false);
        batch.push(Rect::new(10.0, 10.0, 10.0, 30.0), Rgba8::RED);
        assert!(batch.is_empty());
    }

    #[test]
    fn linear_surface_converts_colors() {
        let batch = QuadBatch::new(Size::new(1.0, 1.0), true);
        let [r, g, _, a] = batch.encode(Rgba8::new(255, 0, 0, 128));
        assert!((r - 1.0).abs() < 1e-6);
        assert_eq!(g, 0.0);
        assert!((a - 128.0 / 255.0).abs() < 1e-6);
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
    }
}
