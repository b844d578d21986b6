// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`winit`] + [`wgpu`] implementation of the cadence
//! [`Backend`](cadence_core::backend::Backend) contract.
//!
//! [`WgpuBackend`] owns the wgpu surface for one window. The host application
//! owns the winit event loop: it forwards window events through
//! [`WgpuBackend::handle_window_event`] and calls
//! [`FrameLoop::step`](cadence_core::frame::FrameLoop::step) on each
//! `RedrawRequested`.
//!
//! Everything is drawn as solid-color triangles from one pipeline: fills,
//! one-pixel outlines (via the trait's default `stroke_rect`), and text from a
//! built-in 5×7 bitmap [`font`]. Colors are linearized when the surface format
//! is sRGB so that the palette matches the 8-bit values on screen.
//!
//! Surface loss is handled by reconfiguring and skipping the frame. Any other
//! acquisition failure is kept for the host to report through
//! [`WgpuBackend::take_surface_error`].

mod error;
pub mod font;
mod input;
mod quad;

use std::sync::Arc;

use cadence_core::backend::Backend;
use cadence_core::color::Rgba8;
use cadence_core::pointer::PointerButton;
use kurbo::{Point, Rect, Size};
use winit::dpi::PhysicalSize;
use winit::event::{MouseButton, WindowEvent};
use winit::window::Window;

pub use error::BackendError;
pub use input::PointerTracker;
pub use quad::{QuadBatch, Vertex, srgb_to_linear};

const SHADER: &str = include_str!("shader.wgsl");

/// Initial vertex buffer capacity in bytes.
const INITIAL_VERTEX_BYTES: u64 = 64 * 1024;

/// Draws the visualizer into a winit window with wgpu.
pub struct WgpuBackend {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    batch: QuadBatch,
    glyphs: Vec<Rect>,
    clear_color: [f32; 4],
    scale_factor: f64,
    pointer: PointerTracker,
    close_requested: bool,
    surface_error: Option<wgpu::SurfaceError>,
}

impl core::fmt::Debug for WgpuBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WgpuBackend")
            .field("format", &self.config.format)
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .field("scale_factor", &self.scale_factor)
            .field("pointer", &self.pointer)
            .field("close_requested", &self.close_requested)
            .finish_non_exhaustive()
    }
}

impl WgpuBackend {
    /// Creates a surface, device, and pipeline for `window`.
    ///
    /// Blocks on adapter and device negotiation.
    pub fn new(window: Arc<Window>) -> Result<Self, BackendError> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            compatible_surface: Some(&surface),
            ..Default::default()
        }))
        .ok_or(BackendError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cadence"),
                ..Default::default()
            },
            None,
        ))?;

        let size = window.inner_size();
        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(BackendError::UnsupportedSurface)?;
        surface.configure(&device, &config);

        let pipeline = create_pipeline(&device, config.format);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_BYTES);

        let scale_factor = window.scale_factor();
        let viewport = logical_size(size, scale_factor);
        Ok(Self {
            batch: QuadBatch::new(viewport, config.format.is_srgb()),
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            glyphs: Vec::new(),
            clear_color: [1.0; 4],
            scale_factor,
            pointer: PointerTracker::new(),
            close_requested: false,
            surface_error: None,
        })
    }

    /// The window this backend draws into.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Feeds a window event into the backend's input and surface state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::Resized(size) => self.resize(*size),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                self.resize(self.window.inner_size());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.scale_factor);
                self.pointer.cursor_moved(Point::new(logical.x, logical.y));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return,
                };
                self.pointer.button(button, state.is_pressed());
            }
            _ => {}
        }
    }

    /// Reconfigures the surface for a new physical size.
    ///
    /// A zero-sized window (minimized) keeps the previous configuration.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.batch
            .set_viewport(logical_size(size, self.scale_factor));
    }

    /// Returns and clears the last unrecoverable frame-acquisition error.
    pub fn take_surface_error(&mut self) -> Option<wgpu::SurfaceError> {
        self.surface_error.take()
    }

    fn upload(&mut self) -> u32 {
        let bytes: &[u8] = bytemuck::cast_slice(self.batch.vertices());
        let needed = bytes.len() as u64;
        if needed > self.vertex_buffer.size() {
            self.vertex_buffer = create_vertex_buffer(&self.device, needed.next_power_of_two());
        }
        if needed > 0 {
            self.queue.write_buffer(&self.vertex_buffer, 0, bytes);
        }
        u32::try_from(self.batch.vertices().len()).unwrap_or(u32::MAX)
    }

    fn present(&mut self, frame: wgpu::SurfaceTexture) {
        let vertex_count = self.upload();
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("cadence frame"),
            });
        {
            let [r, g, b, a] = self.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cadence"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: f64::from(a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if vertex_count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..vertex_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
    }
}

impl Backend for WgpuBackend {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn begin_frame(&mut self) {
        self.batch.clear();
    }

    fn end_frame(&mut self) {
        self.pointer.end_frame();
        match self.surface.get_current_texture() {
            Ok(frame) => self.present(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
            }
            Err(e) => self.surface_error = Some(e),
        }
    }

    fn clear(&mut self, color: Rgba8) {
        self.batch.clear();
        self.clear_color = self.batch.encode(color);
    }

    fn pointer_position(&self) -> Point {
        self.pointer.position()
    }

    fn button_pressed(&self, button: PointerButton) -> bool {
        self.pointer.pressed(button)
    }

    fn button_held(&self, button: PointerButton) -> bool {
        self.pointer.held(button)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.batch.push(rect, color);
    }

    fn measure_text(&self, text: &str, size: f64) -> f64 {
        font::measure(text, size)
    }

    fn draw_text(&mut self, text: &str, origin: Point, size: f64, color: Rgba8) {
        self.glyphs.clear();
        font::glyph_rects(text, origin, size, &mut self.glyphs);
        for &rect in &self.glyphs {
            self.batch.push(rect, color);
        }
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> Size {
    let logical = size.to_logical::<f64>(scale_factor);
    Size::new(logical.width, logical.height)
}

fn create_vertex_buffer(device: &wgpu::Device, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("cadence quads"),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("cadence quads"),
        source: wgpu::ShaderSource::Wgsl(SHADER.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("cadence quads"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("cadence quads"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
