// Copyright 2026 the Cadence Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive timing-schedule visualizer.
//!
//! Drag the right edge of the timer, interval, or exposure rectangle with the
//! left mouse button. Right-click inside the interval to shrink it back to a
//! single padded exposure. The window turns red while the sensor idles for
//! too much of each interval, and the title shows how many exposures per
//! interval are skipped.
//!
//! Flags:
//!
//! - `--classic`: the earlier layout preset.
//! - `--converge`: resolve each frame until the widths stop changing.
//! - `--trace`: print interaction events to stderr.
//!
//! Run with: `cargo run -p timing_sim -- [--classic] [--converge] [--trace]`

use std::sync::Arc;

use cadence_backend_wgpu::WgpuBackend;
use cadence_core::backend::Backend as _;
use cadence_core::config::ScheduleConfig;
use cadence_core::frame::FrameLoop;
use cadence_core::resolve::ResolveMode;
use cadence_core::theme::Theme;
use cadence_core::trace::Tracer;
use cadence_debug::pretty::PrettyPrintSink;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Pass cap for `--converge`.
const CONVERGE_MAX_PASSES: u32 = 8;

struct App {
    config: ScheduleConfig,
    frame_loop: FrameLoop,
    backend: Option<WgpuBackend>,
    trace: Option<PrettyPrintSink>,
}

impl App {
    fn from_args(args: impl Iterator<Item = String>) -> Self {
        let mut config = ScheduleConfig::timing_sim();
        let mut theme = Theme::timing_sim();
        let mut converge = false;
        let mut trace = None;
        for arg in args {
            match arg.as_str() {
                "--classic" => {
                    config = ScheduleConfig::classic();
                    theme = Theme::classic();
                }
                "--converge" => converge = true,
                "--trace" => trace = Some(PrettyPrintSink::stderr().with_frames(false)),
                other => eprintln!("ignoring unknown argument {other:?}"),
            }
        }
        if converge {
            config = config.with_resolve_mode(ResolveMode::Converge {
                max_passes: CONVERGE_MAX_PASSES,
            });
        }
        Self {
            frame_loop: FrameLoop::new(&config, theme),
            config,
            backend: None,
            trace,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.backend.is_some() {
            return;
        }
        let size = self.config.window_size;
        let attributes = Window::default_attributes()
            .with_title(self.config.window_title)
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("failed to create window"),
        );
        match WgpuBackend::new(Arc::clone(&window)) {
            Ok(backend) => {
                window.request_redraw();
                self.backend = Some(backend);
            }
            Err(e) => {
                eprintln!("failed to initialize GPU backend: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.handle_window_event(&event);

        if matches!(event, WindowEvent::RedrawRequested) {
            let mut tracer = match self.trace.as_mut() {
                Some(sink) => Tracer::new(sink),
                None => Tracer::none(),
            };
            self.frame_loop.step(backend, &mut tracer);
            if let Some(e) = backend.take_surface_error() {
                eprintln!("failed to acquire GPU frame: {e}");
            }
            if !backend.should_close() {
                backend.window().request_redraw();
            }
        }

        if backend.should_close() {
            event_loop.exit();
        }
    }
}

fn main() {
    let mut app = App::from_args(std::env::args().skip(1));
    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut app).expect("event loop failed");
}
