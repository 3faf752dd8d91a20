//! Windowed viewer.
//!
//! The winit event loop is the scheduler's host: every `RedrawRequested` is a
//! refresh opportunity and runs exactly one tick. Closing the window stops the
//! scheduler before the loop exits.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::RainOptions;
use crate::error::SimulationError;
use crate::gpu::SpriteRenderer;
use crate::particle::Viewport;
use crate::scheduler::Scheduler;
use crate::textures::SpriteTexture;

fn viewport_of(size: PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width as f32, size.height as f32)
}

/// Open a window and rain until it is closed.
pub fn run(options: RainOptions) -> Result<(), SimulationError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    options: RainOptions,
    window: Option<Arc<Window>>,
    renderer: Option<SpriteRenderer>,
    scheduler: Option<Scheduler>,
    error: Option<SimulationError>,
}

impl App {
    fn new(options: RainOptions) -> Self {
        Self {
            options,
            window: None,
            renderer: None,
            scheduler: None,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.options.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.window.width,
                self.options.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let viewport = viewport_of(window.inner_size());

        let config = self.options.resolve();
        log::info!(
            "Starting rain: {} image(s), gravity {}, {:.0}x{:.0} viewport",
            config.count,
            config.gravity,
            viewport.width,
            viewport.height,
        );

        let sprite = SpriteTexture::load_or_placeholder(self.options.src.as_deref());
        let renderer = pollster::block_on(SpriteRenderer::new(
            window.clone(),
            &sprite,
            config.count as usize,
        ))?;

        self.scheduler = Some(Scheduler::new(config, viewport));
        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scheduler) = &self.scheduler {
            scheduler.stop();
        }
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer), Some(scheduler)) =
            (&self.window, &mut self.renderer, &mut self.scheduler)
        else {
            return;
        };

        let viewport = viewport_of(window.inner_size());
        let Some(snapshot) = scheduler.frame(Instant::now(), viewport) else {
            // Minimized: keep polling until there is area to draw into again
            if !scheduler.is_stopped() {
                window.request_redraw();
            }
            return;
        };
        renderer.upload(&snapshot);

        let fatal = match renderer.render() {
            Ok(_) => false,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost; reconfiguring");
                renderer.resize(window.inner_size());
                false
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; exiting");
                true
            }
            Err(e) => {
                log::error!("Render error: {:?}", e);
                false
            }
        };

        if fatal {
            self.shutdown(event_loop);
        } else {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { .. } => {
                if let Some(scheduler) = &mut self.scheduler {
                    scheduler.sampler_mut().handle_event(&event, Instant::now());
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
