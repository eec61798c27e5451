//! Platform layer: window, event loop, input and asset workers.
//!
//! The GPU state and the scene are created on the first `resumed`. Model
//! loading runs on worker threads whose results come back as user events;
//! redraws are only requested by the frame loop once it has been started.

pub mod loader;
pub mod model;
pub mod session;
pub mod setup;

#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use corelib::Vec2;
use corelib::frame::{FrameScheduler, OutputSurface, TickError};
use renderer::GpuState;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::loader::AppEvent;
use crate::session::{LoadOutcome, Session};
use crate::setup::{AssetPaths, build_scene};

/// Pixels of trackpad scroll per wheel notch.
const PIXELS_PER_NOTCH: f32 = 50.0;

#[derive(Clone, Debug)]
pub struct Config {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub asset_root: PathBuf,
    /// Start animating even if the model never arrives.
    pub animate_without_model: bool,
}

/// Opens the window and runs until it is closed.
pub fn run(config: Config) -> Result<()> {
    let event_loop = EventLoop::<AppEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, event_loop.create_proxy());
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Routes frame requests to the window's redraw queue.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&self) {
        self.0.request_redraw();
    }
}

struct Running {
    window: Arc<Window>,
    gpu: GpuState,
    session: Session,
}

#[derive(Default)]
struct Pointer {
    last: Option<PhysicalPosition<f64>>,
    rotating: bool,
    panning: bool,
}

struct App {
    config: Config,
    proxy: EventLoopProxy<AppEvent>,
    started: Instant,
    running: Option<Running>,
    pointer: Pointer,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, proxy: EventLoopProxy<AppEvent>) -> Self {
        Self {
            config,
            proxy,
            started: Instant::now(),
            running: None,
            pointer: Pointer::default(),
            fatal: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let attrs = Window::default_attributes()
            .with_title("catscene")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("Failed to create window")?,
        );
        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let mut gpu = pollster::block_on(GpuState::new(window.clone(), self.config.backends))?;
        let (width, height) = gpu.backing_size();
        let paths = AssetPaths::new(&self.config.asset_root);
        let state = build_scene(&mut gpu, &paths, width as f32 / height as f32)?;

        let session = Session::new(
            state,
            paths.model_request(),
            self.config.animate_without_model,
        );
        loader::dispatch(session.first_step(), &self.proxy);

        Ok(Running {
            window,
            gpu,
            session,
        })
    }

    fn redraw(&mut self) {
        let Some(Running {
            window,
            gpu,
            session,
        }) = self.running.as_mut()
        else {
            return;
        };
        let t = self.started.elapsed().as_secs_f32();
        match session.frame(gpu, &RedrawScheduler(window), t) {
            Ok(()) => {}
            // Window-system redraws before the model is in, or after the
            // chain has ended.
            Err(TickError::NotRunning | TickError::Stopped) => {}
            Err(e) => log::error!("Frame loop stopped after {} frames: {e}", session.frames()),
        }
    }

    fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        let last = self.pointer.last.replace(position);
        let (Some(last), Some(running)) = (last, self.running.as_mut()) else {
            return;
        };
        let delta = Vec2::new((position.x - last.x) as f32, (position.y - last.y) as f32);
        let height = running.window.inner_size().height as f32;
        if self.pointer.rotating {
            running.session.orbit(delta, height);
        } else if self.pointer.panning {
            running.session.pan(delta, height);
        }
    }

    fn scrolled(&mut self, delta: MouseScrollDelta) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_NOTCH,
        };
        running.session.dolly(notches);
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                log::error!("Startup failed: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        let Some(running) = self.running.as_mut() else {
            log::warn!("Load result arrived before the window existed; dropped");
            return;
        };
        let scheduler = RedrawScheduler(&running.window);
        let outcome = match event {
            AppEvent::Materials(result) => running.session.on_materials(result, &scheduler),
            AppEvent::Geometry(result) => {
                running
                    .session
                    .on_geometry(result, &mut running.gpu, &scheduler)
            }
        };
        match outcome {
            LoadOutcome::Next(step) => loader::dispatch(step, &self.proxy),
            LoadOutcome::Attached(id) => log::info!("Model attached as {id:?}; animation started"),
            LoadOutcome::Stalled => {}
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(running) = &self.running {
                    log::info!("Close requested after {} frames", running.session.frames());
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::Resized(size) => {
                // The next tick picks the new size up; a restored window
                // restarts a chain the minimize suspended.
                log::debug!("Resized: {}x{}", size.width, size.height);
                if let Some(running) = &self.running {
                    let scheduler = RedrawScheduler(&running.window);
                    running
                        .session
                        .resume_after_resize(size.width, size.height, &scheduler);
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.pointer_moved(position),
            WindowEvent::CursorLeft { .. } => self.pointer.last = None,
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.pointer.rotating = pressed,
                    MouseButton::Right => self.pointer.panning = pressed,
                    _ => {}
                }
            }
            WindowEvent::MouseWheel { delta, .. } => self.scrolled(delta),
            _ => {}
        }
    }
}
