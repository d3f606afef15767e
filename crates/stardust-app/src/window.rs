//! Desktop host: a winit window with the galaxy mounted on its surface.
//!
//! [`StardustApp`] implements winit's [`ApplicationHandler`]. Redraw
//! requests are the frame scheduler, cursor events feed the pointer queue,
//! and closing the window tears the galaxy down before the loop exits.

use std::sync::Arc;

use stardust_config::Config;
use stardust_input::PointerTracker;
use stardust_render::{GpuBackend, SurfaceOptions};
use tracing::{error, info, instrument};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::driver::{FrameClock, FrameRequest, FrameScheduler};
use crate::galaxy::{Galaxy, HostContainer};

impl HostContainer for Window {
    fn size(&self) -> Option<(u32, u32)> {
        let size = self.inner_size();
        Some((size.width, size.height))
    }
}

/// Schedules frames by asking winit for a redraw.
///
/// winit coalesces redraw requests and has no way to withdraw one, so a
/// cancelled request may still produce a `RedrawRequested`; the galaxy
/// ignores frames it has no outstanding request for.
pub struct WindowScheduler {
    window: Arc<Window>,
    next_id: u64,
}

impl WindowScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window, next_id: 0 }
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        self.window.request_redraw();
        FrameRequest(self.next_id)
    }

    fn cancel_frame(&mut self, _request: FrameRequest) {}
}

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
        .with_transparent(config.galaxy.transparent)
}

pub struct StardustApp {
    config: Config,
    window: Option<Arc<Window>>,
    galaxy: Option<Galaxy<GpuBackend, WindowScheduler>>,
    tracker: PointerTracker,
    clock: FrameClock,
}

impl StardustApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            window: None,
            galaxy: None,
            tracker: PointerTracker::new(Default::default()),
            clock: FrameClock::new(),
        }
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) {
        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = SurfaceOptions {
            transparent: self.config.galaxy.transparent,
            vsync: self.config.window.vsync,
        };
        let backend = match GpuBackend::new(window.clone(), options) {
            Ok(backend) => backend,
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        self.tracker.resize(window.inner_size());
        self.clock.reset();
        let scheduler = WindowScheduler::new(window.clone());
        match Galaxy::mount(&self.config.galaxy, window.as_ref(), backend, scheduler) {
            Ok(galaxy) => {
                self.galaxy = Some(galaxy);
                self.window = Some(window);
            }
            Err(e) => {
                error!("Failed to mount galaxy: {e}");
                event_loop.exit();
            }
        }
    }

    fn shutdown(&mut self) {
        if let Some(mut galaxy) = self.galaxy.take() {
            galaxy.teardown();
        }
        self.window = None;
    }
}

impl ApplicationHandler for StardustApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.mount(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(galaxy) = self.galaxy.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.tracker.resize(size);
                galaxy.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                galaxy.push_pointer(self.tracker.on_cursor_moved(position));
            }
            WindowEvent::CursorLeft { .. } => {
                galaxy.push_pointer(self.tracker.on_cursor_left());
            }
            WindowEvent::RedrawRequested => {
                let delta = self.clock.tick();
                // Unscheduled redraws come from the OS; a static galaxy
                // repaints its frame for them.
                if !galaxy.on_frame(delta) {
                    galaxy.redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

/// Open the window and run until it is closed.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = StardustApp::new(config);
    event_loop.run_app(&mut app)
}
