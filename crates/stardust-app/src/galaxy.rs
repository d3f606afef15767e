//! A galaxy mounted on a host surface.
//!
//! [`Galaxy`] ties together the viewport, the animation state, the pointer
//! command queue, a [`RenderBackend`] and a [`FrameScheduler`]. The host
//! forwards its events (scheduled frames, resizes, pointer movement) and
//! calls [`Galaxy::teardown`] when done; dropping the galaxy tears it down
//! as well.

use std::time::Duration;

use stardust_config::GalaxyConfig;
use stardust_field::GalaxyUniforms;
use stardust_input::{PointerEvent, PointerQueue};
use stardust_render::{BackendError, RenderBackend, Viewport};
use tracing::{debug, info, warn};

use crate::driver::{DriverState, FrameRequest, FrameScheduler};
use crate::frame::FrameState;

/// The surface a galaxy is mounted into.
pub trait HostContainer {
    /// Current size in physical pixels, or `None` if the host is gone.
    fn size(&self) -> Option<(u32, u32)>;
}

/// A host of fixed size, for headless rendering and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedContainer {
    pub width: u32,
    pub height: u32,
}

impl FixedContainer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl HostContainer for FixedContainer {
    fn size(&self) -> Option<(u32, u32)> {
        Some((self.width, self.height))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("host container is unavailable")]
    HostUnavailable,
}

pub struct Galaxy<B: RenderBackend, S: FrameScheduler> {
    config: GalaxyConfig,
    viewport: Viewport,
    frame: FrameState,
    pointer_queue: PointerQueue,
    pointer_attached: bool,
    backend: B,
    scheduler: S,
    pending: Option<FrameRequest>,
    state: DriverState,
    frames_drawn: u64,
}

impl<B: RenderBackend, S: FrameScheduler> Galaxy<B, S> {
    /// Mount onto `container`.
    ///
    /// Static configurations draw their single frame here. Animated ones
    /// request their first frame and draw when the host delivers it.
    pub fn mount(
        config: &GalaxyConfig,
        container: &dyn HostContainer,
        mut backend: B,
        scheduler: S,
    ) -> Result<Self, MountError> {
        let (width, height) = container.size().ok_or(MountError::HostUnavailable)?;
        let config = config.sanitized();

        let viewport = Viewport::new(width, height);
        backend.resize(width, height);

        let animating = !config.disable_animation;
        let pointer_attached = config.pointer_enabled();
        let mut galaxy = Self {
            viewport,
            frame: FrameState::new(),
            pointer_queue: PointerQueue::new(),
            pointer_attached,
            backend,
            pending: None,
            state: if animating {
                DriverState::Animating
            } else {
                DriverState::Static
            },
            frames_drawn: 0,
            config,
            scheduler,
        };

        info!(
            width,
            height,
            animating,
            pointer = pointer_attached,
            transparent = galaxy.config.transparent,
            "galaxy mounted"
        );

        if animating {
            galaxy.pending = Some(galaxy.scheduler.request_frame());
        } else {
            galaxy.draw_current();
        }
        Ok(galaxy)
    }

    /// Run one scheduled frame.
    ///
    /// Returns `true` if a frame was drawn. Calls without an outstanding
    /// request (static mode, after teardown, after context loss, or a
    /// spurious host callback) do nothing.
    pub fn on_frame(&mut self, delta: Duration) -> bool {
        if self.state != DriverState::Animating || self.pending.take().is_none() {
            return false;
        }

        self.frame = self.frame.advance(delta, self.pointer_queue.drain());
        let drawn = self.draw_current();

        if self.state == DriverState::Animating {
            self.pending = Some(self.scheduler.request_frame());
        }
        drawn
    }

    /// The host asked for the surface to be repainted (exposed, restored,
    /// moved between monitors).
    ///
    /// A static galaxy draws its frame again without advancing time or
    /// scheduling anything. Animated galaxies repaint on their next
    /// scheduled frame, so this returns `false` for them.
    pub fn redraw(&mut self) -> bool {
        if self.state != DriverState::Static {
            return false;
        }
        self.draw_current()
    }

    /// The host container changed size. Takes effect on the next frame.
    ///
    /// A static galaxy redraws its single frame so the resized surface is
    /// not left blank.
    pub fn resize(&mut self, width: u32, height: u32) {
        if matches!(self.state, DriverState::TornDown | DriverState::ContextLost) {
            return;
        }
        if self.viewport.handle_resize(width, height).is_none() {
            return;
        }
        self.backend.resize(width, height);
        if self.state == DriverState::Static {
            self.draw_current();
        }
    }

    /// Queue a pointer command for the next frame.
    ///
    /// Returns `false` (and drops the event) when pointer input is not
    /// attached: interaction disabled, static mode, or after teardown.
    pub fn push_pointer(&mut self, event: PointerEvent) -> bool {
        if !self.pointer_attached {
            return false;
        }
        self.pointer_queue.push(event);
        true
    }

    /// Cancel the pending frame, detach pointer input, and release the
    /// backend. Safe to call any number of times from any state.
    pub fn teardown(&mut self) {
        if self.state == DriverState::TornDown {
            return;
        }
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
        self.pointer_attached = false;
        self.pointer_queue.clear();
        self.backend.release();
        self.state = DriverState::TornDown;
        info!(frames = self.frames_drawn, "galaxy torn down");
    }

    /// The uniform snapshot the next draw would use, before any pending
    /// pointer commands are applied.
    pub fn current_uniforms(&self) -> GalaxyUniforms {
        self.frame.uniforms(
            &self.config,
            self.viewport.resolution(),
            self.state == DriverState::Animating,
        )
    }

    fn draw_current(&mut self) -> bool {
        let uniforms = self.current_uniforms();
        match self.backend.draw(&uniforms) {
            Ok(()) => {
                self.frames_drawn += 1;
                true
            }
            Err(err) => {
                self.handle_draw_error(err);
                false
            }
        }
    }

    fn handle_draw_error(&mut self, err: BackendError) {
        if err.is_recoverable() {
            debug!(%err, "frame skipped");
            return;
        }
        warn!(%err, "rendering stopped; galaxy stays mounted until teardown");
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
        self.pointer_attached = false;
        self.pointer_queue.clear();
        self.state = DriverState::ContextLost;
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn frame_state(&self) -> &FrameState {
        &self.frame
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn is_pointer_attached(&self) -> bool {
        self.pointer_attached
    }

    /// Frames successfully drawn since mount.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl<B: RenderBackend, S: FrameScheduler> Drop for Galaxy<B, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ManualScheduler;
    use stardust_render::SoftwareBackend;

    const TICK: Duration = Duration::from_millis(16);

    fn mount(config: &GalaxyConfig) -> Galaxy<SoftwareBackend, ManualScheduler> {
        Galaxy::mount(
            config,
            &FixedContainer::new(32, 18),
            SoftwareBackend::new(1, 1),
            ManualScheduler::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_mount_sizes_backend_from_container() {
        let galaxy = mount(&GalaxyConfig::default());
        assert_eq!(galaxy.backend().size(), (32, 18));
        assert_eq!(galaxy.viewport().size(), (32, 18));
    }

    #[test]
    fn test_animated_mount_requests_but_does_not_draw() {
        let galaxy = mount(&GalaxyConfig::default());
        assert_eq!(galaxy.state(), DriverState::Animating);
        assert_eq!(galaxy.backend().draw_count(), 0);
        assert!(galaxy.pending_request().is_some());
        assert_eq!(galaxy.scheduler().pending(), galaxy.pending_request());
    }

    #[test]
    fn test_each_frame_draws_and_requests_the_next() {
        let mut galaxy = mount(&GalaxyConfig::default());
        for n in 1..=5 {
            assert!(galaxy.on_frame(TICK));
            assert_eq!(galaxy.backend().draw_count(), n);
        }
        assert_eq!(galaxy.scheduler().request_count(), 6);
        assert!((galaxy.frame_state().time - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_frame_without_request_is_ignored() {
        let config = GalaxyConfig {
            disable_animation: true,
            ..GalaxyConfig::default()
        };
        let mut galaxy = mount(&config);
        assert!(!galaxy.on_frame(TICK));
        assert_eq!(galaxy.frame_state().time, 0.0);
    }

    #[test]
    fn test_host_redraw_repaints_static_frame() {
        let config = GalaxyConfig {
            disable_animation: true,
            ..GalaxyConfig::default()
        };
        let mut galaxy = mount(&config);
        let first = galaxy.backend().last_frame().unwrap().clone();

        assert!(galaxy.redraw());
        assert_eq!(galaxy.backend().draw_count(), 2);
        assert_eq!(galaxy.backend().last_frame(), Some(&first));
        assert_eq!(galaxy.scheduler().request_count(), 0);
        assert_eq!(galaxy.frame_state().time, 0.0);
    }

    #[test]
    fn test_host_redraw_leaves_animation_to_scheduler() {
        let mut galaxy = mount(&GalaxyConfig::default());
        let pending = galaxy.pending_request();
        assert!(!galaxy.redraw());
        assert_eq!(galaxy.backend().draw_count(), 0);
        assert_eq!(galaxy.pending_request(), pending);
        assert_eq!(galaxy.scheduler().request_count(), 1);
    }

    #[test]
    fn test_pointer_events_reach_next_frame() {
        let mut galaxy = mount(&GalaxyConfig::default());
        assert!(galaxy.push_pointer(PointerEvent::Moved { x: 1.0, y: 1.0 }));
        galaxy.on_frame(TICK);
        let pointer = galaxy.frame_state().pointer;
        assert_eq!(pointer.target(), glam::Vec2::ONE);
        assert!((pointer.activity() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_ignored_without_interaction() {
        let config = GalaxyConfig {
            mouse_interaction: false,
            ..GalaxyConfig::default()
        };
        let mut galaxy = mount(&config);
        assert!(!galaxy.is_pointer_attached());
        assert!(!galaxy.push_pointer(PointerEvent::Moved { x: 1.0, y: 1.0 }));
        galaxy.on_frame(TICK);
        assert_eq!(galaxy.frame_state().pointer.activity(), 0.0);
    }

    #[test]
    fn test_config_is_sanitized_at_mount() {
        let config = GalaxyConfig {
            density: -3.0,
            hue_shift: -90.0,
            ..GalaxyConfig::default()
        };
        let galaxy = mount(&config);
        assert_eq!(galaxy.config().density, 0.0);
        assert_eq!(galaxy.config().hue_shift, 270.0);
    }

    #[test]
    fn test_missing_host_fails_mount() {
        struct Detached;
        impl HostContainer for Detached {
            fn size(&self) -> Option<(u32, u32)> {
                None
            }
        }
        let result = Galaxy::mount(
            &GalaxyConfig::default(),
            &Detached,
            SoftwareBackend::new(1, 1),
            ManualScheduler::new(),
        );
        assert!(matches!(result, Err(MountError::HostUnavailable)));
    }

    #[test]
    fn test_drop_releases_backend() {
        struct CountingRelease<'a>(&'a std::cell::Cell<u32>);
        impl RenderBackend for CountingRelease<'_> {
            fn resize(&mut self, _: u32, _: u32) {}
            fn draw(&mut self, _: &GalaxyUniforms) -> Result<(), BackendError> {
                Ok(())
            }
            fn release(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let releases = std::cell::Cell::new(0);
        {
            let _galaxy = Galaxy::mount(
                &GalaxyConfig::default(),
                &FixedContainer::new(8, 8),
                CountingRelease(&releases),
                ManualScheduler::new(),
            )
            .unwrap();
        }
        assert_eq!(releases.get(), 1);
    }
}
