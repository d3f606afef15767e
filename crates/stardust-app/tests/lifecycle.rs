//! Mount, animate, resize, and tear down a galaxy through the public API.

use std::collections::VecDeque;
use std::time::Duration;

use stardust_app::{
    DriverState, FixedContainer, FrameScheduler, Galaxy, ManualScheduler, render_snapshot,
    write_png,
};
use stardust_config::{Config, GalaxyConfig};
use stardust_field::GalaxyUniforms;
use stardust_input::PointerEvent;
use stardust_render::{BackendError, RenderBackend, SoftwareBackend};

const TICK: Duration = Duration::from_millis(16);

fn mount_software(
    config: &GalaxyConfig,
    width: u32,
    height: u32,
) -> Galaxy<SoftwareBackend, ManualScheduler> {
    Galaxy::mount(
        config,
        &FixedContainer::new(width, height),
        SoftwareBackend::new(0, 0),
        ManualScheduler::new(),
    )
    .unwrap()
}

fn static_config() -> GalaxyConfig {
    GalaxyConfig {
        disable_animation: true,
        ..GalaxyConfig::default()
    }
}

/// Backend that fails draws with a scripted sequence of errors, then
/// succeeds.
#[derive(Default)]
struct ScriptedBackend {
    failures: VecDeque<BackendError>,
    draws: u32,
    releases: u32,
    last: Option<GalaxyUniforms>,
}

impl ScriptedBackend {
    fn failing_with(errors: impl IntoIterator<Item = BackendError>) -> Self {
        Self {
            failures: errors.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl RenderBackend for ScriptedBackend {
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn draw(&mut self, uniforms: &GalaxyUniforms) -> Result<(), BackendError> {
        if let Some(err) = self.failures.pop_front() {
            return Err(err);
        }
        self.draws += 1;
        self.last = Some(*uniforms);
        Ok(())
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

#[test]
fn static_galaxy_draws_exactly_once() {
    let mut galaxy = mount_software(&static_config(), 40, 20);
    assert_eq!(galaxy.state(), DriverState::Static);
    assert_eq!(galaxy.backend().draw_count(), 1);
    assert_eq!(galaxy.scheduler().request_count(), 0);

    for _ in 0..10 {
        assert!(!galaxy.on_frame(TICK));
    }
    assert_eq!(galaxy.backend().draw_count(), 1);
    assert!(!galaxy.is_pointer_attached());
}

#[test]
fn static_galaxy_redraws_on_resize_only_when_size_changes() {
    let mut galaxy = mount_software(&static_config(), 40, 20);
    galaxy.resize(40, 20);
    assert_eq!(galaxy.backend().draw_count(), 1);

    galaxy.resize(80, 20);
    assert_eq!(galaxy.backend().draw_count(), 2);
    let frame = galaxy.backend().last_frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (80, 20));
}

#[test]
fn static_galaxy_repaints_on_host_redraw_until_torn_down() {
    let mut galaxy = mount_software(&static_config(), 40, 20);
    // The host's redraw path: the scheduled frame is refused, so repaint.
    if !galaxy.on_frame(TICK) {
        assert!(galaxy.redraw());
    }
    assert_eq!(galaxy.backend().draw_count(), 2);
    assert_eq!(galaxy.scheduler().request_count(), 0);

    galaxy.teardown();
    assert!(!galaxy.redraw());
    assert_eq!(galaxy.backend().draw_count(), 2);
}

#[test]
fn animated_galaxy_advances_time_and_keeps_scheduling() {
    let mut galaxy = mount_software(&GalaxyConfig::default(), 32, 32);
    assert_eq!(galaxy.backend().draw_count(), 0);

    for _ in 0..60 {
        assert!(galaxy.on_frame(TICK));
    }
    assert_eq!(galaxy.backend().draw_count(), 60);
    assert!((galaxy.frame_state().time - 0.96).abs() < 1e-9);
    assert_eq!(galaxy.scheduler().pending(), galaxy.pending_request());
    assert!(galaxy.pending_request().is_some());
}

#[test]
fn animated_frames_change_over_time() {
    let config = GalaxyConfig {
        density: 6.0,
        ..GalaxyConfig::default()
    };
    let mut galaxy = mount_software(&config, 48, 48);
    galaxy.on_frame(TICK);
    let first = galaxy.backend().last_frame().unwrap().clone();
    galaxy.on_frame(Duration::from_secs(2));
    let later = galaxy.backend().last_frame().unwrap();
    assert_ne!(&first, later);
}

#[test]
fn resize_takes_effect_on_next_frame() {
    let mut galaxy = mount_software(&GalaxyConfig::default(), 30, 30);
    galaxy.on_frame(TICK);
    galaxy.resize(60, 15);
    assert_eq!(galaxy.current_uniforms().resolution.aspect, 4.0);

    galaxy.on_frame(TICK);
    let frame = galaxy.backend().last_frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (60, 15));
}

#[test]
fn zero_size_host_produces_finite_uniforms() {
    let mut galaxy = mount_software(&GalaxyConfig::default(), 0, 0);
    assert!(galaxy.on_frame(TICK));
    let uniforms = galaxy.current_uniforms();
    assert!(uniforms.resolution.aspect.is_finite());
    assert!(uniforms.resolution.aspect > 0.0);

    galaxy.resize(100, 0);
    assert!(galaxy.current_uniforms().resolution.aspect.is_finite());
}

#[test]
fn pointer_leave_decays_activity() {
    let mut galaxy = mount_software(&GalaxyConfig::default(), 16, 16);
    galaxy.push_pointer(PointerEvent::Moved { x: 0.8, y: 0.2 });
    for _ in 0..100 {
        galaxy.on_frame(TICK);
    }
    let engaged = galaxy.frame_state().pointer.activity();
    assert!(engaged > 0.99);

    galaxy.push_pointer(PointerEvent::Left);
    galaxy.on_frame(TICK);
    let pointer = galaxy.frame_state().pointer;
    assert!(pointer.activity() < engaged);
    assert_eq!(pointer.target(), glam::Vec2::new(0.8, 0.2));
}

#[test]
fn teardown_is_idempotent_and_stops_everything() {
    let mut galaxy = mount_software(&GalaxyConfig::default(), 16, 16);
    galaxy.on_frame(TICK);

    galaxy.teardown();
    galaxy.teardown();

    assert_eq!(galaxy.state(), DriverState::TornDown);
    assert_eq!(galaxy.backend().release_count(), 1);
    assert_eq!(galaxy.scheduler().cancel_count(), 1);
    assert_eq!(galaxy.scheduler().pending(), None);
    assert!(!galaxy.is_pointer_attached());
    assert!(!galaxy.push_pointer(PointerEvent::Left));
    assert!(!galaxy.on_frame(TICK));
    galaxy.resize(64, 64);
    assert_eq!(galaxy.backend().draw_count(), 1);
}

#[test]
fn teardown_of_static_galaxy_cancels_nothing() {
    let mut galaxy = mount_software(&static_config(), 16, 16);
    galaxy.teardown();
    assert_eq!(galaxy.scheduler().cancel_count(), 0);
    assert!(galaxy.backend().is_released());
}

#[test]
fn context_loss_stops_scheduling_but_teardown_still_releases() {
    let mut galaxy = Galaxy::mount(
        &GalaxyConfig::default(),
        &FixedContainer::new(16, 16),
        ScriptedBackend::failing_with([BackendError::ContextLost]),
        ManualScheduler::new(),
    )
    .unwrap();

    assert!(!galaxy.on_frame(TICK));
    assert_eq!(galaxy.state(), DriverState::ContextLost);
    assert_eq!(galaxy.pending_request(), None);
    assert!(!galaxy.is_pointer_attached());
    assert!(!galaxy.on_frame(TICK));
    assert_eq!(galaxy.backend().draws, 0);

    galaxy.teardown();
    assert_eq!(galaxy.state(), DriverState::TornDown);
    assert_eq!(galaxy.backend().releases, 1);
}

#[test]
fn timeout_skips_a_frame_and_keeps_animating() {
    let mut galaxy = Galaxy::mount(
        &GalaxyConfig::default(),
        &FixedContainer::new(16, 16),
        ScriptedBackend::failing_with([BackendError::Timeout, BackendError::Timeout]),
        ManualScheduler::new(),
    )
    .unwrap();

    assert!(!galaxy.on_frame(TICK));
    assert!(!galaxy.on_frame(TICK));
    assert!(galaxy.on_frame(TICK));
    assert_eq!(galaxy.state(), DriverState::Animating);
    assert_eq!(galaxy.backend().draws, 1);
    assert_eq!(galaxy.frames_drawn(), 1);
    let drawn = galaxy.backend().last.unwrap();
    assert!((drawn.time - 0.048).abs() < 1e-6);
}

#[test]
fn static_mount_on_lost_context_is_not_fatal() {
    let mut galaxy = Galaxy::mount(
        &static_config(),
        &FixedContainer::new(16, 16),
        ScriptedBackend::failing_with([BackendError::OutOfMemory]),
        ManualScheduler::new(),
    )
    .unwrap();
    assert_eq!(galaxy.state(), DriverState::ContextLost);
    galaxy.resize(32, 32);
    assert_eq!(galaxy.backend().draws, 0);
}

#[test]
fn custom_scheduler_sees_every_request() {
    struct Counting(u64);
    impl FrameScheduler for Counting {
        fn request_frame(&mut self) -> stardust_app::FrameRequest {
            self.0 += 1;
            stardust_app::FrameRequest(self.0)
        }
        fn cancel_frame(&mut self, _: stardust_app::FrameRequest) {}
    }

    let mut galaxy = Galaxy::mount(
        &GalaxyConfig::default(),
        &FixedContainer::new(8, 8),
        SoftwareBackend::new(0, 0),
        Counting(0),
    )
    .unwrap();
    for _ in 0..4 {
        galaxy.on_frame(TICK);
    }
    assert_eq!(galaxy.scheduler().0, 5);
}

#[test]
fn snapshot_writes_png_at_window_size() {
    let mut config = Config::default();
    config.window.width = 64;
    config.window.height = 36;
    config.galaxy.transparent = false;

    let frame = render_snapshot(&config, 5.0).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("galaxy.png");
    write_png(&path, &frame).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    // Opaque output: every pixel's alpha byte is 255.
    assert!(frame.to_rgba8().chunks_exact(4).all(|px| px[3] == 255));
}
