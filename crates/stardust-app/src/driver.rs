//! Frame scheduling for the animation driver.
//!
//! The driver never owns a loop. It asks a [`FrameScheduler`] for the next
//! frame and the host calls back when that frame is due, passing the time
//! elapsed since the previous one. Tests use [`ManualScheduler`] and feed
//! simulated deltas directly.

use std::time::{Duration, Instant};

use tracing::trace;

/// Handle for one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Source of animation frames (a display's refresh callback, a window
/// redraw request, a test harness).
pub trait FrameScheduler {
    /// Ask for one more frame.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request made earlier. Unknown or stale handles are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Lifecycle of a mounted galaxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// A frame is requested after every drawn frame.
    Animating,
    /// Drawn once at mount; no frames are ever requested.
    Static,
    /// The backend lost its graphics context. Nothing is scheduled; only
    /// teardown remains.
    ContextLost,
    /// Resources released. Terminal.
    TornDown,
}

/// Scheduler that only records requests; the caller decides when frames run.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameRequest>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request that has not yet been cancelled, if any.
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Total frames requested so far.
    pub fn request_count(&self) -> u64 {
        self.requested
    }

    /// Total requests withdrawn so far.
    pub fn cancel_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        self.requested += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

/// Wall-clock frame timer.
///
/// Each [`tick`](Self::tick) returns the time since the previous tick (or
/// since construction for the first one). Deltas are not clamped: a long
/// stall shows up as one large time step.
#[derive(Debug)]
pub struct FrameClock {
    previous: Instant,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.duration_since(self.previous);
        self.previous = now;
        self.frame_count += 1;
        trace!(frame = self.frame_count, delta_ms = delta.as_secs_f64() * 1000.0, "frame tick");
        delta
    }

    /// Restart timing from now, e.g. after a remount.
    pub fn reset(&mut self) {
        self.previous = Instant::now();
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
