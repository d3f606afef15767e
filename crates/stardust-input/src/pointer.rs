//! Smoothed pointer tracking.
//!
//! Window callbacks never touch the smoothed values directly. They push
//! [`PointerEvent`]s into a [`PointerQueue`]; the animation tick drains the
//! queue into [`PointerState`] and then takes exactly one smoothing step.

use std::collections::VecDeque;

use glam::Vec2;
use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Fraction of the remaining distance to the target covered per tick.
///
/// Applied once per tick regardless of tick duration.
pub const SMOOTHING_FACTOR: f32 = 0.05;

/// Initial pointer position: the middle of the surface.
pub const DEFAULT_POINTER_POSITION: Vec2 = Vec2::splat(0.5);

/// A pointer command, in unit surface coordinates with y pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved over the surface.
    Moved { x: f32, y: f32 },
    /// The pointer left the surface.
    Left,
}

/// FIFO of pointer commands accumulated between ticks.
#[derive(Debug, Clone, Default)]
pub struct PointerQueue {
    events: VecDeque<PointerEvent>,
}

impl PointerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.events.push_back(event);
    }

    /// Remove and return every queued event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = PointerEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Target and smoothed pointer position and activity.
///
/// Position is in unit surface coordinates, activity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    target: Vec2,
    smoothed: Vec2,
    target_activity: f32,
    smoothed_activity: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    /// Centered pointer with zero activity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: DEFAULT_POINTER_POSITION,
            smoothed: DEFAULT_POINTER_POSITION,
            target_activity: 0.0,
            smoothed_activity: 0.0,
        }
    }

    /// Update targets from one command. Smoothed values are untouched.
    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved { x, y } => {
                self.target = Vec2::new(x, y);
                self.target_activity = 1.0;
            }
            PointerEvent::Left => {
                // Position keeps its last target; only activity fades.
                self.target_activity = 0.0;
            }
        }
    }

    /// Apply every command in order.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = PointerEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// One exponential smoothing step toward the targets.
    pub fn step(&mut self) {
        self.smoothed += (self.target - self.smoothed) * SMOOTHING_FACTOR;
        self.smoothed_activity +=
            (self.target_activity - self.smoothed_activity) * SMOOTHING_FACTOR;
        self.smoothed_activity = self.smoothed_activity.max(0.0);
    }

    /// Step-advanced copy; `self` is left as it was.
    #[must_use]
    pub fn stepped(mut self) -> Self {
        self.step();
        self
    }

    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.smoothed
    }

    #[must_use]
    pub fn target_activity(&self) -> f32 {
        self.target_activity
    }

    #[must_use]
    pub fn activity(&self) -> f32 {
        self.smoothed_activity
    }
}

/// Converts window cursor events into [`PointerEvent`]s.
///
/// Tracks the surface size so physical cursor pixels can be normalized.
/// The surface is treated as at least one pixel in each direction.
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    size: PhysicalSize<u32>,
}

impl PointerTracker {
    #[must_use]
    pub fn new(size: PhysicalSize<u32>) -> Self {
        Self { size }
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
    }

    /// Normalize a `CursorMoved` position, flipping y so it points up.
    #[must_use]
    pub fn on_cursor_moved(&self, position: PhysicalPosition<f64>) -> PointerEvent {
        let width = f64::from(self.size.width.max(1));
        let height = f64::from(self.size.height.max(1));
        let x = (position.x / width) as f32;
        let y = (1.0 - position.y / height) as f32;
        tracing::trace!(x, y, "pointer moved");
        PointerEvent::Moved { x, y }
    }

    #[must_use]
    pub fn on_cursor_left(&self) -> PointerEvent {
        tracing::trace!("pointer left surface");
        PointerEvent::Left
    }
}
