//! Pointer input for the star field: event commands, the smoothed pointer
//! state the animation driver steps each tick, and conversion from window
//! cursor events.

pub mod pointer;

pub use pointer::{
    DEFAULT_POINTER_POSITION, PointerEvent, PointerQueue, PointerState, PointerTracker,
    SMOOTHING_FACTOR,
};
