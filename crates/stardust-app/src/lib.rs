//! Stardust application framework.
//!
//! Mounts a galaxy on a host surface, drives its animation from scheduled
//! frames, and tears it down. The winit host and the headless snapshot
//! path both build on [`Galaxy`].

pub mod driver;
pub mod frame;
pub mod galaxy;
pub mod platform;
pub mod snapshot;
pub mod window;

pub use driver::{DriverState, FrameClock, FrameRequest, FrameScheduler, ManualScheduler};
pub use frame::FrameState;
pub use galaxy::{FixedContainer, Galaxy, HostContainer, MountError};
pub use snapshot::{SnapshotError, render_snapshot, write_png};
