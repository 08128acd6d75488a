//! Time subsystem.
//!
//! Provides testable frame timing without coupling to the runtime:
//! call `tick()` once per frame cycle to obtain `FrameTime`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
