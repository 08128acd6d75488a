//! Per-frame cycle.
//!
//! The scheduler owns frame timing and the order of operations inside one frame. GPU
//! work goes through [`FrameTarget`] so the cycle runs unchanged against a recording
//! target in tests.

mod cycle;

pub use cycle::{FrameReport, FrameScheduler, FrameTarget};
