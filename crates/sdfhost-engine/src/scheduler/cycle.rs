use std::time::Instant;

use anyhow::{Context, Result};

use crate::compute::ComputeModule;
use crate::interop::{query_section_sizes, SectionSizes};
use crate::time::{FrameClock, FrameTime};

/// GPU side of a frame cycle.
pub trait FrameTarget {
    /// Copies this frame's variable section into the variable uniform buffer.
    fn upload_variable(&mut self, bytes: &[u8]) -> Result<()>;

    /// Asks the display for the next frame callback.
    fn request_next_frame(&mut self);

    /// Encodes the four passes and submits them as one batch.
    fn submit_passes(&mut self) -> Result<()>;
}

/// Summary of one completed cycle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub index: u64,
    /// Seconds since the previous cycle, as reported to `setFps`.
    pub dt: f64,
    /// Section sizes the module declared after this frame's `compute()`.
    pub sizes: SectionSizes,
    /// Bytes copied into the variable buffer.
    pub variable_bytes: usize,
}

/// Drives the frame cycle.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    clock: FrameClock,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the timing baseline.
    ///
    /// Called immediately before the first frame is requested.
    pub fn start(&mut self) {
        self.clock.reset();
    }

    /// Runs one frame cycle.
    pub fn run_cycle(
        &mut self,
        module: &mut dyn ComputeModule,
        target: &mut dyn FrameTarget,
    ) -> Result<FrameReport> {
        let time = self.clock.tick();
        Self::cycle(time, module, target)
    }

    /// Runs one frame cycle with an explicit timestamp.
    pub fn run_cycle_at(
        &mut self,
        now: Instant,
        module: &mut dyn ComputeModule,
        target: &mut dyn FrameTarget,
    ) -> Result<FrameReport> {
        let time = self.clock.tick_at(now);
        Self::cycle(time, module, target)
    }

    /// Order: `setFps`, `compute`, size query, variable upload, next-frame request, pass
    /// submission. The next frame is requested before this frame's passes are submitted.
    fn cycle(
        time: FrameTime,
        module: &mut dyn ComputeModule,
        target: &mut dyn FrameTarget,
    ) -> Result<FrameReport> {
        let FrameTime { dt, frame_index, .. } = time;

        module.set_fps(dt).context("setFps failed")?;
        module
            .compute()
            .with_context(|| format!("compute failed on frame {frame_index}"))?;

        let sizes = query_section_sizes(module)?;
        let bytes = sizes.variable_region_bytes(module.memory())?;
        target.upload_variable(bytes)?;

        target.request_next_frame();
        target.submit_passes()?;

        log::trace!("frame {frame_index}: dt {dt:.4}s, variable {} B", bytes.len());

        Ok(FrameReport {
            index: frame_index,
            dt,
            sizes,
            variable_bytes: bytes.len(),
        })
    }
}
