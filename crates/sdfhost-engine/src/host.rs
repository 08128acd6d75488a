//! Host context and startup sequence.
//!
//! [`HostContext`] owns everything the frame loop and the input path share: the compute
//! module, the frame dimensions, the dispatcher, the scheduler and the section sizes
//! last declared by the module.

use anyhow::{Context, Result};

use crate::compute::ComputeModule;
use crate::config::{FrameDimensions, HostConfig};
use crate::input::{Dispatch, InputDispatcher, InputEvent};
use crate::interop::{initialize_fixed_region, query_section_sizes, upload_fixed, SectionSizes};
use crate::scheduler::{FrameReport, FrameScheduler, FrameTarget};

pub struct HostContext {
    module: Box<dyn ComputeModule>,
    framebuffer: FrameDimensions,
    working: FrameDimensions,
    dispatcher: InputDispatcher,
    scheduler: FrameScheduler,
    sizes: SectionSizes,
}

impl HostContext {
    /// Runs the module's startup handshake.
    ///
    /// `setup()`, then the configuration header is written, then `bind()`, then the
    /// section sizes are queried and validated.
    pub fn bootstrap(mut module: Box<dyn ComputeModule>, config: &HostConfig) -> Result<Self> {
        let sizes = handshake(module.as_mut(), config.framebuffer, config.working)?;

        Ok(Self {
            module,
            framebuffer: config.framebuffer,
            working: config.working,
            dispatcher: InputDispatcher::new(),
            scheduler: FrameScheduler::new(),
            sizes,
        })
    }

    pub fn framebuffer(&self) -> FrameDimensions {
        self.framebuffer
    }

    pub fn working(&self) -> FrameDimensions {
        self.working
    }

    /// Section sizes from the most recent query.
    pub fn sizes(&self) -> SectionSizes {
        self.sizes
    }

    pub fn dropped_inputs(&self) -> u64 {
        self.dispatcher.dropped()
    }

    /// Copies the fixed section into its GPU buffer.
    pub fn upload_fixed(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) -> Result<()> {
        upload_fixed(queue, buffer, self.module.memory(), self.sizes)?;
        Ok(())
    }

    /// Resets frame timing; the next cycle reports the time since this call.
    pub fn start_frames(&mut self) {
        self.scheduler.start();
    }

    /// Forwards one translated input event to the module.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<Dispatch> {
        self.dispatcher
            .dispatch(self.module.as_mut(), event)
            .with_context(|| format!("input handler failed for {event}"))
    }

    /// Runs one frame cycle against `target`.
    pub fn run_frame(&mut self, target: &mut dyn FrameTarget) -> Result<FrameReport> {
        let report = self.scheduler.run_cycle(self.module.as_mut(), target)?;
        self.sizes = report.sizes;
        Ok(report)
    }
}

fn handshake(
    module: &mut dyn ComputeModule,
    framebuffer: FrameDimensions,
    working: FrameDimensions,
) -> Result<SectionSizes> {
    module.setup().context("compute module setup failed")?;

    initialize_fixed_region(module.memory_mut(), framebuffer, working)?;

    module.bind().context("compute module bind failed")?;

    let sizes = query_section_sizes(module)?;
    log::info!(
        "compute module bound: fixed {} B, variable {} B",
        sizes.fixed,
        sizes.variable
    );
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::mock::{Call, RecordingModule};
    use crate::error::HostError;

    fn header(values: [i32; 4]) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (chunk, v) in out.chunks_exact_mut(4).zip(values) {
            chunk.copy_from_slice(&v.to_le_bytes());
        }
        out
    }

    #[test]
    fn handshake_writes_header_between_setup_and_bind() {
        let mut module = RecordingModule::new(1024, 64, 128);

        let sizes = handshake(
            &mut module,
            HostConfig::DEFAULT_FRAMEBUFFER,
            HostConfig::DEFAULT_WORKING,
        )
        .unwrap();

        assert_eq!(
            module.entry_calls(),
            vec![
                Call::Setup,
                Call::Bind {
                    header: header([640, 360, 160, 90])
                }
            ]
        );
        assert_eq!(sizes, SectionSizes { fixed: 64, variable: 128 });
    }

    #[test]
    fn handshake_queries_sizes_after_bind() {
        let mut module = RecordingModule::new(1024, 64, 128);
        handshake(
            &mut module,
            FrameDimensions::new(320, 200),
            FrameDimensions::new(80, 50),
        )
        .unwrap();

        let bind_at = module
            .calls
            .iter()
            .position(|c| matches!(c, Call::Bind { .. }))
            .unwrap();
        let query_at = module
            .calls
            .iter()
            .position(|c| *c == Call::FixedDataSize)
            .unwrap();
        assert!(bind_at < query_at);
        assert_eq!(&module.memory[..16], &header([320, 200, 80, 50]));
    }

    #[test]
    fn memory_too_small_for_header_fails_before_bind() {
        let mut module = RecordingModule::new(8, 16, 4);
        let err = handshake(
            &mut module,
            HostConfig::DEFAULT_FRAMEBUFFER,
            HostConfig::DEFAULT_WORKING,
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<HostError>(),
            Some(HostError::HeaderOutOfBounds { len: 8 })
        ));
        assert_eq!(module.entry_calls(), vec![Call::Setup]);
    }

    #[test]
    fn bootstrap_rejects_layout_that_does_not_fit() {
        let module = Box::new(RecordingModule::new(256, 128, 256));
        let err = HostContext::bootstrap(module, &HostConfig::default())
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<HostError>(),
            Some(HostError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn context_routes_input_and_frames() {
        struct NullTarget;
        impl FrameTarget for NullTarget {
            fn upload_variable(&mut self, _bytes: &[u8]) -> Result<()> {
                Ok(())
            }
            fn request_next_frame(&mut self) {}
            fn submit_passes(&mut self) -> Result<()> {
                Ok(())
            }
        }

        let module = Box::new(RecordingModule::new(1024, 64, 128));
        let mut host = HostContext::bootstrap(module, &HostConfig::default()).unwrap();
        host.start_frames();

        assert_eq!(
            host.handle_input(&InputEvent::KeyDown("a".into())).unwrap(),
            Dispatch::Forwarded
        );
        assert_eq!(
            host.handle_input(&InputEvent::KeyDown("F1".into())).unwrap(),
            Dispatch::Dropped
        );
        assert_eq!(host.dropped_inputs(), 1);

        let first = host.run_frame(&mut NullTarget).unwrap();
        let second = host.run_frame(&mut NullTarget).unwrap();
        assert_eq!((first.index, second.index), (0, 1));
        assert_eq!(host.sizes(), SectionSizes { fixed: 64, variable: 128 });
    }
}
