use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::HostConfig;
use crate::device::{create_blocking, Gpu, SurfaceErrorAction};
use crate::host::HostContext;
use crate::input::platform::winit::translate_window_event;
use crate::input::PointerState;
use crate::interop::write_variable;
use crate::pipeline::{Orchestrator, ShaderSources};
use crate::scheduler::FrameTarget;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, builds the GPU side around an already bootstrapped host, and
    /// runs the frame loop until the window closes or a frame fails.
    ///
    /// A failure during GPU startup or inside the loop is returned after the event loop
    /// has shut down.
    pub fn run(config: HostConfig, host: HostContext, shaders: ShaderSources) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, host, shaders);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Window, surface and the resources drawn into it.
struct Presenter {
    entry: WindowEntry,
    orchestrator: Orchestrator,
    pointer: PointerState,
}

struct AppState {
    config: HostConfig,
    host: HostContext,
    shaders: ShaderSources,

    presenter: Option<Presenter>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: HostConfig, host: HostContext, shaders: ShaderSources) -> Self {
        Self {
            config,
            host,
            shaders,
            presenter: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        self.presenter = None;
        event_loop.exit();
    }

    /// Creates the window and GPU, builds the pipeline, uploads the fixed section and
    /// requests the first frame.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Presenter> {
        let framebuffer = self.host.framebuffer();

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(framebuffer.width, framebuffer.height))
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.config.gpu.clone();
        let mut entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| create_blocking(w, framebuffer, gpu_init),
        }
        .try_build()?;

        let orchestrator = entry.with_gpu(|gpu| {
            Orchestrator::new(
                gpu.device(),
                gpu.surface_format(),
                framebuffer,
                self.host.working(),
                self.host.sizes(),
                &self.shaders,
            )
        })?;

        entry.with_gpu(|gpu| self.host.upload_fixed(gpu.queue(), orchestrator.fixed_buffer()))?;

        // The granted client size may differ from the requested one.
        let inner = entry.with_window(|w| w.inner_size());
        entry.with_gpu_mut(|gpu| gpu.resize(inner));
        let pointer = PointerState::new(framebuffer, (inner.width, inner.height));

        self.host.start_frames();
        entry.with_window(|w| w.request_redraw());

        log::info!("loaded");

        Ok(Presenter {
            entry,
            orchestrator,
            pointer,
        })
    }

    fn redraw(&mut self) -> Result<()> {
        let (host, Some(presenter)) = (&mut self.host, self.presenter.as_mut()) else {
            return Ok(());
        };
        let orchestrator = &presenter.orchestrator;

        presenter.entry.with_mut(|fields| {
            let mut target = GpuTarget {
                window: fields.window,
                gpu: fields.gpu,
                orchestrator,
            };
            host.run_frame(&mut target).map(|_| ())
        })
    }

    fn window_input(&mut self, event: &WindowEvent) -> Result<()> {
        let Some(presenter) = self.presenter.as_mut() else {
            return Ok(());
        };

        if let WindowEvent::Resized(size) = event {
            presenter.entry.with_gpu_mut(|gpu| gpu.resize(*size));
        }

        if let Some(ev) = translate_window_event(&mut presenter.pointer, event) {
            self.host.handle_input(&ev)?;
        }
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() || self.failure.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => self.fail(event_loop, e.context("startup failed")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Frames are requested from inside each frame cycle.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let result = match &event {
            WindowEvent::CloseRequested => {
                log::info!(
                    "window closed ({} unsupported input events dropped)",
                    self.host.dropped_inputs()
                );
                self.presenter = None;
                event_loop.exit();
                return;
            }

            WindowEvent::RedrawRequested => self.redraw().context("frame failed"),

            _ => self.window_input(&event),
        };

        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }
}

/// Frame target backed by the window's surface.
struct GpuTarget<'a, 'w> {
    window: &'a Window,
    gpu: &'a mut Gpu<'w>,
    orchestrator: &'a Orchestrator,
}

impl FrameTarget for GpuTarget<'_, '_> {
    fn upload_variable(&mut self, bytes: &[u8]) -> Result<()> {
        write_variable(self.gpu.queue(), self.orchestrator.variable_buffer(), bytes)?;
        Ok(())
    }

    fn request_next_frame(&mut self) {
        self.window.request_redraw();
    }

    fn submit_passes(&mut self) -> Result<()> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("surface error: {err:?}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                    SurfaceErrorAction::Fatal => Err(anyhow!("unrecoverable surface error")),
                };
            }
        };

        self.orchestrator.encode(&mut frame.encoder, &frame.view);
        self.gpu.submit(frame);
        Ok(())
    }
}
