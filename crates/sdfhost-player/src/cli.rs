use std::path::PathBuf;

use clap::Parser;
use sdfhost_engine::logging::LoggingConfig;
use sdfhost_engine::pipeline::PassKind;
use sdfhost_engine::{FrameDimensions, HostConfig};

#[derive(Parser, Debug)]
#[command(
    name = "sdfhost",
    version,
    about = "Run a WebAssembly compute module through the four-pass SDF renderer"
)]
pub struct Cli {
    /// Compiled compute module (`.wasm`).
    #[arg(value_name = "MODULE", env = "SDFHOST_MODULE")]
    pub module: PathBuf,

    /// Directory holding sdf.wgsl, sdf_shadow.wgsl, raster.wgsl and composite.wgsl.
    #[arg(long, value_name = "DIR", env = "SDFHOST_SHADERS", default_value = "shaders")]
    pub shaders: PathBuf,

    /// Override the distance-field shader path.
    #[arg(long, value_name = "FILE")]
    pub sdf_shader: Option<PathBuf>,

    /// Override the distance-field shadow shader path.
    #[arg(long, value_name = "FILE")]
    pub sdf_shadow_shader: Option<PathBuf>,

    /// Override the raster shader path.
    #[arg(long, value_name = "FILE")]
    pub raster_shader: Option<PathBuf>,

    /// Override the composite shader path.
    #[arg(long, value_name = "FILE")]
    pub composite_shader: Option<PathBuf>,

    /// Framebuffer and window size.
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value_t = HostConfig::DEFAULT_FRAMEBUFFER)]
    pub size: FrameDimensions,

    /// Resolution of the distance-field and shadow textures.
    #[arg(long, value_name = "WIDTHxHEIGHT", default_value_t = HostConfig::DEFAULT_WORKING)]
    pub working_size: FrameDimensions,

    /// Shared memory size in 64 KiB pages.
    #[arg(long, value_name = "PAGES", default_value_t = HostConfig::DEFAULT_MEMORY_PAGES)]
    pub memory_pages: u32,

    /// Window title.
    #[arg(long, default_value = "sdfhost")]
    pub title: String,

    /// Prefer an sRGB swapchain format.
    #[arg(long)]
    pub srgb: bool,

    /// Log filter in `env_logger` syntax; falls back to `RUST_LOG`.
    #[arg(long, value_name = "FILTER", env = "SDFHOST_LOG")]
    pub log: Option<String>,
}

impl Cli {
    pub fn host_config(&self) -> HostConfig {
        let mut config = HostConfig {
            title: self.title.clone(),
            framebuffer: self.size,
            working: self.working_size,
            memory_pages: self.memory_pages,
            ..HostConfig::default()
        };
        config.gpu.prefer_srgb = self.srgb;
        config
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            ..LoggingConfig::default()
        }
    }

    /// Path of one pass's shader: the explicit override, else its default name under
    /// `--shaders`.
    pub fn shader_path(&self, pass: PassKind) -> PathBuf {
        let explicit = match pass {
            PassKind::Sdf => &self.sdf_shader,
            PassKind::SdfShadow => &self.sdf_shadow_shader,
            PassKind::Raster => &self.raster_shader,
            PassKind::Composite => &self.composite_shader,
        };
        explicit
            .clone()
            .unwrap_or_else(|| self.shaders.join(pass.shader_file()))
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
