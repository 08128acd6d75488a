//! Host error taxonomy.
//!
//! Everything here is fatal: startup variants abort initialization, frame variants end
//! the frame loop. Unknown keys and buttons are not errors; the input dispatcher drops
//! them with a warning.

use std::path::PathBuf;

use crate::config::FrameDimensions;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("GPU rendering is not available on this system")]
    NoGpu(#[source] wgpu::CreateSurfaceError),

    #[error("no appropriate GPU adapter found")]
    NoAdapter(#[source] wgpu::RequestAdapterError),

    #[error("failed to acquire a GPU device")]
    NoDevice(#[source] wgpu::RequestDeviceError),

    #[error("surface reports no usable texture format")]
    NoSurfaceFormat,

    #[error("failed to load {name} shader from {}", path.display())]
    ShaderLoad {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} shader at {} is empty", path.display())]
    ShaderEmpty { name: &'static str, path: PathBuf },

    #[error("failed to load compute module from {}", path.display())]
    ModuleLoad { path: PathBuf },

    #[error("compute module does not export `{name}` with a supported signature")]
    MissingExport { name: &'static str },

    #[error("shared memory is {len} bytes; the 16-byte configuration header does not fit")]
    HeaderOutOfBounds { len: usize },

    #[error(
        "compute module declared fixed={fixed} variable={variable} bytes, \
         which does not fit a {memory}-byte shared memory"
    )]
    InvalidLayout {
        fixed: i64,
        variable: i64,
        memory: usize,
    },

    #[error("variable section grew to {declared} bytes; GPU buffer holds {capacity}")]
    VariableOverflow { declared: usize, capacity: usize },

    #[error("{what} resolution {dims} exceeds the device texture limit of {max}")]
    DimensionsTooLarge {
        what: &'static str,
        dims: FrameDimensions,
        max: u32,
    },

    #[error("failed to build {stage} pipeline: {message}")]
    PipelineBuild {
        stage: &'static str,
        message: String,
    },

    #[error("render pass order is invalid")]
    PassOrder(#[from] crate::pipeline::PassOrderError),

    #[error("{section} section of {size} bytes exceeds the device uniform binding limit of {max}")]
    SectionTooLarge {
        section: &'static str,
        size: usize,
        max: u64,
    },
}
