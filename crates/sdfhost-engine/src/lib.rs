//! sdfhost engine crate.
//!
//! Hosts an external compute module next to a four-pass GPU pipeline: input goes to the
//! module as table codes, the module's shared memory is mirrored into uniform buffers,
//! and one frame cycle runs per display refresh.

pub mod compute;
pub mod config;
pub mod device;
pub mod error;
pub mod host;
pub mod input;
pub mod interop;
pub mod pipeline;
pub mod scheduler;
pub mod time;
pub mod window;

pub mod logging;

pub use config::{FrameDimensions, HostConfig};
pub use error::HostError;
pub use host::HostContext;
