//! Four-pass render pipeline.
//!
//! Per frame, in order:
//! 1. SDF pass: fixed + variable buffers → SDF texture (working resolution)
//! 2. SDF shadow pass: fixed + variable buffers → shadow texture (working resolution)
//! 3. raster pass: variable buffer → raster texture (framebuffer resolution)
//! 4. composite pass: fixed buffer + the three textures → swapchain image
//!
//! Passes 1-3 are independent of each other; the composite pass depends on all three.
//! All four go into one command encoder and one queue submission.

mod orchestrator;
mod pass;
mod shaders;

pub use orchestrator::Orchestrator;
pub use pass::{
    validate_order, BoundResource, PassKind, PassOrderError, PassTarget, TextureSlot, CLEAR_COLOR,
    FULL_SCREEN_VERTICES,
};
pub use shaders::ShaderSources;
