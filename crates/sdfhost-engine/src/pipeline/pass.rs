use std::collections::HashSet;

use crate::config::FrameDimensions;

/// One of the four render passes, in the order they are encoded every frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PassKind {
    /// Distance field at working resolution.
    Sdf,
    /// Distance-field shadow at working resolution.
    SdfShadow,
    /// Raster layer at framebuffer resolution.
    Raster,
    /// Samples the three layers and writes the swapchain image.
    Composite,
}

/// Intermediate render textures, each paired with a sampler.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureSlot {
    Sdf,
    SdfShadow,
    Raster,
}

/// Color attachment of a pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PassTarget {
    Texture(TextureSlot),
    /// The current swapchain image.
    Surface,
}

/// Resource bound at a bind-group index; the index is the position in
/// [`PassKind::bindings`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BoundResource {
    FixedBuffer,
    VariableBuffer,
    Sampler(TextureSlot),
    View(TextureSlot),
}

/// Every pass clears its target to opaque green before drawing.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Full-screen quad as two triangles; the vertex shader derives positions from the
/// vertex index.
pub const FULL_SCREEN_VERTICES: u32 = 6;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

impl PassKind {
    pub const ORDER: [PassKind; 4] = [
        PassKind::Sdf,
        PassKind::SdfShadow,
        PassKind::Raster,
        PassKind::Composite,
    ];

    /// Position in [`PassKind::ORDER`].
    pub fn index(self) -> usize {
        match self {
            PassKind::Sdf => 0,
            PassKind::SdfShadow => 1,
            PassKind::Raster => 2,
            PassKind::Composite => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PassKind::Sdf => "sdf",
            PassKind::SdfShadow => "sdf shadow",
            PassKind::Raster => "raster",
            PassKind::Composite => "composite",
        }
    }

    pub fn target(self) -> PassTarget {
        match self {
            PassKind::Sdf => PassTarget::Texture(TextureSlot::Sdf),
            PassKind::SdfShadow => PassTarget::Texture(TextureSlot::SdfShadow),
            PassKind::Raster => PassTarget::Texture(TextureSlot::Raster),
            PassKind::Composite => PassTarget::Surface,
        }
    }

    /// Bind group 0 layout, by binding index.
    pub fn bindings(self) -> &'static [BoundResource] {
        use BoundResource::*;
        match self {
            PassKind::Sdf | PassKind::SdfShadow => &[FixedBuffer, VariableBuffer],
            PassKind::Raster => &[VariableBuffer],
            PassKind::Composite => &[
                FixedBuffer,
                Sampler(TextureSlot::Raster),
                View(TextureSlot::Raster),
                Sampler(TextureSlot::Sdf),
                View(TextureSlot::Sdf),
                Sampler(TextureSlot::SdfShadow),
                View(TextureSlot::SdfShadow),
            ],
        }
    }

    /// Textures this pass samples.
    pub fn sampled(self) -> impl Iterator<Item = TextureSlot> {
        self.bindings().iter().filter_map(|b| match b {
            BoundResource::View(slot) => Some(*slot),
            _ => None,
        })
    }
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 3] = [TextureSlot::Sdf, TextureSlot::SdfShadow, TextureSlot::Raster];

    pub fn index(self) -> usize {
        match self {
            TextureSlot::Sdf => 0,
            TextureSlot::SdfShadow => 1,
            TextureSlot::Raster => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextureSlot::Sdf => "sdfhost sdf texture",
            TextureSlot::SdfShadow => "sdfhost sdf shadow texture",
            TextureSlot::Raster => "sdfhost raster texture",
        }
    }

    /// Distance-field layers render at working resolution; the raster layer matches
    /// the framebuffer.
    pub fn dimensions(self, framebuffer: FrameDimensions, working: FrameDimensions) -> FrameDimensions {
        match self {
            TextureSlot::Sdf | TextureSlot::SdfShadow => working,
            TextureSlot::Raster => framebuffer,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum PassOrderError {
    #[error("{pass:?} samples {slot:?} before any earlier pass renders it")]
    UnrenderedInput { pass: PassKind, slot: TextureSlot },

    #[error("{pass:?} samples its own target {slot:?}")]
    SamplesOwnTarget { pass: PassKind, slot: TextureSlot },

    #[error("{0:?} appears more than once")]
    Duplicate(PassKind),
}

/// Checks that every sampled texture is rendered by an earlier pass of the same
/// frame, and that no pass reads the texture it writes.
pub fn validate_order(order: &[PassKind]) -> Result<(), PassOrderError> {
    let mut seen = HashSet::new();
    let mut rendered = HashSet::new();

    for &pass in order {
        if !seen.insert(pass) {
            return Err(PassOrderError::Duplicate(pass));
        }

        let target = pass.target();
        for slot in pass.sampled() {
            if target == PassTarget::Texture(slot) {
                return Err(PassOrderError::SamplesOwnTarget { pass, slot });
            }
            if !rendered.contains(&slot) {
                return Err(PassOrderError::UnrenderedInput { pass, slot });
            }
        }

        if let PassTarget::Texture(slot) = target {
            rendered.insert(slot);
        }
    }

    Ok(())
}
