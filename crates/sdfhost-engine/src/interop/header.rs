use bytemuck::{Pod, Zeroable};

use crate::config::FrameDimensions;
use crate::error::HostError;

/// Byte length of the host-written configuration header.
pub const HEADER_LEN: usize = std::mem::size_of::<FixedHeader>();

/// Host-written configuration at the start of the fixed section.
///
/// Fields hold little-endian values regardless of host byte order; construct through
/// [`FixedHeader::new`].
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq, Eq)]
pub struct FixedHeader {
    framebuffer_width: i32,
    framebuffer_height: i32,
    working_width: i32,
    working_height: i32,
}

impl FixedHeader {
    pub fn new(framebuffer: FrameDimensions, working: FrameDimensions) -> Self {
        let le = |v: u32| (v as i32).to_le();
        Self {
            framebuffer_width: le(framebuffer.width),
            framebuffer_height: le(framebuffer.height),
            working_width: le(working.width),
            working_height: le(working.height),
        }
    }
}

/// Writes the configuration header into the shared memory.
///
/// Must run after the module's `setup` and before `bind`; it is the only host write into
/// module-owned memory.
pub fn initialize_fixed_region(
    memory: &mut [u8],
    framebuffer: FrameDimensions,
    working: FrameDimensions,
) -> Result<(), HostError> {
    for (what, dims) in [("framebuffer", framebuffer), ("working", working)] {
        if i32::try_from(dims.width).is_err() || i32::try_from(dims.height).is_err() {
            return Err(HostError::DimensionsTooLarge {
                what,
                dims,
                max: i32::MAX as u32,
            });
        }
    }

    let len = memory.len();
    let dst = memory
        .get_mut(..HEADER_LEN)
        .ok_or(HostError::HeaderOutOfBounds { len })?;

    dst.copy_from_slice(bytemuck::bytes_of(&FixedHeader::new(framebuffer, working)));
    log::debug!("fixed header written: framebuffer {framebuffer}, working {working}");
    Ok(())
}
