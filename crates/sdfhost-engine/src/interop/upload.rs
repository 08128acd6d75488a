use crate::error::HostError;

use super::SectionSizes;

/// Copies the fixed section into its uniform buffer.
///
/// Runs once, after `bind` and before the first frame.
pub fn upload_fixed(
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    memory: &[u8],
    sizes: SectionSizes,
) -> Result<(), HostError> {
    let bytes = sizes.fixed_region_bytes(memory)?;
    queue.write_buffer(buffer, 0, bytes);
    log::debug!("fixed section uploaded ({} bytes)", bytes.len());
    Ok(())
}

/// Copies this frame's variable section into its uniform buffer.
///
/// `bytes` must come from [`SectionSizes::variable_region_bytes`] after this frame's
/// `compute()`. A section that outgrew the buffer allocated at startup is an error;
/// GPU buffers are never reallocated.
pub fn write_variable(
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    bytes: &[u8],
) -> Result<(), HostError> {
    let capacity = buffer.size() as usize;
    if bytes.len() > capacity {
        return Err(HostError::VariableOverflow {
            declared: bytes.len(),
            capacity,
        });
    }
    queue.write_buffer(buffer, 0, bytes);
    Ok(())
}
