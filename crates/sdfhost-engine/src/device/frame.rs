/// Represents a single acquired swapchain frame.
///
/// Holding the surface texture prevents acquisition of subsequent frames, so the
/// frame must be submitted in the same cycle it was acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
