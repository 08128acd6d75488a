use super::pass::{
    validate_order, BoundResource, PassKind, PassTarget, TextureSlot, CLEAR_COLOR, FRAGMENT_ENTRY,
    FULL_SCREEN_VERTICES, VERTEX_ENTRY,
};
use super::ShaderSources;
use crate::config::FrameDimensions;
use crate::error::HostError;
use crate::interop::SectionSizes;

/// Render target texture with its default view and sampler.
struct RenderTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

struct PassResources {
    kind: PassKind,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

/// Owns every GPU resource of the four-pass pipeline.
///
/// Resources are created once in [`Orchestrator::new`] and reused for the lifetime of
/// the host; nothing is allocated per frame.
pub struct Orchestrator {
    fixed_buffer: wgpu::Buffer,
    variable_buffer: wgpu::Buffer,
    textures: [RenderTexture; 3],
    passes: Vec<PassResources>,
}

impl Orchestrator {
    /// Builds buffers, textures, samplers, pipelines and bind groups.
    ///
    /// Buffer sizes come from the module's declared sections; texture formats follow the
    /// surface so every pass renders in the swapchain format.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        framebuffer: FrameDimensions,
        working: FrameDimensions,
        sizes: SectionSizes,
        sources: &ShaderSources,
    ) -> Result<Self, HostError> {
        check_limits(&device.limits(), framebuffer, working, sizes)?;

        validate_order(&PassKind::ORDER)?;

        let (fixed_buffer, variable_buffer, textures) = validated(device, "resources", || {
            let fixed = uniform_buffer(device, "sdfhost fixed buffer", sizes.fixed);
            let variable = uniform_buffer(device, "sdfhost variable buffer", sizes.variable);
            let textures = TextureSlot::ALL
                .map(|slot| render_texture(device, slot, slot.dimensions(framebuffer, working), format));
            (fixed, variable, textures)
        })?;

        let mut passes = Vec::with_capacity(PassKind::ORDER.len());
        for kind in PassKind::ORDER {
            let (pipeline, bind_group) = validated(device, kind.name(), || {
                let pipeline = render_pipeline(device, kind, sources.get(kind), format);
                let bind_group =
                    bind_group(device, kind, &pipeline, &fixed_buffer, &variable_buffer, &textures);
                (pipeline, bind_group)
            })?;
            passes.push(PassResources {
                kind,
                pipeline,
                bind_group,
            });
        }

        log::info!(
            "pipeline ready: framebuffer {framebuffer}, working {working}, fixed {} B, variable {} B, {format:?}",
            sizes.fixed,
            sizes.variable
        );

        Ok(Self {
            fixed_buffer,
            variable_buffer,
            textures,
            passes,
        })
    }

    pub fn fixed_buffer(&self) -> &wgpu::Buffer {
        &self.fixed_buffer
    }

    pub fn variable_buffer(&self) -> &wgpu::Buffer {
        &self.variable_buffer
    }

    /// Records the four passes into `encoder`, composite last.
    ///
    /// Each pass clears its target, binds its pipeline and bind group, and draws one
    /// full-screen quad without vertex or index buffers.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, surface_view: &wgpu::TextureView) {
        for pass in &self.passes {
            let view = match pass.kind.target() {
                PassTarget::Texture(slot) => &self.textures[slot.index()].view,
                PassTarget::Surface => surface_view,
            };

            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(pass.kind.name()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&pass.pipeline);
            rpass.set_bind_group(0, &pass.bind_group, &[]);
            rpass.draw(0..FULL_SCREEN_VERTICES, 0..1);
        }
    }
}

/// Runs `build` inside a validation error scope.
///
/// Shader compilation and layout mismatches surface here as `PipelineBuild` instead of
/// reaching the device's uncaptured-error handler.
fn validated<T>(
    device: &wgpu::Device,
    stage: &'static str,
    build: impl FnOnce() -> T,
) -> Result<T, HostError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build();
    match pollster::block_on(scope.pop()) {
        Some(err) => Err(HostError::PipelineBuild {
            stage,
            message: err.to_string(),
        }),
        None => Ok(value),
    }
}

fn check_limits(
    limits: &wgpu::Limits,
    framebuffer: FrameDimensions,
    working: FrameDimensions,
    sizes: SectionSizes,
) -> Result<(), HostError> {
    let max = limits.max_texture_dimension_2d;
    for (what, dims) in [("framebuffer", framebuffer), ("working", working)] {
        if dims.width > max || dims.height > max {
            return Err(HostError::DimensionsTooLarge { what, dims, max });
        }
    }

    let max = limits.max_uniform_buffer_binding_size as u64;
    for (section, size) in [("fixed", sizes.fixed), ("variable", sizes.variable)] {
        if size as u64 > max {
            return Err(HostError::SectionTooLarge { section, size, max });
        }
    }

    Ok(())
}

fn uniform_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn render_texture(
    device: &wgpu::Device,
    slot: TextureSlot,
    dims: FrameDimensions,
    format: wgpu::TextureFormat,
) -> RenderTexture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(slot.label()),
        size: dims.extent(),
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    // Upscaling happens in the composite shader; keep texels crisp.
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(slot.label()),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    RenderTexture {
        _texture: texture,
        view,
        sampler,
    }
}

fn render_pipeline(
    device: &wgpu::Device,
    kind: PassKind,
    source: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(kind.name()),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(kind.name()),
        // Layout is inferred from the shader's declared bindings.
        layout: None,

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[],
        },

        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn bind_group(
    device: &wgpu::Device,
    kind: PassKind,
    pipeline: &wgpu::RenderPipeline,
    fixed_buffer: &wgpu::Buffer,
    variable_buffer: &wgpu::Buffer,
    textures: &[RenderTexture; 3],
) -> wgpu::BindGroup {
    let entries: Vec<wgpu::BindGroupEntry<'_>> = kind
        .bindings()
        .iter()
        .enumerate()
        .map(|(binding, resource)| wgpu::BindGroupEntry {
            binding: binding as u32,
            resource: match resource {
                BoundResource::FixedBuffer => fixed_buffer.as_entire_binding(),
                BoundResource::VariableBuffer => variable_buffer.as_entire_binding(),
                BoundResource::Sampler(slot) => {
                    wgpu::BindingResource::Sampler(&textures[slot.index()].sampler)
                }
                BoundResource::View(slot) => {
                    wgpu::BindingResource::TextureView(&textures[slot.index()].view)
                }
            },
        })
        .collect();

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(kind.name()),
        layout: &pipeline.get_bind_group_layout(0),
        entries: &entries,
    })
}
