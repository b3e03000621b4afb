//! GPU half of the steam effect: buffers, pipeline and the instanced draw.

use super::billboard::VERTICES_PER_BILLBOARD;
use super::gpu_resources::SteamGpuResources;
use super::particle::ParticleVertex;
use super::shading::ShadingConfig;
use super::transfer::TransferBuffer;
use crate::camera::ViewProjection;

/// Draws the contents of a [`TransferBuffer`] as soft camera-facing sprites.
pub struct ParticleSystem {
    gpu: SteamGpuResources,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    /// Instances uploaded by the last [`upload`](Self::upload).
    instance_count: u32,
    /// Visibility flag.
    pub visible: bool,
}

impl ParticleSystem {
    /// Create GPU resources and the pipeline.
    ///
    /// `color_format` is the surface format and `depth_format` the scene depth
    /// buffer, which the sprites test against but never write.
    pub fn new(
        device: &wgpu::Device,
        capacity: u32,
        shading: &ShadingConfig,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let gpu = SteamGpuResources::new(device, capacity, shading);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Steam Bind Group Layout"),
            entries: &[
                // Camera
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Shading
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Steam Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: gpu.camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: gpu.shading_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline = Self::create_pipeline(device, &bind_group_layout, color_format, depth_format);

        Self {
            gpu,
            pipeline,
            bind_group,
            instance_count: 0,
            visible: true,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Steam Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/steam.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Steam Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        // Depth stencil state (read-only)
        let depth_stencil = wgpu::DepthStencilState {
            format: depth_format,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        let alpha_blend = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Steam Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ParticleVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(alpha_blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(depth_stencil),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Stream this frame's particles to the GPU.
    ///
    /// The draw count is taken from the same buffer, so the pipeline never
    /// reads tuples that were not written this frame.
    pub fn upload(&mut self, queue: &wgpu::Queue, transfer: &TransferBuffer) {
        self.gpu.upload(queue, transfer);
        self.instance_count = transfer.instance_count().min(self.gpu.capacity);
    }

    /// Update camera-dependent uniforms (call when the view or aspect changes).
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &impl ViewProjection) {
        self.gpu.write_camera(queue, camera);
    }

    /// Instances the next [`render`](Self::render) will draw.
    #[inline]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Record the draw into an open render pass.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if !self.visible || self.instance_count == 0 {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.gpu.vertex_buffer.slice(..));
        render_pass.draw(0..VERTICES_PER_BILLBOARD, 0..self.instance_count);
    }
}
