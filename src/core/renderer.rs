//! Frame renderer: clear, draw the plume, present.

use super::{Context, RenderConfig};
use crate::particles::{ParticleSystem, TransferBuffer};

/// Render statistics for the current frame.
#[derive(Debug, Clone, Default)]
pub struct RenderInfo {
    /// Number of draw calls.
    pub draw_calls: u32,
    /// Number of billboard instances drawn.
    pub instances: u32,
    /// Frame number.
    pub frame: u64,
}

impl RenderInfo {
    /// Reset the per-frame counters.
    pub fn reset(&mut self) {
        self.draw_calls = 0;
        self.instances = 0;
    }
}

/// The main renderer.
pub struct Renderer {
    /// Depth texture view; scene geometry would fill it, steam only reads it.
    depth_view: wgpu::TextureView,
    /// Render statistics.
    info: RenderInfo,
    /// Clear color.
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Create a new renderer.
    pub fn new(ctx: &Context, config: &RenderConfig) -> Self {
        Self {
            depth_view: Self::create_depth_view(ctx),
            info: RenderInfo::default(),
            clear_color: config.wgpu_clear_color(),
        }
    }

    fn create_depth_view(ctx: &Context) -> wgpu::TextureView {
        ctx.create_depth_texture()
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Get render info.
    #[inline]
    pub fn info(&self) -> &RenderInfo {
        &self.info
    }

    /// Handle resize.
    pub fn resize(&mut self, ctx: &Context) {
        self.depth_view = Self::create_depth_view(ctx);
    }

    /// Upload this frame's particles, draw them over a cleared target, present.
    pub fn render(
        &mut self,
        ctx: &Context,
        particles: &mut ParticleSystem,
        transfer: &TransferBuffer,
    ) -> Result<(), wgpu::SurfaceError> {
        self.info.reset();
        self.info.frame += 1;

        particles.upload(&ctx.queue, transfer);

        let output = ctx.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx.create_command_encoder();

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Steam Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            particles.render(&mut render_pass);
        }

        if particles.visible && particles.instance_count() > 0 {
            self.info.draw_calls += 1;
            self.info.instances += particles.instance_count();
        }

        ctx.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
