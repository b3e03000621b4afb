//! Main engine entry point.

use super::{Context, ContextError, FrameDriver, Renderer};
use crate::camera::PerspectiveCamera;
use crate::config::SteamConfig;
use crate::particles::{FrameStats, ParticleSystem};

/// The steam engine.
/// Owns the GPU context, the plume on both sides of the bus, and timing.
pub struct Engine {
    /// The wgpu context.
    pub context: Context,
    /// The renderer.
    pub renderer: Renderer,
    /// GPU half of the plume.
    pub particles: ParticleSystem,
    /// Fixed view onto the chimney.
    pub camera: PerspectiveCamera,
    /// CPU half of the plume.
    pub driver: FrameDriver,
}

impl Engine {
    /// Create an engine from a window handle.
    ///
    /// # Arguments
    /// * `window` - A window handle, e.g. `Arc<winit::window::Window>`
    /// * `width` - Initial width in pixels
    /// * `height` - Initial height in pixels
    /// * `config` - Validated startup configuration
    pub async fn new<W>(
        window: W,
        width: u32,
        height: u32,
        config: &SteamConfig,
    ) -> Result<Self, ContextError>
    where
        W: Into<wgpu::SurfaceTarget<'static>>,
    {
        let context = Context::new(window, width.max(1), height.max(1), &config.render).await?;
        let renderer = Renderer::new(&context, &config.render);
        let particles = ParticleSystem::new(
            &context.device,
            config.capacity as u32,
            &config.shading,
            context.surface_format,
            context.depth_format,
        );
        let camera = PerspectiveCamera::from_config(&config.camera, context.aspect_ratio());
        particles.update_camera(&context.queue, &camera);

        Ok(Self {
            context,
            renderer,
            particles,
            camera,
            driver: FrameDriver::new(config),
        })
    }

    /// Handle resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.context.width && height == self.context.height) {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        self.camera.set_aspect(self.context.aspect_ratio());
        self.particles.update_camera(&self.context.queue, &self.camera);
    }

    /// Freeze the plume, e.g. while the window is unfocused.
    pub fn pause(&mut self) {
        self.driver.pause();
    }

    /// Unfreeze the plume without a catch-up step.
    pub fn resume(&mut self) {
        self.driver.resume();
    }

    /// Run one full frame: simulate, upload, draw, present.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn frame(&mut self) -> Result<FrameStats, wgpu::SurfaceError> {
        let stats = self.driver.tick();

        match self
            .renderer
            .render(&self.context, &mut self.particles, self.driver.transfer())
        {
            Ok(()) => Ok(stats),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.context.resize(self.context.width, self.context.height);
                Ok(stats)
            }
            Err(e) => Err(e),
        }
    }
}
