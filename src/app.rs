//! Windowed host: a `winit` application that drives the engine once per redraw.

use std::sync::Arc;

use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::{ConfigError, SteamConfig};
use crate::core::{ContextError, Engine};

/// Errors that end the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GPU setup failed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The window could not be created.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// The event loop failed.
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The surface failed in a way reconfiguring cannot fix.
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// The steam window.
pub struct SteamApp {
    config: SteamConfig,
    window: Option<Arc<Window>>,
    engine: Option<Engine>,
    error: Option<AppError>,
}

impl SteamApp {
    /// Create the app; the window opens on the first resume.
    pub fn new(config: SteamConfig) -> Self {
        Self {
            config,
            window: None,
            engine: None,
            error: None,
        }
    }

    /// Open the window and block until it closes.
    pub fn run(config: SteamConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = Self::new(config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let render = &self.config.render;
        let attributes = Window::default_attributes()
            .with_title(crate::NAME)
            .with_inner_size(PhysicalSize::new(render.width, render.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        let engine = pollster::block_on(Engine::new(
            window.clone(),
            size.width,
            size.height,
            &self.config,
        ))?;

        log::info!(
            "Steam plume ready: {}x{}, capacity {}, {} particles/s",
            size.width,
            size.height,
            self.config.capacity,
            self.config.emitter.emission_rate
        );

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for SteamApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    engine.resume();
                } else {
                    engine.pause();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                        PhysicalKey::Code(KeyCode::KeyR) => {
                            log::info!("Resetting plume");
                            engine.driver.reset();
                        }
                        _ => {}
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                match engine.frame() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("Surface timeout, skipping frame");
                    }
                    Err(e) => {
                        self.fail(event_loop, e.into());
                        return;
                    }
                }

                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
