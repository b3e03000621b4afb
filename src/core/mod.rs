//! # Core Module
//!
//! wgpu context management, the frame renderer, timing, and the frame driver
//! that sequences the simulation ahead of each draw.

mod clock;
mod context;
mod engine;
mod frame;
mod renderer;

pub use clock::{Clock, TimeSource};
pub use context::{Context, ContextError};
pub use engine::Engine;
pub use frame::FrameDriver;
pub use renderer::{RenderInfo, Renderer};

use serde::{Deserialize, Serialize};

/// Render configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Background color (linear RGB).
    pub clear_color: [f32; 3],
    /// Wait for vertical blank.
    pub vsync: bool,
    /// Prefer a discrete GPU.
    pub high_performance: bool,
    /// Initial window width.
    pub width: u32,
    /// Initial window height.
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.08, 0.08, 0.10],
            vsync: true,
            high_performance: true,
            width: 800,
            height: 600,
        }
    }
}

impl RenderConfig {
    /// Present mode for the surface.
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }

    /// Power preference for GPU selection.
    pub fn power_preference(&self) -> wgpu::PowerPreference {
        if self.high_performance {
            wgpu::PowerPreference::HighPerformance
        } else {
            wgpu::PowerPreference::LowPower
        }
    }

    /// Clear color as a wgpu color.
    pub fn wgpu_clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_background() {
        let config = RenderConfig::default();
        let color = config.wgpu_clear_color();
        assert!((color.r - 0.08).abs() < 1e-6);
        assert!((color.b - 0.10).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_vsync_selects_present_mode() {
        let mut config = RenderConfig::default();
        assert_eq!(config.present_mode(), wgpu::PresentMode::AutoVsync);
        config.vsync = false;
        assert_eq!(config.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
