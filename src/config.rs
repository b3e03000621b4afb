//! Startup configuration: defaults, JSON loading, validation and a builder.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraConfig;
use crate::core::RenderConfig;
use crate::particles::{EmitterConfig, EnvironmentConfig, ParticlePreset, ShadingConfig};

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything the steam scene needs at startup. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamConfig {
    /// Maximum live particles.
    pub capacity: usize,
    /// Longest step the simulation will take, in seconds.
    pub max_step: f32,
    /// Random seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Particle source.
    pub emitter: EmitterConfig,
    /// Forces acting on the plume.
    pub environment: EnvironmentConfig,
    /// Sprite appearance.
    pub shading: ShadingConfig,
    /// Camera placement.
    pub camera: CameraConfig,
    /// Window and surface.
    pub render: RenderConfig,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            max_step: 0.05,
            seed: None,
            emitter: EmitterConfig::default(),
            environment: EnvironmentConfig::default(),
            shading: ShadingConfig::default(),
            camera: CameraConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl SteamConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> SteamConfigBuilder {
        SteamConfigBuilder::new()
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the simulation and renderer rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 || self.capacity > u32::MAX as usize {
            return invalid(format!("capacity must be in 1..={}, got {}", u32::MAX, self.capacity));
        }
        positive("max_step", self.max_step)?;

        let e = &self.emitter;
        if !e.emission_rate.is_finite() || e.emission_rate < 0.0 {
            return invalid(format!("emitter.emission_rate must be >= 0, got {}", e.emission_rate));
        }
        if !e.origin.iter().all(|c| c.is_finite()) {
            return invalid("emitter.origin must be finite".to_string());
        }
        non_negative("emitter.horizontal_jitter", e.horizontal_jitter)?;
        non_negative("emitter.vertical_jitter", e.vertical_jitter)?;
        non_negative("emitter.horizontal_spread", e.horizontal_spread)?;
        ordered("emitter.rise_speed", e.rise_speed_min, e.rise_speed_max)?;
        positive("emitter.lifetime_min", e.lifetime_min)?;
        ordered("emitter.lifetime", e.lifetime_min, e.lifetime_max)?;
        positive("emitter.size_min", e.size_min)?;
        ordered("emitter.size", e.size_min, e.size_max)?;

        let env = &self.environment;
        for (name, value) in [
            ("environment.buoyancy", env.buoyancy),
            ("environment.growth_rate", env.growth_rate),
            ("environment.ceiling", env.ceiling),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        non_negative("environment.growth_rate", env.growth_rate)?;
        for (name, wave) in [("environment.wind_x", env.wind_x), ("environment.wind_z", env.wind_z)] {
            if ![wave.amplitude, wave.frequency, wave.wavenumber].iter().all(|v| v.is_finite()) {
                return invalid(format!("{name} must be finite"));
            }
        }
        unit_interval("environment.horizontal_damping", env.horizontal_damping)?;
        unit_interval("environment.vertical_damping", env.vertical_damping)?;

        let s = &self.shading;
        if !(0.0..0.5).contains(&s.inner_radius) {
            return invalid(format!("shading.inner_radius must be in [0, 0.5), got {}", s.inner_radius));
        }
        positive("shading.falloff_exponent", s.falloff_exponent)?;
        positive("shading.fade_exponent", s.fade_exponent)?;
        non_negative("shading.intensity", s.intensity)?;
        non_negative("shading.discard_threshold", s.discard_threshold)?;

        let c = &self.camera;
        if !(c.fov > 0.0 && c.fov < 180.0) {
            return invalid(format!("camera.fov must be in (0, 180), got {}", c.fov));
        }
        positive("camera.near", c.near)?;
        if c.far <= c.near {
            return invalid(format!("camera.far ({}) must exceed camera.near ({})", c.far, c.near));
        }
        if c.position == c.target {
            return invalid("camera.position and camera.target must differ".to_string());
        }

        Ok(())
    }
}

fn invalid<T>(message: String) -> Result<T, ConfigError> {
    Err(ConfigError::Invalid(message))
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        invalid(format!("{name} must be > 0, got {value}"))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(format!("{name} must be >= 0, got {value}"))
    }
}

fn unit_interval(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        invalid(format!("{name} must be in (0, 1], got {value}"))
    }
}

fn ordered(name: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        invalid(format!("{name} range is inverted: [{min}, {max}]"))
    }
}

/// Builder for configuring the steam scene.
pub struct SteamConfigBuilder {
    config: SteamConfig,
}

impl Default for SteamConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SteamConfigBuilder {
    /// Create a new builder from the defaults.
    pub fn new() -> Self {
        Self {
            config: SteamConfig::default(),
        }
    }

    /// Use a particle preset.
    pub fn preset(mut self, preset: ParticlePreset) -> Self {
        self.config.emitter = EmitterConfig::from_preset(preset);
        self
    }

    /// Set the particle capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the emission rate in particles per second.
    pub fn emission_rate(mut self, rate: f32) -> Self {
        self.config.emitter.emission_rate = rate;
        self
    }

    /// Move the emitter.
    pub fn origin(mut self, x: f32, y: f32, z: f32) -> Self {
        self.config.emitter.origin = [x, y, z];
        self
    }

    /// Fix the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the largest simulated step.
    pub fn max_step(mut self, max_step: f32) -> Self {
        self.config.max_step = max_step;
        self
    }

    /// Set the clear color.
    pub fn clear_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.config.render.clear_color = [r, g, b];
        self
    }

    /// Set vsync.
    pub fn vsync(mut self, enabled: bool) -> Self {
        self.config.render.vsync = enabled;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<SteamConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
