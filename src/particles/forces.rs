//! Environmental forcing: buoyancy, position-keyed wind, drag and plume growth.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::math::Vector3;

/// One sinusoidal wind component.
///
/// Evaluates `amplitude * wave(sim_time * frequency + coord * wavenumber)`, so
/// particles close together drift together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindWave {
    /// Peak acceleration.
    pub amplitude: f32,
    /// Temporal frequency in radians per second.
    pub frequency: f32,
    /// Spatial frequency in radians per unit.
    pub wavenumber: f32,
}

impl WindWave {
    /// Create a wind component.
    pub const fn new(amplitude: f32, frequency: f32, wavenumber: f32) -> Self {
        Self {
            amplitude,
            frequency,
            wavenumber,
        }
    }

    /// Temporal term is reduced modulo a full turn in f64, so the phase
    /// keeps its precision however long the simulation has run.
    #[inline]
    fn phase(&self, sim_time: f64, coord: f32) -> f32 {
        let temporal = (sim_time * self.frequency as f64).rem_euclid(TAU) as f32;
        temporal + coord * self.wavenumber
    }
}

/// Environment the plume rises through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Upward acceleration in units/s².
    pub buoyancy: f32,
    /// Wind along x, keyed by the particle's x (sine).
    pub wind_x: WindWave,
    /// Wind along z, keyed by the particle's z (cosine).
    pub wind_z: WindWave,
    /// Fraction of horizontal velocity kept after one second.
    pub horizontal_damping: f32,
    /// Fraction of vertical velocity kept after one second.
    pub vertical_damping: f32,
    /// Relative size growth per second.
    pub growth_rate: f32,
    /// Particles above this height are retired.
    pub ceiling: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            buoyancy: 0.12,
            wind_x: WindWave::new(0.05, 1.3, 10.0),
            wind_z: WindWave::new(0.03, 1.7, 8.0),
            // 0.995 and 0.999 per frame at 60 Hz
            horizontal_damping: 0.74,
            vertical_damping: 0.94,
            growth_rate: 0.25,
            ceiling: 3.2,
        }
    }
}

impl EnvironmentConfig {
    /// Wind acceleration at `position` and `sim_time`. Deterministic.
    #[inline]
    pub fn wind_at(&self, position: &Vector3, sim_time: f64) -> Vector3 {
        Vector3::new(
            self.wind_x.amplitude * self.wind_x.phase(sim_time, position.x).sin(),
            0.0,
            self.wind_z.amplitude * self.wind_z.phase(sim_time, position.z).cos(),
        )
    }

    /// Total acceleration (buoyancy plus wind) acting on a particle.
    #[inline]
    pub fn acceleration_at(&self, position: &Vector3, sim_time: f64) -> Vector3 {
        self.wind_at(position, sim_time) + Vector3::new(0.0, self.buoyancy, 0.0)
    }

    /// Per-axis velocity multipliers for a step of `dt` seconds.
    ///
    /// Compounded per second so drag is independent of frame rate.
    #[inline]
    pub fn damping(&self, dt: f32) -> Vector3 {
        let h = self.horizontal_damping.powf(dt);
        Vector3::new(h, self.vertical_damping.powf(dt), h)
    }

    /// Size multiplier for a step of `dt` seconds.
    #[inline]
    pub fn growth(&self, dt: f32) -> f32 {
        1.0 + self.growth_rate * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_is_deterministic_and_bounded() {
        let env = EnvironmentConfig::default();
        let p = Vector3::new(0.3, 1.0, -0.2);
        assert_eq!(env.wind_at(&p, 1.5), env.wind_at(&p, 1.5));

        for i in 0..200 {
            let t = i as f32 * 0.1;
            let w = env.wind_at(&Vector3::new(t.sin(), 0.0, t.cos()), t as f64);
            assert!(w.x.abs() <= env.wind_x.amplitude + 1e-6);
            assert!(w.z.abs() <= env.wind_z.amplitude + 1e-6);
            assert_eq!(w.y, 0.0);
        }
    }

    #[test]
    fn test_neighbors_drift_coherently() {
        let env = EnvironmentConfig::default();
        let a = env.wind_at(&Vector3::new(0.100, 0.0, 0.0), 2.0);
        let b = env.wind_at(&Vector3::new(0.101, 0.0, 0.0), 2.0);
        assert!((a - b).length() < 1e-3);
    }

    #[test]
    fn test_wind_keeps_precision_after_long_runs() {
        let env = EnvironmentConfig::default();
        let p = Vector3::new(0.62, 2.0, -0.03);
        // Roughly 115 days of simulated time.
        let t = 1.0e7;

        let w = env.wind_at(&p, t);
        let expected_x = env.wind_x.amplitude as f64
            * (t * env.wind_x.frequency as f64 + p.x as f64 * env.wind_x.wavenumber as f64).sin();
        let expected_z = env.wind_z.amplitude as f64
            * (t * env.wind_z.frequency as f64 + p.z as f64 * env.wind_z.wavenumber as f64).cos();
        assert!((w.x as f64 - expected_x).abs() < 1e-4, "{} vs {expected_x}", w.x);
        assert!((w.z as f64 - expected_z).abs() < 1e-4, "{} vs {expected_z}", w.z);
    }

    #[test]
    fn test_damping_is_frame_rate_independent() {
        let env = EnvironmentConfig::default();
        let one_second_at_60 = (0..60).fold(1.0f32, |acc, _| acc * env.damping(1.0 / 60.0).x);
        let one_second_at_30 = (0..30).fold(1.0f32, |acc, _| acc * env.damping(1.0 / 30.0).x);
        assert!((one_second_at_60 - env.horizontal_damping).abs() < 1e-4);
        assert!((one_second_at_30 - env.horizontal_damping).abs() < 1e-4);
    }

    #[test]
    fn test_zero_step_is_identity() {
        let env = EnvironmentConfig::default();
        assert_eq!(env.damping(0.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(env.growth(0.0), 1.0);
    }
}
