//! Emitter configuration and the rate-accumulating spawner.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use super::store::ParticleStore;
use crate::math::Vector3;

/// Particle effect preset for the two plume looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticlePreset {
    /// Fast, bright steam with short lifetimes.
    #[default]
    Steam,
    /// Slow, wide chimney smoke that lingers.
    ChimneySmoke,
}

/// Complete emitter configuration. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Particles to emit per second.
    pub emission_rate: f32,
    /// Emitter origin in world space.
    pub origin: [f32; 3],
    /// Half-width of the spawn square on the horizontal (x/z) plane.
    pub horizontal_jitter: f32,
    /// Half-height of the spawn jitter along y.
    pub vertical_jitter: f32,
    /// Minimum initial upward speed.
    pub rise_speed_min: f32,
    /// Maximum initial upward speed.
    pub rise_speed_max: f32,
    /// Maximum initial horizontal speed per axis.
    pub horizontal_spread: f32,
    /// Minimum lifetime in seconds.
    pub lifetime_min: f32,
    /// Maximum lifetime in seconds.
    pub lifetime_max: f32,
    /// Minimum initial half-extent.
    pub size_min: f32,
    /// Maximum initial half-extent.
    pub size_max: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self::steam_preset()
    }
}

impl EmitterConfig {
    /// Create a config from a preset.
    pub fn from_preset(preset: ParticlePreset) -> Self {
        match preset {
            ParticlePreset::Steam => Self::steam_preset(),
            ParticlePreset::ChimneySmoke => Self::chimney_smoke_preset(),
        }
    }

    /// Steam rising from the chimney top.
    pub fn steam_preset() -> Self {
        Self {
            emission_rate: 150.0,
            // Top of the chimney stack
            origin: [0.6, 1.3, 0.0],
            horizontal_jitter: 0.04,
            vertical_jitter: 0.02,
            rise_speed_min: 0.25,
            rise_speed_max: 0.55,
            horizontal_spread: 0.04,
            lifetime_min: 1.8,
            lifetime_max: 2.4,
            size_min: 0.05,
            size_max: 0.1,
        }
    }

    /// Wider, slower smoke column.
    pub fn chimney_smoke_preset() -> Self {
        Self {
            emission_rate: 175.0,
            origin: [0.6, 1.3, 0.0],
            horizontal_jitter: 0.09,
            vertical_jitter: 0.0,
            rise_speed_min: 0.3,
            rise_speed_max: 0.4,
            horizontal_spread: 0.02,
            lifetime_min: 3.5,
            lifetime_max: 4.0,
            size_min: 0.12,
            size_max: 0.18,
        }
    }

    /// Mean lifetime in seconds.
    #[inline]
    pub fn mean_lifetime(&self) -> f32 {
        0.5 * (self.lifetime_min + self.lifetime_max)
    }

    /// Expected steady-state live count (Little's law), ignoring capacity.
    #[inline]
    pub fn expected_population(&self) -> f32 {
        self.emission_rate * self.mean_lifetime()
    }
}

/// Outcome of one emission step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Particles inserted into the store.
    pub spawned: u32,
    /// Particles the rate asked for but the full store refused.
    pub dropped: u32,
}

/// Stochastic particle source with a fractional-count accumulator.
#[derive(Debug, Clone)]
pub struct Emitter {
    config: EmitterConfig,
    /// Fractional particles carried between steps.
    accumulator: f32,
}

impl Emitter {
    /// Create an emitter.
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Fraction of a particle owed to the next step.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Drop any carried fraction.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Inject the particles owed for `dt` seconds.
    ///
    /// Emission past capacity is silently dropped; the owed count is still
    /// consumed so a full store never causes a later burst.
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        store: &mut ParticleStore,
        dt: f32,
        rng: &mut R,
    ) -> EmitReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.accumulator += self.config.emission_rate.max(0.0) * dt;

        let owed = self.accumulator.floor();
        self.accumulator -= owed;

        let owed = owed as u64;
        let spawn = owed.min(store.remaining() as u64);
        for _ in 0..spawn {
            store.push(self.spawn(rng));
        }

        EmitReport {
            spawned: spawn as u32,
            dropped: (owed - spawn).min(u32::MAX as u64) as u32,
        }
    }

    /// Draw one new particle from the configured distributions.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        let c = &self.config;
        let origin = Vector3::from_array(c.origin);

        let jitter = Vector3::new(
            sample(rng, -c.horizontal_jitter, c.horizontal_jitter),
            sample(rng, -c.vertical_jitter, c.vertical_jitter),
            sample(rng, -c.horizontal_jitter, c.horizontal_jitter),
        );
        let velocity = Vector3::new(
            sample(rng, -c.horizontal_spread, c.horizontal_spread),
            sample(rng, c.rise_speed_min, c.rise_speed_max),
            sample(rng, -c.horizontal_spread, c.horizontal_spread),
        );
        let lifetime = sample(rng, c.lifetime_min, c.lifetime_max);
        let size = sample(rng, c.size_min, c.size_max);

        Particle::new(origin + jitter, velocity, lifetime, size)
    }
}

/// Uniform sample in `[min, max]`; degenerate ranges return `min`.
#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_accumulator_carries_fraction() {
        let mut config = EmitterConfig::default();
        config.emission_rate = 10.0;
        let mut emitter = Emitter::new(config);
        let mut store = ParticleStore::new(100);
        let mut rng = StdRng::seed_from_u64(1);

        // 10/s at 1/60 s is 1/6 of a particle per step.
        let mut spawned = 0;
        for _ in 0..60 {
            spawned += emitter.emit(&mut store, 1.0 / 60.0, &mut rng).spawned;
        }
        // Float accumulation may leave the tenth particle a hair short of whole.
        assert!((9..=10).contains(&spawned), "spawned {spawned}");
        assert_eq!(store.len() as u32, spawned);
        assert!(emitter.accumulator() < 1.0);
    }

    #[test]
    fn test_long_run_rate_is_exact() {
        let mut config = EmitterConfig::default();
        config.emission_rate = 37.0;
        let mut emitter = Emitter::new(config);
        let mut store = ParticleStore::new(100_000);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..600 {
            emitter.emit(&mut store, 1.0 / 60.0, &mut rng);
        }
        // 10 seconds at 37/s
        assert!((store.len() as i64 - 370).abs() <= 1, "got {}", store.len());
    }

    #[test]
    fn test_emission_is_capacity_gated() {
        let mut emitter = Emitter::new(EmitterConfig::default());
        let mut store = ParticleStore::new(5);
        let mut rng = StdRng::seed_from_u64(3);

        let report = emitter.emit(&mut store, 1.0, &mut rng);
        assert_eq!(report.spawned, 5);
        assert_eq!(report.dropped, 145);
        assert_eq!(store.len(), 5);
        assert!(emitter.accumulator() < 1.0);
    }

    #[test]
    fn test_huge_rate_only_spawns_what_fits() {
        let mut config = EmitterConfig::default();
        config.emission_rate = 2.0e9;
        let mut emitter = Emitter::new(config);
        let mut store = ParticleStore::new(1000);
        let mut rng = StdRng::seed_from_u64(7);

        let start = std::time::Instant::now();
        let report = emitter.emit(&mut store, 0.05, &mut rng);
        assert!(start.elapsed() < std::time::Duration::from_millis(50));

        assert_eq!(report.spawned, 1000);
        assert!((report.dropped as i64 - 99_999_000).abs() <= 8, "dropped {}", report.dropped);
        assert_eq!(store.len(), 1000);

        // A full store spawns nothing and reports the whole step as dropped.
        let report = emitter.emit(&mut store, 0.05, &mut rng);
        assert_eq!(report.spawned, 0);
        assert!(report.dropped > 99_000_000);
        assert_eq!(store.len(), 1000);
    }

    #[test]
    fn test_negative_and_nan_dt_emit_nothing() {
        let mut emitter = Emitter::new(EmitterConfig::default());
        let mut store = ParticleStore::new(10);
        let mut rng = StdRng::seed_from_u64(4);

        assert_eq!(emitter.emit(&mut store, -1.0, &mut rng), EmitReport::default());
        assert_eq!(emitter.emit(&mut store, f32::NAN, &mut rng), EmitReport::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_spawn_respects_bounds() {
        let config = EmitterConfig::default();
        let emitter = Emitter::new(config.clone());
        let mut rng = StdRng::seed_from_u64(5);
        let origin = Vector3::from_array(config.origin);

        for _ in 0..1000 {
            let p = emitter.spawn(&mut rng);
            let offset = p.position - origin;
            assert!(offset.x.abs() <= config.horizontal_jitter);
            assert!(offset.y.abs() <= config.vertical_jitter);
            assert!(offset.z.abs() <= config.horizontal_jitter);
            assert!(p.velocity.y >= config.rise_speed_min && p.velocity.y <= config.rise_speed_max);
            assert!(p.velocity.x.abs() <= config.horizontal_spread);
            assert!(p.total_lifetime >= config.lifetime_min && p.total_lifetime <= config.lifetime_max);
            assert_eq!(p.remaining_life, p.total_lifetime);
            assert!(p.size >= config.size_min && p.size <= config.size_max);
        }
    }

    #[test]
    fn test_degenerate_ranges_do_not_panic() {
        let mut config = EmitterConfig::default();
        config.horizontal_jitter = 0.0;
        config.vertical_jitter = 0.0;
        config.lifetime_min = 2.0;
        config.lifetime_max = 2.0;
        let emitter = Emitter::new(config);
        let mut rng = StdRng::seed_from_u64(6);
        let p = emitter.spawn(&mut rng);
        assert_eq!(p.total_lifetime, 2.0);
        assert_eq!(p.position, Vector3::new(0.6, 1.3, 0.0));
    }

    #[test]
    fn test_expected_population() {
        let config = EmitterConfig::default();
        assert!((config.expected_population() - 315.0).abs() < 1e-3);
    }
}
