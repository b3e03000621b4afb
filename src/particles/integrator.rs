//! Per-step kinematic update and retirement.

use super::forces::EnvironmentConfig;
use super::store::ParticleStore;

/// Advances every live particle by one step and retires the expired ones.
#[derive(Debug, Clone)]
pub struct Integrator {
    environment: EnvironmentConfig,
}

impl Integrator {
    /// Create an integrator for the given environment.
    pub fn new(environment: EnvironmentConfig) -> Self {
        Self { environment }
    }

    /// Get the environment.
    pub fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    /// Advance all particles by `dt` seconds at simulation time `sim_time`.
    ///
    /// `dt` must already be clamped by the caller; negative or non-finite
    /// values are treated as zero. Returns the number of particles retired.
    pub fn advance(&self, store: &mut ParticleStore, dt: f32, sim_time: f64) -> usize {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let env = &self.environment;
        let damping = env.damping(dt);
        let growth = env.growth(dt);
        let ceiling = env.ceiling;

        store.update_retain(|p| {
            let accel = env.acceleration_at(&p.position, sim_time);
            p.velocity += accel * dt;
            p.velocity = p.velocity.multiply(&damping);

            p.position += p.velocity * dt;
            p.size *= growth;
            p.remaining_life = (p.remaining_life - dt).max(0.0);

            p.is_alive(ceiling)
        })
    }
}
