//! One-tick update: clamp, emit, integrate.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::emitter::{EmitReport, Emitter};
use super::integrator::Integrator;
use super::store::ParticleStore;
use crate::config::SteamConfig;

/// Clamp a raw wall-clock delta into a usable step.
///
/// Negative and non-finite deltas become 0; anything above `max_step` is
/// cut to `max_step`.
#[inline]
pub fn clamp_step(raw_dt: f32, max_step: f32) -> f32 {
    if raw_dt.is_finite() {
        raw_dt.clamp(0.0, max_step.max(0.0))
    } else {
        0.0
    }
}

/// What happened during one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Step number, starting at 1.
    pub frame: u64,
    /// Step actually simulated, after clamping.
    pub dt: f32,
    /// Simulation time at the end of the step.
    pub sim_time: f64,
    /// Particles emitted this step.
    pub emitted: u32,
    /// Particles the full store refused this step.
    pub dropped: u32,
    /// Particles retired this step.
    pub retired: u32,
    /// Live particles after the step.
    pub live: usize,
}

/// The CPU half of the steam effect.
///
/// Owns the store and everything that mutates it. Rendering only ever reads
/// [`store`](Self::store).
pub struct SteamSimulation {
    store: ParticleStore,
    emitter: Emitter,
    integrator: Integrator,
    rng: StdRng,
    seed: Option<u64>,
    max_step: f32,
    sim_time: f64,
    frame: u64,
    saturated: bool,
}

impl SteamSimulation {
    /// Build a simulation from startup configuration.
    pub fn new(config: &SteamConfig) -> Self {
        Self {
            store: ParticleStore::new(config.capacity),
            emitter: Emitter::new(config.emitter.clone()),
            integrator: Integrator::new(config.environment.clone()),
            rng: make_rng(config.seed),
            seed: config.seed,
            max_step: config.max_step,
            sim_time: 0.0,
            frame: 0,
            saturated: false,
        }
    }

    /// Live particles.
    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// The emitter.
    #[inline]
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// The integrator.
    #[inline]
    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// Simulated seconds so far.
    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Steps taken so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Longest step the simulation will take.
    #[inline]
    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// Run one step for a raw wall-clock delta.
    ///
    /// Emission happens before integration, so particles born this step
    /// are advanced once before they are drawn.
    pub fn step(&mut self, raw_dt: f32) -> FrameStats {
        let dt = clamp_step(raw_dt, self.max_step);
        if dt != raw_dt {
            log::debug!("Clamped frame delta {raw_dt} to {dt}");
        }

        let EmitReport { spawned, dropped } = self.emitter.emit(&mut self.store, dt, &mut self.rng);
        let retired = self.integrator.advance(&mut self.store, dt, self.sim_time);

        self.sim_time += dt as f64;
        self.frame += 1;
        self.track_saturation(dropped);

        FrameStats {
            frame: self.frame,
            dt,
            sim_time: self.sim_time,
            emitted: spawned,
            dropped,
            retired: retired as u32,
            live: self.store.len(),
        }
    }

    /// Clear all particles and restart the clock and random sequence.
    pub fn reset(&mut self) {
        self.store.clear();
        self.emitter.reset();
        self.rng = make_rng(self.seed);
        self.sim_time = 0.0;
        self.frame = 0;
        self.saturated = false;
    }

    fn track_saturation(&mut self, dropped: u32) {
        if dropped > 0 {
            if !self.saturated {
                log::warn!(
                    "Particle store saturated at {} particles, dropping emission",
                    self.store.capacity()
                );
                self.saturated = true;
            }
        } else if !self.store.is_full() {
            self.saturated = false;
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
