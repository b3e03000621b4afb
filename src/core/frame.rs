//! Per-frame sequencing of the CPU side: time, simulate, serialize.

use super::clock::{Clock, TimeSource};
use crate::config::SteamConfig;
use crate::particles::{FrameStats, SteamSimulation, TransferBuffer};

/// Drives the simulation from a time source and keeps the transfer region
/// in step with the store.
///
/// After every [`tick`](Self::tick) the transfer buffer describes exactly
/// the particles in the store, ready to be uploaded and drawn.
pub struct FrameDriver<T: TimeSource = Clock> {
    clock: T,
    simulation: SteamSimulation,
    transfer: TransferBuffer,
    last: FrameStats,
    paused: bool,
    summary_frames: u32,
    summary_time: f32,
}

impl FrameDriver<Clock> {
    /// Create a driver running on the wall clock.
    pub fn new(config: &SteamConfig) -> Self {
        Self::with_clock(config, Clock::start_new())
    }
}

impl<T: TimeSource> FrameDriver<T> {
    /// Create a driver on an arbitrary time source.
    pub fn with_clock(config: &SteamConfig, clock: T) -> Self {
        Self {
            clock,
            simulation: SteamSimulation::new(config),
            transfer: TransferBuffer::new(config.capacity),
            last: FrameStats::default(),
            paused: false,
            summary_frames: 0,
            summary_time: 0.0,
        }
    }

    /// Advance one frame: sample the clock, step, then serialize.
    ///
    /// While paused the clock is still sampled but nothing is simulated and
    /// the transfer region keeps the last frame's particles.
    pub fn tick(&mut self) -> FrameStats {
        let raw_dt = self.clock.delta_seconds();
        if self.paused {
            return FrameStats {
                dt: 0.0,
                emitted: 0,
                dropped: 0,
                retired: 0,
                ..self.last
            };
        }

        let stats = self.simulation.step(raw_dt);
        self.transfer.serialize(self.simulation.store());
        self.last = stats;

        self.summarize(raw_dt);
        stats
    }

    fn summarize(&mut self, raw_dt: f32) {
        if raw_dt.is_finite() && raw_dt > 0.0 {
            self.summary_time += raw_dt;
        }
        self.summary_frames += 1;

        if self.summary_time >= 1.0 {
            let fps = self.summary_frames as f32 / self.summary_time;
            log::debug!(
                "{:.1} fps, {} live particles, sim time {:.2}s",
                fps,
                self.last.live,
                self.last.sim_time
            );
            self.summary_frames = 0;
            self.summary_time = 0.0;
        }
    }

    /// Serialized particles for the renderer.
    #[inline]
    pub fn transfer(&self) -> &TransferBuffer {
        &self.transfer
    }

    /// The simulation.
    #[inline]
    pub fn simulation(&self) -> &SteamSimulation {
        &self.simulation
    }

    /// Statistics from the most recent tick.
    #[inline]
    pub fn last_stats(&self) -> FrameStats {
        self.last
    }

    /// Freeze the simulation, e.g. while the window is unfocused.
    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("Simulation paused at {:.2}s", self.simulation.sim_time());
            self.clock.pause();
            self.paused = true;
        }
    }

    /// Continue after a pause without a catch-up step.
    pub fn resume(&mut self) {
        if self.paused {
            self.clock.resume();
            self.paused = false;
            log::debug!("Simulation resumed");
        }
    }

    /// Whether [`pause`](Self::pause) is in effect.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Clear the plume and start over.
    pub fn reset(&mut self) {
        self.simulation.reset();
        self.transfer.serialize(self.simulation.store());
        self.last = FrameStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn config() -> SteamConfig {
        SteamConfig {
            seed: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn test_transfer_tracks_store_every_frame() {
        let mut driver = FrameDriver::with_clock(&config(), ManualClock::with_deltas([1.0 / 60.0; 240]));
        for _ in 0..240 {
            let stats = driver.tick();
            assert_eq!(driver.transfer().live_count(), stats.live);
            assert_eq!(driver.transfer().live_count(), driver.simulation().store().len());
            assert!(driver.transfer().live_count() <= driver.transfer().capacity());
        }
        assert!(driver.last_stats().live > 0);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut driver = FrameDriver::with_clock(&config(), ManualClock::with_deltas([0.0, 5.0]));
        driver.tick();
        let stats = driver.tick();
        assert_eq!(stats.dt, 0.05);
        assert!((driver.simulation().sim_time() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_paused_driver_does_not_simulate() {
        let mut driver = FrameDriver::with_clock(&config(), ManualClock::with_deltas([0.01; 9]));
        driver.tick();
        driver.tick();
        let time = driver.simulation().sim_time();
        let frame = driver.simulation().frame();
        let live = driver.transfer().live_count();

        driver.pause();
        assert!(driver.is_paused());
        for _ in 0..5 {
            let stats = driver.tick();
            assert_eq!(stats.dt, 0.0);
            assert_eq!(stats.emitted, 0);
        }
        assert_eq!(driver.simulation().sim_time(), time);
        assert_eq!(driver.simulation().frame(), frame);
        assert_eq!(driver.transfer().live_count(), live);

        driver.resume();
        assert!(!driver.is_paused());
        let stats = driver.tick();
        assert_eq!(stats.dt, 0.01);
        assert!(driver.simulation().sim_time() > time);
    }

    #[test]
    fn test_paused_wall_clock_stays_stopped() {
        let mut driver = FrameDriver::new(&config());
        driver.pause();
        std::thread::sleep(std::time::Duration::from_millis(10));
        driver.tick();
        driver.tick();
        assert_eq!(driver.simulation().sim_time(), 0.0);

        driver.resume();
        let stats = driver.tick();
        assert!(stats.dt < 0.01);
    }

    #[test]
    fn test_reset_empties_transfer() {
        let mut driver = FrameDriver::with_clock(&config(), ManualClock::with_deltas([1.0 / 60.0; 30]));
        for _ in 0..30 {
            driver.tick();
        }
        assert!(driver.transfer().live_count() > 0);

        driver.reset();
        assert_eq!(driver.transfer().live_count(), 0);
        assert_eq!(driver.last_stats(), FrameStats::default());
    }
}
