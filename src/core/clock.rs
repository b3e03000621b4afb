//! Wall-clock timing for the frame loop.

use std::time::Instant;

/// Monotonic source of per-frame deltas.
pub trait TimeSource {
    /// Seconds since the previous call. The first call returns 0.
    fn delta_seconds(&mut self) -> f32;

    /// Stop reporting time until [`resume`](Self::resume).
    fn pause(&mut self) {}

    /// Start reporting time again; the paused gap is never reported.
    fn resume(&mut self) {}
}

/// A clock for measuring elapsed time and delta time.
#[derive(Debug, Default)]
pub struct Clock {
    /// Whether the clock is running.
    running: bool,
    /// Time of the last update in seconds.
    old_time: f64,
    /// Total elapsed time while running.
    elapsed_time: f64,
    instant: Option<Instant>,
}

impl Clock {
    /// Create a new clock (not started).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and start a new clock.
    pub fn start_new() -> Self {
        let mut clock = Self::new();
        clock.start();
        clock
    }

    fn now(&self) -> f64 {
        self.instant
            .map(|i| i.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Start the clock. Elapsed time keeps accumulating across stop/start.
    pub fn start(&mut self) {
        if self.instant.is_none() {
            self.instant = Some(Instant::now());
        }
        self.old_time = self.now();
        self.running = true;
    }

    /// Stop the clock. Time spent stopped is never reported as a delta.
    pub fn stop(&mut self) {
        if self.running {
            self.get_delta();
            self.running = false;
        }
    }

    /// Get the elapsed running time (in seconds).
    pub fn get_elapsed_time(&mut self) -> f64 {
        if self.running {
            self.get_delta();
        }
        self.elapsed_time
    }

    /// Get the time since the last call to get_delta (in seconds).
    ///
    /// A stopped clock reports 0 and stays stopped until [`start`](Self::start).
    pub fn get_delta(&mut self) -> f64 {
        if !self.running {
            return 0.0;
        }

        let new_time = self.now();
        let diff = new_time - self.old_time;
        self.old_time = new_time;
        self.elapsed_time += diff;

        diff
    }

    /// Check if the clock is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reset elapsed time to zero.
    pub fn reset(&mut self) {
        self.old_time = self.now();
        self.elapsed_time = 0.0;
    }
}

impl TimeSource for Clock {
    fn delta_seconds(&mut self) -> f32 {
        self.get_delta() as f32
    }

    fn pause(&mut self) {
        self.stop();
    }

    fn resume(&mut self) {
        self.start();
    }
}

/// Scripted time source for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ManualClock {
    deltas: std::collections::VecDeque<f32>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn with_deltas(deltas: impl IntoIterator<Item = f32>) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl TimeSource for ManualClock {
    fn delta_seconds(&mut self) -> f32 {
        self.deltas.pop_front().unwrap_or(0.0)
    }
}
