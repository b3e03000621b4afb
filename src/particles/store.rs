//! Fixed-capacity particle storage.

use super::particle::Particle;

/// Unordered set of at most `capacity` live particles.
///
/// Backing storage is allocated once. Removal is swap-remove, so slot order
/// changes between frames and must not be relied on.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticleStore {
    /// Create an empty store holding at most `capacity` particles.
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of live particles.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current live count.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particles are alive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// True when another insert would be dropped.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Free slots left.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.particles.len())
    }

    /// Insert a particle. Returns false, leaving the store unchanged, when full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Live particles in current (unstable) order.
    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Iterate live particles.
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Update every particle in place and swap-remove those `f` reports dead.
    ///
    /// Returns the number retired. A particle moved into a vacated slot is
    /// still visited in the same pass.
    pub fn update_retain<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&mut Particle) -> bool,
    {
        let mut retired = 0;
        let mut i = 0;
        while i < self.particles.len() {
            if f(&mut self.particles[i]) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
                retired += 1;
            }
        }
        retired
    }

    /// Remove every particle, keeping the allocation.
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
