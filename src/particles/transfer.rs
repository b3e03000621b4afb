//! CPU side of the streaming upload: the capacity-sized transfer region.

use super::particle::ParticleVertex;
use super::store::ParticleStore;

/// Capacity-sized staging region rewritten in full every frame.
///
/// Holds the serialized tuples together with the live count, so the draw
/// count is never taken from anywhere else.
#[derive(Debug, Clone)]
pub struct TransferBuffer {
    tuples: Vec<ParticleVertex>,
    live: usize,
}

impl TransferBuffer {
    /// Allocate a zeroed region for `capacity` tuples.
    pub fn new(capacity: usize) -> Self {
        Self {
            tuples: vec![ParticleVertex::default(); capacity],
            live: 0,
        }
    }

    /// Tuples the region can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tuples.len()
    }

    /// Tuples written by the last [`serialize`](Self::serialize).
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Instance count for the draw call.
    #[inline]
    pub fn instance_count(&self) -> u32 {
        self.live as u32
    }

    /// Overwrite the region from the store's current contents.
    ///
    /// Writes one tuple per live particle in store order, at most `capacity`,
    /// and zeroes tuples left over from a larger previous frame.
    pub fn serialize(&mut self, store: &ParticleStore) -> usize {
        let count = store.len().min(self.tuples.len());

        for (slot, particle) in self.tuples.iter_mut().zip(store.iter()).take(count) {
            *slot = particle.to_vertex();
        }
        if self.live > count {
            self.tuples[count..self.live].fill(ParticleVertex::default());
        }

        self.live = count;
        count
    }

    /// Only the meaningful tuples.
    #[inline]
    pub fn live_tuples(&self) -> &[ParticleVertex] {
        &self.tuples[..self.live]
    }

    /// The whole capacity-sized region as bytes, for a full rewrite.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tuples)
    }

    /// Byte size of the whole region.
    #[inline]
    pub fn byte_size(&self) -> wgpu::BufferAddress {
        self.tuples.len() as wgpu::BufferAddress * ParticleVertex::SIZE
    }
}
