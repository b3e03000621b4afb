//! Particle records: the CPU simulation state and the streamed GPU tuple.

use bytemuck::{Pod, Zeroable};

use crate::math::Vector3;

/// One simulated steam puff.
///
/// Has no identity beyond its slot in the store; slots are reused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World position; `y` is height.
    pub position: Vector3,
    /// Velocity in units per second.
    pub velocity: Vector3,
    /// Seconds left before retirement.
    pub remaining_life: f32,
    /// Lifetime drawn at spawn, in seconds.
    pub total_lifetime: f32,
    /// Billboard half-extent.
    pub size: f32,
}

impl Particle {
    /// Create a freshly spawned particle with full life.
    pub fn new(position: Vector3, velocity: Vector3, lifetime: f32, size: f32) -> Self {
        Self {
            position,
            velocity,
            remaining_life: lifetime,
            total_lifetime: lifetime,
            size,
        }
    }

    /// Remaining life as a fraction of total lifetime, in [0, 1].
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        if self.total_lifetime > 0.0 {
            (self.remaining_life / self.total_lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether the particle is still alive under the given height ceiling.
    #[inline]
    pub fn is_alive(&self, ceiling: f32) -> bool {
        self.remaining_life > 0.0 && self.position.y <= ceiling
    }

    /// Pack into the per-instance tuple streamed to the billboard stage.
    #[inline]
    pub fn to_vertex(&self) -> ParticleVertex {
        ParticleVertex {
            position: self.position.to_array(),
            life: self.life_fraction(),
            size: self.size,
        }
    }
}

/// Per-particle tuple in the transfer buffer (20 bytes, tightly packed).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ParticleVertex {
    /// Billboard anchor in world space.
    pub position: [f32; 3],
    /// Normalized remaining life (1 = just spawned, 0 = expiring).
    pub life: f32,
    /// Billboard half-extent.
    pub size: f32,
}

impl ParticleVertex {
    /// Byte size of one tuple.
    pub const SIZE: wgpu::BufferAddress = std::mem::size_of::<Self>() as wgpu::BufferAddress;

    /// Vertex attributes, stepped once per instance.
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        // anchor
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        // life
        wgpu::VertexAttribute {
            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32,
        },
        // size
        wgpu::VertexAttribute {
            offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32,
        },
    ];

    /// Buffer layout: one tuple per instance, four vertices expanded in the shader.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(ParticleVertex::SIZE, 20);
    }

    #[test]
    fn test_life_fraction_is_normalized() {
        let mut p = Particle::new(Vector3::ZERO, Vector3::ZERO, 2.0, 0.05);
        assert_eq!(p.life_fraction(), 1.0);
        p.remaining_life = 0.5;
        assert!((p.life_fraction() - 0.25).abs() < 1e-6);
        p.remaining_life = -0.1;
        assert_eq!(p.life_fraction(), 0.0);
    }

    #[test]
    fn test_alive_requires_life_and_height() {
        let mut p = Particle::new(Vector3::new(0.0, 1.0, 0.0), Vector3::ZERO, 1.0, 0.05);
        assert!(p.is_alive(2.0));
        assert!(!p.is_alive(0.5));
        p.remaining_life = 0.0;
        assert!(!p.is_alive(2.0));
    }

    #[test]
    fn test_to_vertex() {
        let mut p = Particle::new(Vector3::new(1.0, 2.0, 3.0), Vector3::ZERO, 4.0, 0.1);
        p.remaining_life = 1.0;
        let v = p.to_vertex();
        assert_eq!(v.position, [1.0, 2.0, 3.0]);
        assert!((v.life - 0.25).abs() < 1e-6);
        assert_eq!(v.size, 0.1);
    }
}
