//! Steam particle module.
//!
//! The simulation runs on the CPU: an [`Emitter`] injects particles into a
//! fixed-capacity [`ParticleStore`], the [`Integrator`] moves and retires them,
//! and a [`TransferBuffer`] serializes the survivors each frame. The
//! [`ParticleSystem`] streams that buffer to the GPU, where `steam.wgsl`
//! expands every particle into a camera-facing soft sprite.

mod billboard;
mod emitter;
mod forces;
mod gpu_resources;
mod integrator;
mod particle;
mod particle_system;
mod shading;
mod simulation;
mod store;
mod transfer;

pub use billboard::{expand_billboard, BillboardVertex, QUAD_CORNERS, QUAD_UVS, VERTICES_PER_BILLBOARD};
pub use emitter::{EmitReport, Emitter, EmitterConfig, ParticlePreset};
pub use forces::{EnvironmentConfig, WindWave};
pub use gpu_resources::{CameraUniform, ShadingUniform, SteamGpuResources};
pub use integrator::Integrator;
pub use particle::{Particle, ParticleVertex};
pub use particle_system::ParticleSystem;
pub use shading::ShadingConfig;
pub use simulation::{clamp_step, FrameStats, SteamSimulation};
pub use store::ParticleStore;
pub use transfer::TransferBuffer;
