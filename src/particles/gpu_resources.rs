//! GPU buffer management for the steam renderer.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::particle::ParticleVertex;
use super::shading::ShadingConfig;
use super::transfer::TransferBuffer;
use crate::camera::ViewProjection;

/// GPU buffers for one steam plume.
pub struct SteamGpuResources {
    /// Capacity-sized instance buffer, rewritten in full every frame.
    pub vertex_buffer: wgpu::Buffer,
    /// View-projection and billboard axes.
    pub camera_buffer: wgpu::Buffer,
    /// Fragment shading parameters.
    pub shading_buffer: wgpu::Buffer,
    /// Tuples the vertex buffer holds.
    pub capacity: u32,
}

impl SteamGpuResources {
    /// Allocate buffers for `capacity` particles.
    pub fn new(device: &wgpu::Device, capacity: u32, shading: &ShadingConfig) -> Self {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Steam Vertex Buffer"),
            size: capacity as wgpu::BufferAddress * ParticleVertex::SIZE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Steam Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shading_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Steam Shading Buffer"),
            contents: bytemuck::cast_slice(&[ShadingUniform::from(shading)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            vertex_buffer,
            camera_buffer,
            shading_buffer,
            capacity,
        }
    }

    /// Replace the whole instance buffer with this frame's tuples.
    ///
    /// The write is staged by the queue and lands before the next submit, so
    /// the previous frame's draw never sees a half-written region.
    pub fn upload(&self, queue: &wgpu::Queue, transfer: &TransferBuffer) {
        debug_assert_eq!(transfer.capacity() as u32, self.capacity);
        queue.write_buffer(&self.vertex_buffer, 0, transfer.as_bytes());
    }

    /// Update the camera uniform.
    pub fn write_camera(&self, queue: &wgpu::Queue, camera: &impl ViewProjection) {
        let uniform = CameraUniform::from_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

/// Camera uniform data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// Projection * view, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// Camera right vector (xyz) for billboarding, w=unused.
    pub camera_right: [f32; 4],
    /// Camera up vector (xyz) for billboarding, w=unused.
    pub camera_up: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_proj: crate::math::Matrix4::IDENTITY.to_cols_array_2d(),
            camera_right: [1.0, 0.0, 0.0, 0.0],
            camera_up: [0.0, 1.0, 0.0, 0.0],
        }
    }
}

impl CameraUniform {
    /// Capture the current view.
    pub fn from_camera(camera: &impl ViewProjection) -> Self {
        let (right, up) = camera.billboard_axes();
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_right: right.extend(0.0),
            camera_up: up.extend(0.0),
        }
    }
}

/// Shading uniform data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadingUniform {
    /// Young color (rgb), w=intensity.
    pub young_color: [f32; 4],
    /// Old color (rgb), w=discard threshold.
    pub old_color: [f32; 4],
    /// x=inner radius, y=falloff exponent, z=fade exponent, w=unused.
    pub params: [f32; 4],
}

impl From<&ShadingConfig> for ShadingUniform {
    fn from(config: &ShadingConfig) -> Self {
        let [yr, yg, yb] = config.young_color;
        let [or, og, ob] = config.old_color;
        Self {
            young_color: [yr, yg, yb, config.intensity],
            old_color: [or, og, ob, config.discard_threshold],
            params: [config.inner_radius, config.falloff_exponent, config.fade_exponent, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::math::Vector3;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 96);
        assert_eq!(std::mem::size_of::<ShadingUniform>(), 48);
    }

    #[test]
    fn test_camera_uniform_carries_billboard_axes() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0);
        camera.set_position(Vector3::new(0.0, 0.0, 5.0));
        let uniform = CameraUniform::from_camera(&camera);
        assert!((uniform.camera_right[0] - 1.0).abs() < 1e-6);
        assert!((uniform.camera_up[1] - 1.0).abs() < 1e-6);
        assert_eq!(uniform.camera_right[3], 0.0);
    }

    #[test]
    fn test_shading_uniform_packing() {
        let shading = ShadingConfig::default();
        let uniform = ShadingUniform::from(&shading);
        assert_eq!(uniform.young_color[3], shading.intensity);
        assert_eq!(uniform.old_color[3], shading.discard_threshold);
        assert_eq!(uniform.params[1], shading.falloff_exponent);
        assert_eq!(uniform.params[2], shading.fade_exponent);
    }
}
