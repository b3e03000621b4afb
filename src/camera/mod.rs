//! Camera module for view and projection.
//!
//! The steam renderer only consumes a camera through [`ViewProjection`];
//! where the matrices come from is up to the host.

mod perspective;

pub use perspective::PerspectiveCamera;

use serde::{Deserialize, Serialize};

use crate::math::{Matrix4, Vector3};

/// Source of the active view and projection transforms.
pub trait ViewProjection {
    /// World to view transform.
    fn view_matrix(&self) -> Matrix4;

    /// View to clip transform (wgpu 0..1 depth).
    fn projection_matrix(&self) -> Matrix4;

    /// Combined view-projection matrix.
    fn view_projection_matrix(&self) -> Matrix4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space (right, up) axes used to orient billboards.
    fn billboard_axes(&self) -> (Vector3, Vector3) {
        let view = self.view_matrix();
        (view.view_right(), view.view_up())
    }
}

/// Startup camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position.
    pub position: [f32; 3],
    /// Look-at point.
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [4.0, 3.0, 6.0],
            target: [0.0, 0.5, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}
