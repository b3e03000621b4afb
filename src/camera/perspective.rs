//! Perspective camera.

use super::{CameraConfig, ViewProjection};
use crate::math::{deg_to_rad, Matrix4, Vector3};

/// A perspective projection camera.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Field of view in degrees.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera position.
    pub position: Vector3,
    /// Camera target (look-at point).
    pub target: Vector3,
    /// Up vector.
    pub up: Vector3,
    view_matrix: Matrix4,
    projection_matrix: Matrix4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(60.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vector3::new(0.0, 0.0, 5.0),
            target: Vector3::ZERO,
            up: Vector3::UP,
            view_matrix: Matrix4::IDENTITY,
            projection_matrix: Matrix4::IDENTITY,
        };
        camera.update_matrices();
        camera
    }

    /// Build a camera from startup configuration.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.fov, aspect, config.near, config.far);
        camera.position = Vector3::from_array(config.position);
        camera.target = Vector3::from_array(config.target);
        camera.update_matrices();
        camera
    }

    /// Set the camera position.
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.update_matrices();
    }

    /// Look at a target from the current position.
    pub fn look_at(&mut self, target: Vector3) {
        self.target = target;
        self.update_matrices();
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_matrices();
    }

    /// Recompute view and projection.
    pub fn update_matrices(&mut self) {
        self.view_matrix = Matrix4::look_at(&self.position, &self.target, &self.up);
        self.projection_matrix =
            Matrix4::perspective(deg_to_rad(self.fov), self.aspect, self.near, self.far);
    }

    /// Get the forward direction.
    pub fn forward(&self) -> Vector3 {
        (self.target - self.position).normalized()
    }
}

impl ViewProjection for PerspectiveCamera {
    fn view_matrix(&self) -> Matrix4 {
        self.view_matrix
    }

    fn projection_matrix(&self) -> Matrix4 {
        self.projection_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_chimney_view() {
        let camera = PerspectiveCamera::from_config(&CameraConfig::default(), 800.0 / 600.0);
        assert_eq!(camera.position, Vector3::new(4.0, 3.0, 6.0));
        assert_eq!(camera.fov, 45.0);
    }

    #[test]
    fn test_billboard_axes_follow_camera() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0);
        camera.set_position(Vector3::new(0.0, 0.0, 5.0));
        let (right, up) = camera.billboard_axes();
        assert!(right.approx_eq(&Vector3::UNIT_X, 1e-6));
        assert!(up.approx_eq(&Vector3::UNIT_Y, 1e-6));

        // Move to the side; right rotates with the camera while up stays vertical.
        camera.set_position(Vector3::new(5.0, 0.0, 0.0));
        let (right, up) = camera.billboard_axes();
        assert!(right.approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(up.approx_eq(&Vector3::UNIT_Y, 1e-6));
        assert!(right.dot(&camera.forward()).abs() < 1e-6);
    }
}
