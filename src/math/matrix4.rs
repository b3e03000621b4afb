//! 4x4 Matrix implementation.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 4x4 matrix stored in column-major order.
/// Used for the camera's view and projection transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33]
    pub elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.elements[col * 4 + row]
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let f = (*target - *eye).normalized();
        let r = f.cross(up).normalized();
        let u = r.cross(&f);

        // Rotation block is the transpose of the camera basis.
        Self {
            elements: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(eye), -u.dot(eye), f.dot(eye), 1.0,
            ],
        }
    }

    /// Create a perspective projection matrix.
    /// Uses wgpu depth range (0 to 1).
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();

        Self {
            elements: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, far / (near - far), -1.0,
                0.0, 0.0, (near * far) / (near - far), 0.0,
            ],
        }
    }

    /// Multiply this matrix by another (self * other).
    pub fn multiply(&self, other: &Matrix4) -> Self {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4)
                    .map(|k| self.get(row, k) * other.get(k, col))
                    .sum();
            }
        }
        Self { elements: out }
    }

    /// World-space camera right axis: first row of the rotation block.
    ///
    /// For a view matrix this is the direction that maps to +X in view space.
    #[inline]
    pub fn view_right(&self) -> Vector3 {
        Vector3::new(self.get(0, 0), self.get(0, 1), self.get(0, 2))
    }

    /// World-space camera up axis: second row of the rotation block.
    #[inline]
    pub fn view_up(&self) -> Vector3 {
        Vector3::new(self.get(1, 0), self.get(1, 1), self.get(1, 2))
    }

    /// Transform a Vector3 as a point (with translation and perspective divide).
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        let w = 1.0 / (e[3] * v.x + e[7] * v.y + e[11] * v.z + e[15]);
        Vector3 {
            x: (e[0] * v.x + e[4] * v.y + e[8] * v.z + e[12]) * w,
            y: (e[1] * v.x + e[5] * v.y + e[9] * v.z + e[13]) * w,
            z: (e[2] * v.x + e[6] * v.y + e[10] * v.z + e[14]) * w,
        }
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Convert to column-major 2D array (for GPU uniform buffers).
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let e = &self.elements;
        [
            [e[0], e[1], e[2], e[3]],
            [e[4], e[5], e[6], e[7]],
            [e[8], e[9], e[10], e[11]],
            [e[12], e[13], e[14], e[15]],
        ]
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::deg_to_rad;

    fn eye() -> Vector3 {
        Vector3::new(4.0, 3.0, 6.0)
    }

    fn target() -> Vector3 {
        Vector3::new(0.0, 0.5, 0.0)
    }

    #[test]
    fn test_look_at_matches_glam() {
        let ours = Matrix4::look_at(&eye(), &target(), &Vector3::UP);
        let theirs: Matrix4 =
            glam::Mat4::look_at_rh(eye().into(), target().into(), glam::Vec3::Y).into();
        assert!(ours.approx_eq(&theirs, 1e-5));
    }

    #[test]
    fn test_perspective_matches_glam() {
        let ours = Matrix4::perspective(deg_to_rad(45.0), 4.0 / 3.0, 0.1, 100.0);
        let theirs: Matrix4 =
            glam::Mat4::perspective_rh(45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0).into();
        assert!(ours.approx_eq(&theirs, 1e-5));
    }

    #[test]
    fn test_multiply_identity() {
        let v = Matrix4::look_at(&eye(), &target(), &Vector3::UP);
        assert!(v.multiply(&Matrix4::IDENTITY).approx_eq(&v, 1e-6));
        assert!(Matrix4::IDENTITY.multiply(&v).approx_eq(&v, 1e-6));
    }

    #[test]
    fn test_product_matches_glam() {
        let view = Matrix4::look_at(&eye(), &target(), &Vector3::UP);
        let proj = Matrix4::perspective(deg_to_rad(45.0), 4.0 / 3.0, 0.1, 100.0);
        let theirs: Matrix4 = (glam::Mat4::from(proj) * glam::Mat4::from(view)).into();
        assert!((proj * view).approx_eq(&theirs, 1e-5));
        assert_eq!(proj * view, proj.multiply(&view));
    }

    #[test]
    fn test_view_axes_are_orthonormal_and_face_camera() {
        let view = Matrix4::look_at(&eye(), &target(), &Vector3::UP);
        let right = view.view_right();
        let up = view.view_up();
        let to_camera = (eye() - target()).normalized();

        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(&up).abs() < 1e-5);
        // Both axes lie in the plane perpendicular to the view direction.
        assert!(right.dot(&to_camera).abs() < 1e-5);
        assert!(up.dot(&to_camera).abs() < 1e-5);
        // Right-handed: right x up points back at the camera.
        assert!(right.cross(&up).approx_eq(&to_camera, 1e-5));
    }

    #[test]
    fn test_view_axes_map_to_view_space_axes() {
        let view = Matrix4::look_at(&eye(), &target(), &Vector3::UP);
        let origin = view.transform_point(&target());
        let along_right = view.transform_point(&(target() + view.view_right()));
        let along_up = view.transform_point(&(target() + view.view_up()));
        assert!((along_right - origin).approx_eq(&Vector3::UNIT_X, 1e-5));
        assert!((along_up - origin).approx_eq(&Vector3::UNIT_Y, 1e-5));
    }
}
