//! Camera-facing quad expansion.
//!
//! The vertex shader in `steam.wgsl` expands each instance into a four-vertex
//! triangle strip. [`expand_billboard`] performs the same expansion on the CPU
//! and must be kept in step with `vs_main`.

use super::particle::ParticleVertex;
use crate::math::Vector3;

/// Strip corner signs: lower-left, lower-right, upper-left, upper-right.
pub const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];

/// Texture coordinates matching [`QUAD_CORNERS`].
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Vertices emitted per particle.
pub const VERTICES_PER_BILLBOARD: u32 = 4;

/// One expanded corner, as handed to the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardVertex {
    /// World-space corner position.
    pub position: Vector3,
    /// Quad texture coordinate.
    pub uv: [f32; 2],
    /// Normalized remaining life, identical on all four corners.
    pub life: f32,
}

/// Expand one particle tuple into its four strip vertices.
///
/// `right` and `up` are the camera's world-space axes.
pub fn expand_billboard(vertex: &ParticleVertex, right: Vector3, up: Vector3) -> [BillboardVertex; 4] {
    let anchor = Vector3::from_array(vertex.position);
    let size = vertex.size;

    std::array::from_fn(|i| {
        let [sx, sy] = QUAD_CORNERS[i];
        BillboardVertex {
            position: anchor + right * (sx * size) + up * (sy * size),
            uv: QUAD_UVS[i],
            life: vertex.life,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{PerspectiveCamera, ViewProjection};

    fn tuple() -> ParticleVertex {
        ParticleVertex {
            position: [0.6, 1.5, -0.2],
            life: 0.7,
            size: 0.08,
        }
    }

    #[test]
    fn test_each_sign_combination_once() {
        let v = tuple();
        let anchor = Vector3::from_array(v.position);
        let right = Vector3::UNIT_X;
        let up = Vector3::UNIT_Y;
        let corners = expand_billboard(&v, right, up);

        let mut seen = [[false; 2]; 2];
        for corner in &corners {
            let offset = corner.position - anchor;
            let sx = offset.dot(&right) / v.size;
            let sy = offset.dot(&up) / v.size;
            assert!((sx.abs() - 1.0).abs() < 1e-5);
            assert!((sy.abs() - 1.0).abs() < 1e-5);

            let slot = &mut seen[(sx > 0.0) as usize][(sy > 0.0) as usize];
            assert!(!*slot, "duplicate corner {sx} {sy}");
            *slot = true;
        }
        assert!(seen.iter().flatten().all(|s| *s));
    }

    #[test]
    fn test_strip_order_and_uvs() {
        let corners = expand_billboard(&tuple(), Vector3::UNIT_X, Vector3::UNIT_Y);
        // LL, LR, UL, UR
        assert!(corners[0].position.x < corners[1].position.x);
        assert!(corners[0].position.y < corners[2].position.y);
        assert!(corners[3].position.x > corners[2].position.x);
        assert_eq!(corners[0].uv, [0.0, 0.0]);
        assert_eq!(corners[3].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_life_is_broadcast() {
        for corner in expand_billboard(&tuple(), Vector3::UNIT_X, Vector3::UNIT_Y) {
            assert_eq!(corner.life, 0.7);
        }
    }

    #[test]
    fn test_quad_faces_the_camera() {
        let camera = PerspectiveCamera::new(45.0, 16.0 / 9.0, 0.1, 100.0);
        let (right, up) = camera.billboard_axes();
        let corners = expand_billboard(&tuple(), right, up);

        let edge_a = corners[1].position - corners[0].position;
        let edge_b = corners[2].position - corners[0].position;
        let normal = edge_a.cross(&edge_b).normalized();
        let forward = camera.forward();
        assert!(normal.dot(&forward).abs() > 0.999);
    }
}
