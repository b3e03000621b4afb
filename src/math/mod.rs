//! # Math Module
//!
//! The small slice of 3D math the steam pipeline needs: a plain `Vector3`,
//! a column-major `Matrix4` for view/projection, and scalar helpers that the
//! WGSL shaders mirror (`smoothstep`, `mix`).
//!
//! Both types convert to and from `glam` so callers can use either.

mod matrix4;
mod vector3;

pub use matrix4::Matrix4;
pub use vector3::Vector3;

/// Common math constants.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f32 = PI / 180.0;
    /// Small epsilon for floating point comparisons.
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * consts::DEG2RAD
}

/// Clamp a value between min and max.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear blend of two RGB colors, same as WGSL `mix`.
#[inline]
pub fn mix3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

/// Hermite smooth step, matching the WGSL builtin.
///
/// `edge0` may be greater than `edge1`, which yields a falling curve.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_rising() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < consts::EPSILON);
    }

    #[test]
    fn test_smoothstep_falling() {
        // Reversed edges give 1 at the inner edge and 0 at the outer edge.
        assert_eq!(smoothstep(0.5, 0.25, 0.1), 1.0);
        assert_eq!(smoothstep(0.5, 0.25, 0.6), 0.0);
        let mid = smoothstep(0.5, 0.25, 0.375);
        assert!((mid - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_deg_to_rad() {
        assert_eq!(deg_to_rad(0.0), 0.0);
        assert!((deg_to_rad(180.0) - consts::PI).abs() < consts::EPSILON);
        assert!((deg_to_rad(45.0) - 45f32.to_radians()).abs() < consts::EPSILON);
    }

    #[test]
    fn test_mix3() {
        let c = mix3([0.0, 0.0, 0.0], [1.0, 0.5, 0.2], 0.5);
        assert!((c[0] - 0.5).abs() < consts::EPSILON);
        assert!((c[1] - 0.25).abs() < consts::EPSILON);
        assert!((c[2] - 0.1).abs() < consts::EPSILON);
    }
}
