//! Soft-sprite shading parameters and the CPU mirror of `fs_main`.

use serde::{Deserialize, Serialize};

use crate::math::{mix3, smoothstep};

/// Fragment shading parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Color of freshly emitted steam.
    pub young_color: [f32; 3],
    /// Color steam fades toward as it ages.
    pub old_color: [f32; 3],
    /// Global opacity multiplier.
    pub intensity: f32,
    /// Radius inside which the sprite is fully opaque (0 to 0.5).
    pub inner_radius: f32,
    /// Exponent applied to the radial falloff; below 1 widens the soft core.
    pub falloff_exponent: f32,
    /// Exponent shaping the fade-out over the particle's life.
    pub fade_exponent: f32,
    /// Fragments below this alpha are discarded.
    pub discard_threshold: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            young_color: [0.9, 0.95, 1.0],
            old_color: [0.85, 0.88, 0.92],
            intensity: 0.85,
            inner_radius: 0.0,
            falloff_exponent: 0.6,
            fade_exponent: 1.6,
            discard_threshold: 0.01,
        }
    }
}

impl ShadingConfig {
    /// Radial opacity for a fragment at distance `d` from the quad center.
    ///
    /// 1 at the center, 0 at and beyond the inscribed circle.
    #[inline]
    pub fn soft_falloff(&self, d: f32) -> f32 {
        smoothstep(0.5, self.inner_radius, d).powf(self.falloff_exponent)
    }

    /// Opacity from normalized remaining life; reaches 0 as life reaches 0.
    #[inline]
    pub fn life_alpha(&self, life: f32) -> f32 {
        let age = 1.0 - life.clamp(0.0, 1.0);
        1.0 - age.powf(self.fade_exponent)
    }

    /// Shade one fragment. Returns `None` where the shader would discard.
    pub fn shade_fragment(&self, uv: [f32; 2], life: f32) -> Option<[f32; 4]> {
        let dx = uv[0] - 0.5;
        let dy = uv[1] - 0.5;
        let d = (dx * dx + dy * dy).sqrt();

        let alpha = self.soft_falloff(d) * self.life_alpha(life) * self.intensity;
        if alpha < self.discard_threshold {
            return None;
        }

        let [r, g, b] = mix3(self.old_color, self.young_color, life.clamp(0.0, 1.0));
        Some([r, g, b, alpha])
    }
}
