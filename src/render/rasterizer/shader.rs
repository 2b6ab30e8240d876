//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer decides coverage and visibility; a [`PixelShader`] only
//! turns an interpolated camera-space surface sample into a color. Shaders
//! are evaluated lazily, after the depth test has passed.
//!
//! # Phong Reflection
//!
//! [`PhongShader`] evaluates, with the eye at the camera-space origin:
//!
//! ```text
//! V = normalize(-P)                 (flip N if V·N <= 0)
//! L = normalize(Pl - P)
//! R = normalize(2(N·L)N - L)
//!
//! I = ka·Ia + clamp((N·L)·kd⊙od⊙Il) + ks·(R·V)^eta·Il
//! ```
//!
//! The diffuse and specular terms are dropped when the light is behind the
//! surface (`N·L <= 1e-3`); the specular term is also dropped when
//! `R·V < 0`.

use crate::colors::{clamp_channels, Color};
use crate::light::Light;
use crate::math::{Vec3, VectorKind};

/// `N·L` at or below this means the light does not reach the surface.
pub const DIFFUSE_EPSILON: f64 = 1e-3;

/// Trait for per-pixel shading computations.
pub trait PixelShader {
    /// Color of the surface at camera-space `position` with unit `normal`.
    fn shade(&self, position: Vec3, normal: Vec3) -> Color;
}

/// Phong reflection with a single point light.
#[derive(Debug, Clone, Copy)]
pub struct PhongShader<'a> {
    light: &'a Light,
}

impl<'a> PhongShader<'a> {
    pub fn new(light: &'a Light) -> Self {
        Self { light }
    }

    /// `ka·Ia`.
    #[inline]
    fn ambient(&self) -> Vec3 {
        self.light.ambient_color * self.light.ambient_coefficient
    }

    /// `(N·L)·kd⊙od⊙Il`, clamped per channel.
    #[inline]
    fn diffuse(&self, n_dot_l: f64) -> Vec3 {
        let light = self.light;
        clamp_channels(
            light
                .diffuse_albedo()
                .hadamard(light.local_color)
                .scale(n_dot_l),
        )
    }

    /// `ks·(R·V)^eta·Il`.
    #[inline]
    fn specular(&self, r_dot_v: f64) -> Vec3 {
        let light = self.light;
        light.local_color * (light.specular_coefficient * r_dot_v.powf(light.shininess))
    }
}

impl PixelShader for PhongShader<'_> {
    fn shade(&self, position: Vec3, normal: Vec3) -> Color {
        let view = (-position).normalize().with_kind(VectorKind::Direction);
        let normal = if view.dot(normal) <= 0.0 { -normal } else { normal };

        let to_light = (self.light.position - position).normalize();
        let n_dot_l = normal.dot(to_light);

        let mut intensity = self.ambient();
        if n_dot_l > DIFFUSE_EPSILON {
            intensity = intensity + self.diffuse(n_dot_l);

            let reflected = (normal * (2.0 * n_dot_l) - to_light).normalize();
            let r_dot_v = reflected.dot(view);
            if r_dot_v >= 0.0 {
                intensity = intensity + self.specular(r_dot_v);
            }
        }

        Color::from_channels(intensity)
    }
}
