//! Lighting parameters for the Phong reflection model.

use crate::math::Vec3;

/// A single point light plus the surface reflection coefficients.
///
/// Colors are RGB triples on the 0..=255 scale. `diffuse_coefficient` (`kd`)
/// and `diffuse_color` (`od`) are kept apart and multiplied element-wise when
/// shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Ambient light color `Ia`.
    pub ambient_color: Vec3,
    /// Ambient reflection coefficient `ka`.
    pub ambient_coefficient: f64,
    /// Point light color `Il`.
    pub local_color: Vec3,
    /// Point light position `Pl`, in camera space.
    pub position: Vec3,
    /// Diffuse reflection coefficient `kd`.
    pub diffuse_coefficient: Vec3,
    /// Surface diffuse color `od`.
    pub diffuse_color: Vec3,
    /// Specular reflection coefficient `ks`.
    pub specular_coefficient: f64,
    /// Shininess exponent `eta`.
    pub shininess: f64,
}

impl Light {
    /// `kd ⊙ od`, the per-channel diffuse albedo.
    pub fn diffuse_albedo(&self) -> Vec3 {
        self.diffuse_coefficient.hadamard(self.diffuse_color)
    }
}

impl Default for Light {
    /// A white light above and to the left of the eye over a grey surface.
    fn default() -> Self {
        Self {
            ambient_color: Vec3::direction(100.0, 100.0, 100.0),
            ambient_coefficient: 0.2,
            local_color: Vec3::direction(255.0, 255.0, 255.0),
            position: Vec3::point(-200.0, 200.0, -100.0),
            diffuse_coefficient: Vec3::direction(0.8, 0.8, 0.8),
            diffuse_color: Vec3::direction(0.7, 0.7, 0.7),
            specular_coefficient: 0.5,
            shininess: 8.0,
        }
    }
}
