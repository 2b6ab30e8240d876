//! Barycentric weights in window space.
//!
//! Weights are solved against the window-space footprint of a triangle and
//! then used to blend its camera-space attributes. Writing
//! `P - W0 = β·(W1 - W0) + α·(W2 - W0)` gives the vertex correspondence:
//!
//! | Weight | Vertex |
//! |--------|--------|
//! | `γ = 1 - α - β` | 0 |
//! | `β` | 1 |
//! | `α` | 2 |
//!
//! Interpolating at a vertex therefore reproduces that vertex exactly.
//!
//! Interpolation in window space is not perspective-correct.

use super::triangle::RenderTriangle;
use crate::math::{Vec2, Vec3, VectorKind};

/// Minimum window-space area, in pixels, for a triangle to be rasterized.
pub const VALID_AREA_EPSILON: f64 = 0.01;

/// Barycentric weights of a window-space point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Barycentric {
    /// Solves for the weights of `point` against the window footprint of
    /// `triangle`.
    ///
    /// The triangle must pass [`is_valid_triangle`]; the system is singular
    /// otherwise.
    pub fn from_window(point: Vec2, triangle: &RenderTriangle) -> Self {
        let [w0, w1, w2] = triangle.window;
        let v0 = w1 - w0;
        let v1 = w2 - w0;
        let v2 = point - w0;

        let d00 = v0.dot(v0);
        let d01 = v0.dot(v1);
        let d11 = v1.dot(v1);
        let d20 = v2.dot(v0);
        let d21 = v2.dot(v1);
        let denom = d00 * d11 - d01 * d01;

        let alpha = (d00 * d21 - d01 * d20) / denom;
        let beta = (d11 * d20 - d01 * d21) / denom;
        let weights = Self {
            alpha,
            beta,
            gamma: 1.0 - alpha - beta,
        };
        debug_assert!(
            weights.is_finite(),
            "non-finite barycentric weights {weights:?} for {point:?}"
        );
        weights
    }

    pub fn is_finite(&self) -> bool {
        self.alpha.is_finite() && self.beta.is_finite() && self.gamma.is_finite()
    }

    pub fn sum(&self) -> f64 {
        self.alpha + self.beta + self.gamma
    }

    /// Weighted combination `γ·X0 + β·X1 + α·X2`.
    #[inline]
    pub fn blend(&self, values: &[Vec3; 3]) -> Vec3 {
        values[0] * self.gamma + values[1] * self.beta + values[2] * self.alpha
    }

    /// Camera-space position at these weights.
    #[inline]
    pub fn interpolate_position(&self, triangle: &RenderTriangle) -> Vec3 {
        self.blend(&triangle.camera).with_kind(VectorKind::Point)
    }

    /// Renormalized camera-space vertex normal at these weights.
    #[inline]
    pub fn interpolate_normal(&self, triangle: &RenderTriangle) -> Vec3 {
        self.blend(&triangle.normals)
            .normalize()
            .with_kind(VectorKind::Direction)
    }
}

/// Signed area of the 2-D triangle `abc`; positive for counter-clockwise
/// winding in a Y-up frame.
#[inline]
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (a.x() * (b.y() - c.y()) + b.x() * (c.y() - a.y()) + c.x() * (a.y() - b.y())) / 2.0
}

/// Whether `abc` has a finite area above [`VALID_AREA_EPSILON`].
pub fn is_valid_triangle(a: Vec2, b: Vec2, c: Vec2) -> bool {
    let area = signed_area(a, b, c).abs();
    area.is_finite() && area > VALID_AREA_EPSILON
}
