//! Fixed-dimension vectors tagged as points or directions.
//!
//! A [`Vector`] owns its components in a `[f64; N]` array and exposes them
//! through accessors (`x()`, `y()`, `z()`, indexing). The tag follows affine
//! rules under arithmetic:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | point - point | direction |
//! | point ± direction | point |
//! | point + point | point (affine combinations) |
//! | direction ± direction | direction |
//!
//! Scaling keeps the tag, so `a*P0 + b*P1 + c*P2` stays a point.

use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};

/// Whether a vector denotes a location or a displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorKind {
    Point,
    Direction,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const N: usize> {
    components: [f64; N],
    kind: VectorKind,
}

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;

impl<const N: usize> Vector<N> {
    pub const fn new(components: [f64; N], kind: VectorKind) -> Self {
        Self { components, kind }
    }

    pub const fn kind(&self) -> VectorKind {
        self.kind
    }

    pub const fn components(&self) -> &[f64; N] {
        &self.components
    }

    /// Returns a copy tagged with `kind`.
    pub const fn with_kind(self, kind: VectorKind) -> Self {
        Self::new(self.components, kind)
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    pub fn scale(&self, scalar: f64) -> Self {
        self.map(|c| c * scalar)
    }

    /// Divides by the norm without checking it. A zero vector yields NaNs.
    pub fn normalize(&self) -> Self {
        *self / self.norm()
    }

    /// Like [`normalize`](Self::normalize), but returns `None` when the
    /// norm is non-finite or not above `epsilon`.
    pub fn try_normalize(&self, epsilon: f64) -> Option<Self> {
        let norm = self.norm();
        if norm.is_finite() && norm > epsilon {
            Some(*self / norm)
        } else {
            None
        }
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, other: Self) -> Self {
        let mut components = self.components;
        for (c, o) in components.iter_mut().zip(other.components.iter()) {
            *c *= o;
        }
        Self::new(components, self.kind)
    }

    /// Projection of `self` onto `onto`: `(self·onto / onto·onto) * onto`.
    pub fn project_onto(&self, onto: Self) -> Self {
        onto.scale(self.dot(onto) / onto.dot(onto))
            .with_kind(VectorKind::Direction)
    }

    pub fn is_finite(&self) -> bool {
        self.components.iter().all(|c| c.is_finite())
    }

    /// Component-wise equality within `epsilon`. The kind tag is ignored.
    pub fn approx_eq(&self, other: Self, epsilon: f64) -> bool {
        self.abs_diff_eq(&other, epsilon)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(self.components.map(f), self.kind)
    }

    fn zip_with(&self, other: Self, kind: VectorKind, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut components = self.components;
        for (c, o) in components.iter_mut().zip(other.components.iter()) {
            *c = f(*c, *o);
        }
        Self::new(components, kind)
    }
}

impl Vector<2> {
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new([x, y], VectorKind::Point)
    }

    pub const fn direction(x: f64, y: f64) -> Self {
        Self::new([x, y], VectorKind::Direction)
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.components[0]
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.components[1]
    }
}

impl Vector<3> {
    pub const ZERO: Self = Self::direction(0.0, 0.0, 0.0);
    pub const ORIGIN: Self = Self::point(0.0, 0.0, 0.0);

    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new([x, y, z], VectorKind::Point)
    }

    pub const fn direction(x: f64, y: f64, z: f64) -> Self {
        Self::new([x, y, z], VectorKind::Direction)
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.components[0]
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.components[1]
    }

    #[inline]
    pub const fn z(&self) -> f64 {
        self.components[2]
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self::direction(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.components[index]
    }
}

/// Component-wise addition. Adding anything to a point yields a point.
impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let kind = if self.kind == VectorKind::Point || rhs.kind == VectorKind::Point {
            VectorKind::Point
        } else {
            VectorKind::Direction
        };
        self.zip_with(rhs, kind, |a, b| a + b)
    }
}

/// Component-wise subtraction. Only `point - direction` stays a point.
impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let kind = match (self.kind, rhs.kind) {
            (VectorKind::Point, VectorKind::Direction) => VectorKind::Point,
            _ => VectorKind::Direction,
        };
        self.zip_with(rhs, kind, |a, b| a - b)
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        self.map(|c| c / rhs)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|c| -c)
    }
}

impl<const N: usize> AbsDiffEq for Vector<N> {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> RelativeEq for Vector<N> {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_difference_is_direction() {
        let a = Vec3::point(1.0, 2.0, 3.0);
        let b = Vec3::point(0.0, 1.0, 1.0);
        let d = a - b;
        assert_eq!(d.kind(), VectorKind::Direction);
        assert_eq!(d, Vec3::direction(1.0, 1.0, 2.0));
        assert_eq!((b + d).kind(), VectorKind::Point);
    }

    #[test]
    fn test_cross_is_perpendicular() {
        let a = Vec3::direction(1.0, 2.0, 0.5);
        let b = Vec3::direction(-3.0, 0.0, 4.0);
        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-12);

        let x = Vec3::direction(1.0, 0.0, 0.0);
        let y = Vec3::direction(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::direction(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normalize_and_norm() {
        let v = Vec3::direction(3.0, 0.0, 4.0);
        assert_relative_eq!(v.norm(), 5.0);
        assert_relative_eq!(v.normalize(), Vec3::direction(0.6, 0.0, 0.8), epsilon = 1e-12);
        assert!(Vec3::ZERO.try_normalize(1e-9).is_none());
        assert!(Vec3::direction(f64::NAN, 0.0, 0.0).try_normalize(1e-9).is_none());
    }

    #[test]
    fn test_hadamard_and_projection() {
        let a = Vec3::direction(1.0, 2.0, 3.0);
        let b = Vec3::direction(2.0, 0.5, -1.0);
        assert_eq!(a.hadamard(b), Vec3::direction(2.0, 1.0, -3.0));

        let p = Vec3::direction(0.0, 0.0, 1.0).project_onto(Vec3::direction(-1.0, -1.0, -1.0));
        assert_relative_eq!(p, Vec3::direction(1.0, 1.0, 1.0) / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_approx_eq_ignores_kind() {
        let a = Vec2::point(1.0, 2.0);
        let b = Vec2::direction(1.0 + 1e-9, 2.0);
        assert!(a.approx_eq(b, 1e-6));
        assert!(!a.approx_eq(Vec2::point(1.1, 2.0), 1e-6));
    }
}
