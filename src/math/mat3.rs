//! 3x3 matrix used for camera basis changes.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat3 * Vec3`
//! - `data[row][col]`
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A

use std::ops::Mul;

use super::vector::{Vec3, Vector};

/// Determinants at or below this magnitude are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f64; 3]; 3],
}

impl Mat3 {
    pub const fn new(data: [[f64; 3]; 3]) -> Self {
        Mat3 { data }
    }

    pub const fn identity() -> Self {
        Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Builds a matrix whose rows are `r0`, `r1`, `r2`.
    ///
    /// The vectors are consumed; the matrix is their only owner afterwards.
    pub fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Mat3::new([*r0.components(), *r1.components(), *r2.components()])
    }

    /// Returns row `index` as a direction.
    pub fn row(&self, index: usize) -> Vec3 {
        Vec3::direction(self.data[index][0], self.data[index][1], self.data[index][2])
    }

    /// Determinant by the rule of Sarrus.
    pub fn determinant(&self) -> f64 {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.data;
        a * e * i + b * f * g + c * d * h - c * e * g - b * d * i - a * f * h
    }

    /// Closed-form inverse: the transposed cofactor matrix divided by the
    /// determinant. Returns `None` when `|det| <= SINGULAR_EPSILON`.
    pub fn inverse(&self) -> Option<Mat3> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= SINGULAR_EPSILON {
            return None;
        }

        let [[a, b, c], [d, e, f], [g, h, i]] = self.data;

        // Cofactors
        let c00 = e * i - f * h;
        let c01 = -(d * i - f * g);
        let c02 = d * h - e * g;
        let c10 = -(b * i - c * h);
        let c11 = a * i - c * g;
        let c12 = -(a * h - b * g);
        let c20 = b * f - c * e;
        let c21 = -(a * f - c * d);
        let c22 = a * e - b * d;

        let inv_det = 1.0 / det;
        Some(Mat3::new([
            [c00 * inv_det, c10 * inv_det, c20 * inv_det],
            [c01 * inv_det, c11 * inv_det, c21 * inv_det],
            [c02 * inv_det, c12 * inv_det, c22 * inv_det],
        ]))
    }

    /// Element-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Mat3, epsilon: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f64; 3]; 3];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }

        Mat3::new(result)
    }
}

/// Transform a vector: Mat3 * Vec3 (column vector). The kind tag is kept.
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let m = &self.data;
        Vector::new(
            [
                m[0][0] * v.x() + m[0][1] * v.y() + m[0][2] * v.z(),
                m[1][0] * v.x() + m[1][1] * v.y() + m[1][2] * v.z(),
                m[2][0] * v.x() + m[2][1] * v.y() + m[2][2] * v.z(),
            ],
            v.kind(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inverse_of_general_matrix() {
        let m = Mat3::new([[2.0, 0.0, 1.0], [1.0, 3.0, 0.0], [0.0, 1.0, 4.0]]);
        let inv = m.inverse().expect("matrix is invertible");
        assert!((m * inv).approx_eq(&Mat3::identity(), 1e-12));
        assert!((inv * m).approx_eq(&Mat3::identity(), 1e-12));
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let m = Mat3::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert_relative_eq!(m.determinant(), 0.0);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_from_rows_and_vector_product() {
        let m = Mat3::from_rows(
            Vec3::direction(1.0, 0.0, 0.0),
            Vec3::direction(0.0, 0.0, 1.0),
            Vec3::direction(0.0, -1.0, 0.0),
        );
        assert_eq!(m.row(1), Vec3::direction(0.0, 0.0, 1.0));
        let v = m * Vec3::point(1.0, 2.0, 3.0);
        assert_eq!(v, Vec3::point(1.0, 3.0, -2.0));
    }
}
