//! Linear algebra primitives: tagged vectors and 3x3 matrices.

pub mod mat3;
pub mod vector;

pub use mat3::Mat3;
pub use vector::{Vec2, Vec3, Vector, VectorKind};
