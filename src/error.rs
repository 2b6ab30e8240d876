//! Errors raised when a render pass cannot start.
//!
//! These are precondition violations: the inputs are inconsistent and no
//! pixel has been written when one is returned.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A basis vector had (near) zero or non-finite length after
    /// orthogonalization, e.g. the up hint is parallel to the view direction.
    #[error("camera basis vector {axis} is degenerate")]
    DegenerateBasis { axis: &'static str },

    /// The assembled basis matrix is not invertible.
    #[error("camera basis is singular (determinant {determinant:e})")]
    SingularBasis { determinant: f64 },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A face's camera or window coordinates are NaN or infinite, e.g. a
    /// vertex lies on the eye plane or the mesh holds non-finite positions.
    #[error("face {face} has non-finite {space}-space coordinates")]
    NonFiniteVertex { face: usize, space: &'static str },

    #[error("framebuffer dimensions must be non-zero (got {width}x{height})")]
    EmptyFramebuffer { width: u32, height: u32 },
}
