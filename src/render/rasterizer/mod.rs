//! Triangle rasterization.
//!
//! A [`Rasterizer`] turns one [`RenderTriangle`] into depth-tested pixel
//! writes on a [`RenderTarget`], calling a [`PixelShader`] for every pixel
//! that survives the depth test.
//!
//! Available algorithms:
//! - [`ScanlineRasterizer`]: flat-top/flat-bottom decomposition

mod scanline;
mod shader;

pub use scanline::{split_vertex, ScanlineRasterizer, SplitVertex};
pub use shader::{PhongShader, PixelShader};

use super::framebuffer::RenderTarget;
use super::triangle::RenderTriangle;

/// Which scan path a triangle went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPath {
    /// Window-space area below the validity threshold; nothing drawn.
    Skipped,
    /// The two top vertices share a row.
    FlatTop,
    /// The two bottom vertices share a row.
    FlatBottom,
    /// Split at the middle vertex into a flat-bottom and a flat-top half.
    Split,
}

impl std::fmt::Display for FillPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillPath::Skipped => write!(f, "Skipped"),
            FillPath::FlatTop => write!(f, "FlatTop"),
            FillPath::FlatBottom => write!(f, "FlatBottom"),
            FillPath::Split => write!(f, "Split"),
        }
    }
}

/// Result of filling one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    pub path: FillPath,
    /// Pixels that passed the depth test and were shaded.
    pub pixels_written: usize,
}

impl FillOutcome {
    pub const SKIPPED: Self = Self {
        path: FillPath::Skipped,
        pixels_written: 0,
    };
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors decide which pixels a triangle covers. Depth testing and
/// the write itself go through [`RenderTarget::set_pixel_with_depth`], and
/// colors come from the shader.
pub trait Rasterizer {
    /// Fill `triangle` into `target`.
    ///
    /// Triangles that fail the validity check are skipped and reported as
    /// [`FillPath::Skipped`].
    fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &RenderTriangle,
        target: &mut RenderTarget<'_>,
        shader: &S,
    ) -> FillOutcome;
}
