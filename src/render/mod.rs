//! Rasterization pipeline.
//!
//! Triangle setup, barycentric interpolation, scan conversion, shading and
//! the color/depth grids they write into.

pub mod barycentric;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod triangle;

pub use barycentric::{is_valid_triangle, Barycentric};
pub use framebuffer::{DepthBuffer, FrameBuffer, RenderTarget};
pub use rasterizer::{
    FillOutcome, FillPath, PhongShader, PixelShader, Rasterizer, ScanlineRasterizer,
};
pub use renderer::{RenderStats, Renderer};
pub use triangle::{build_render_triangles, smooth_vertex_normals, RenderTriangle};
