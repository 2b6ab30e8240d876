//! One full rasterization pass.
//!
//! [`Renderer::render`] runs the whole pipeline for a camera, mesh and light:
//!
//! 1. build the [`SpaceConverter`] for the camera
//! 2. lift every face into a [`RenderTriangle`] with smoothed normals
//! 3. rasterize nearest-first into a fresh framebuffer and depth grid
//!
//! Every precondition is checked before the first pixel is written, so a pass
//! either returns a complete [`FrameBuffer`] or an error.

use std::fmt;

use log::{debug, info};

use super::framebuffer::{DepthBuffer, FrameBuffer, RenderTarget};
use super::rasterizer::{FillPath, PhongShader, PixelShader, Rasterizer, ScanlineRasterizer};
use super::triangle::{build_render_triangles, RenderTriangle};
use crate::camera::Camera;
use crate::colors::{Color, BLACK};
use crate::error::RenderError;
use crate::light::Light;
use crate::mesh::Mesh;
use crate::space::{SpaceConverter, Viewport};

/// Counters collected over one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub triangles: usize,
    /// Rasterized without a split.
    pub flat: usize,
    /// Rasterized as two halves.
    pub split: usize,
    /// Rejected as degenerate.
    pub skipped: usize,
    pub pixels_written: usize,
}

impl RenderStats {
    /// Triangles that reached the scan stage.
    pub fn drawn(&self) -> usize {
        self.flat + self.split
    }

    fn record(&mut self, path: FillPath, pixels_written: usize) {
        self.triangles += 1;
        self.pixels_written += pixels_written;
        match path {
            FillPath::Skipped => self.skipped += 1,
            FillPath::FlatTop | FillPath::FlatBottom => self.flat += 1,
            FillPath::Split => self.split += 1,
        }
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} triangles ({} flat, {} split, {} skipped), {} pixels written",
            self.triangles, self.flat, self.split, self.skipped, self.pixels_written
        )
    }
}

/// Drives a rasterizer over a whole mesh.
#[derive(Debug, Clone)]
pub struct Renderer<R = ScanlineRasterizer> {
    rasterizer: R,
    viewport: Viewport,
    background: Color,
}

impl Renderer<ScanlineRasterizer> {
    /// A scanline renderer for `viewport` on a black background.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_rasterizer(viewport, ScanlineRasterizer::new())
    }
}

impl<R: Rasterizer> Renderer<R> {
    pub fn with_rasterizer(viewport: Viewport, rasterizer: R) -> Self {
        Self {
            rasterizer,
            viewport,
            background: BLACK,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Renders `mesh` as seen from `camera`, lit by `light`.
    ///
    /// Nothing is cached between calls: each pass rebuilds the converter,
    /// the render-triangles and both grids.
    ///
    /// # Errors
    ///
    /// - [`RenderError::EmptyFramebuffer`] for a zero-sized viewport
    /// - [`RenderError::DegenerateBasis`] / [`RenderError::SingularBasis`]
    ///   for an unusable camera
    /// - [`RenderError::VertexIndexOutOfRange`] for a malformed mesh
    /// - [`RenderError::NonFiniteVertex`] for a face with no finite footprint
    pub fn render(
        &self,
        camera: &Camera,
        mesh: &Mesh,
        light: &Light,
    ) -> Result<(FrameBuffer, RenderStats), RenderError> {
        if self.viewport.is_empty() {
            return Err(RenderError::EmptyFramebuffer {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        info!(
            "rendering {} faces at {}x{}",
            mesh.faces().len(),
            self.viewport.width,
            self.viewport.height
        );

        let converter = SpaceConverter::build(camera)?;
        let triangles = build_render_triangles(mesh, &converter, &self.viewport)?;

        let (frame, stats) = self.rasterize(&triangles, &PhongShader::new(light));
        info!("pass finished: {stats}");
        Ok((frame, stats))
    }

    /// Rasterizes prepared triangles, in order, into a fresh framebuffer.
    pub fn rasterize<S: PixelShader>(
        &self,
        triangles: &[RenderTriangle],
        shader: &S,
    ) -> (FrameBuffer, RenderStats) {
        let Viewport { width, height, .. } = self.viewport;
        let mut frame = FrameBuffer::new(width, height, self.background);
        let mut depth = DepthBuffer::new(width, height);
        let mut stats = RenderStats::default();

        {
            let mut target = RenderTarget::new(&mut frame, &mut depth);
            for triangle in triangles {
                let outcome = self.rasterizer.fill_triangle(triangle, &mut target, shader);
                stats.record(outcome.path, outcome.pixels_written);
            }
        }

        debug!(
            "rasterized {} of {} triangles",
            stats.drawn(),
            stats.triangles
        );
        (frame, stats)
    }
}
