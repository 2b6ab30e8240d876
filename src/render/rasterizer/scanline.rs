//! Scanline-based triangle rasterization.
//!
//! Triangles are filled one horizontal row at a time using flat-top/flat-bottom
//! decomposition.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by window Y (top to bottom)
//! 2. **Classify**: invalid (skipped), flat-top, flat-bottom, or general
//! 3. **Split** a general triangle at the middle vertex's row
//! 4. **Sweep** each flat half row by row, stepping both edges by their
//!    inverse slopes
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   v3
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//!
//!   Flat-bottom          General: flat-bottom (v0,v1,v3) + flat-top (v3,v1,v2)
//! ```
//!
//! # Inverse Slopes
//!
//! Each edge advances its X by `dx/dy` per row. Near-vertical edges
//! (`|dx| <= 1e-3`) get no horizontal step. Shallow edges keep their full
//! step, however many pixels it spans per row.
//!
//! # Per-Pixel Work
//!
//! Every visited `(x, y)` is resolved against the *original* triangle, never a
//! half: barycentric weights give the camera-space position, its Z is
//! depth-tested, and only a passing pixel gets an interpolated normal and a
//! shader call. Rows and columns off the grid are never painted.

use log::trace;

use super::{FillOutcome, FillPath, PixelShader, Rasterizer};
use crate::math::{Vec2, Vec3};
use crate::render::barycentric::Barycentric;
use crate::render::framebuffer::RenderTarget;
use crate::render::triangle::RenderTriangle;

/// Two window vertices closer than this in Y share a row.
const HORIZONTAL_EPSILON: f64 = 1e-4;

/// An edge with `|dx|` at or below this has its slope reported as 0.
const VERTICAL_DX_EPSILON: f64 = 1e-3;

/// Below this `|slope|`, the split edge is taken as vertical.
const SPLIT_SLOPE_EPSILON: f64 = 1e-4;

/// The extra vertex introduced when a general triangle is split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitVertex {
    /// On edge `(v0, v2)` at the height of `v1`.
    pub window: Vec2,
    /// Camera-space position, interpolated from the original triangle.
    pub position: Vec3,
    /// Camera-space normal, interpolated from the original triangle.
    pub normal: Vec3,
}

/// Computes the split vertex of a general triangle.
///
/// `sorted` holds the window-space vertices ordered by ascending Y. The split
/// point lies on the long edge `(v0, v2)` in the row of `v1`; its attributes
/// come from barycentric weights against `triangle` itself.
pub fn split_vertex(triangle: &RenderTriangle, sorted: [Vec2; 3]) -> SplitVertex {
    let [v0, v1, v2] = sorted;
    let slope = slope(v0, v2);
    let x = if slope.abs() <= SPLIT_SLOPE_EPSILON {
        v0.x()
    } else {
        let intercept = v0.y() - slope * v0.x();
        (v1.y() - intercept) / slope
    };
    let window = Vec2::point(x, v1.y());
    debug_assert!(window.is_finite(), "non-finite split vertex {window:?}");

    let bary = Barycentric::from_window(window, triangle);
    SplitVertex {
        window,
        position: bary.interpolate_position(triangle),
        normal: bary.interpolate_normal(triangle),
    }
}

/// `dy/dx` of the line through `a` and `b`, or 0 for (near) vertical lines.
#[inline]
fn slope(a: Vec2, b: Vec2) -> f64 {
    let d = a - b;
    if d.x().abs() > VERTICAL_DX_EPSILON {
        d.y() / d.x()
    } else {
        0.0
    }
}

/// Horizontal step per row along the edge `(a, b)`, or 0 for (near)
/// vertical and horizontal edges.
#[inline]
fn inverse_slope(a: Vec2, b: Vec2) -> f64 {
    let d = a - b;
    if d.x().abs() <= VERTICAL_DX_EPSILON || d.y().abs() <= HORIZONTAL_EPSILON {
        0.0
    } else {
        d.x() / d.y()
    }
}

#[inline]
fn is_horizontal(a: Vec2, b: Vec2) -> bool {
    (a.y() - b.y()).abs() <= HORIZONTAL_EPSILON
}

/// Sorts three vertices by Y (ascending: top to bottom in window space).
#[inline]
fn sort_by_y(vertices: &mut [Vec2; 3]) {
    if vertices[1].y() < vertices[0].y() {
        vertices.swap(0, 1);
    }
    if vertices[2].y() < vertices[1].y() {
        vertices.swap(1, 2);
    }
    if vertices[1].y() < vertices[0].y() {
        vertices.swap(0, 1);
    }
}

/// A row-by-row walk between two edges that start at the same point.
#[derive(Debug, Clone, Copy)]
struct Sweep {
    row: f64,
    last_row: f64,
    /// +1 walks down the window, -1 walks up.
    direction: f64,
    left: f64,
    right: f64,
    left_step: f64,
    right_step: f64,
}

impl Sweep {
    #[inline]
    fn in_range(&self) -> bool {
        if self.direction > 0.0 {
            self.row <= self.last_row
        } else {
            self.row >= self.last_row
        }
    }

    #[inline]
    fn advance(&mut self, rows: f64) {
        self.left += self.left_step * rows;
        self.right += self.right_step * rows;
        self.row += self.direction * rows;
    }

    /// Rows to jump so the walk starts on the grid.
    fn rows_before_grid(&self, height: f64) -> f64 {
        if self.direction > 0.0 && self.row < 0.0 {
            (-self.row).ceil()
        } else if self.direction < 0.0 && self.row >= height {
            (self.row - height).floor() + 1.0
        } else {
            0.0
        }
    }
}

/// Scanline-based triangle rasterizer.
///
/// Vertices may come in any order; they are sorted internally. The
/// rasterizer holds no state, so one instance can serve a whole pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Fills a flat-bottom triangle: `apex` above a horizontal base.
    ///
    /// ```text
    ///        apex
    ///        /\
    ///       /  \
    ///      /____\
    ///   left    right
    /// ```
    fn fill_flat_bottom<S: PixelShader>(
        &self,
        apex: Vec2,
        base: [Vec2; 2],
        triangle: &RenderTriangle,
        target: &mut RenderTarget<'_>,
        shader: &S,
    ) -> usize {
        let [mut left, mut right] = base;
        if left.x() > right.x() {
            std::mem::swap(&mut left, &mut right);
        }

        let sweep = Sweep {
            row: apex.y(),
            last_row: left.y(),
            direction: 1.0,
            left: apex.x(),
            right: apex.x(),
            left_step: inverse_slope(apex, left),
            right_step: inverse_slope(apex, right),
        };
        self.fill_sweep(sweep, triangle, target, shader)
    }

    /// Fills a flat-top triangle: a horizontal base above `apex`.
    ///
    /// ```text
    ///   left ---- right
    ///      \     /
    ///       \   /
    ///        \ /
    ///        apex
    /// ```
    ///
    /// The walk starts at the apex and moves up to the base.
    fn fill_flat_top<S: PixelShader>(
        &self,
        base: [Vec2; 2],
        apex: Vec2,
        triangle: &RenderTriangle,
        target: &mut RenderTarget<'_>,
        shader: &S,
    ) -> usize {
        let [mut left, mut right] = base;
        if left.x() > right.x() {
            std::mem::swap(&mut left, &mut right);
        }

        let sweep = Sweep {
            row: apex.y(),
            last_row: left.y(),
            direction: -1.0,
            left: apex.x(),
            right: apex.x(),
            left_step: -inverse_slope(left, apex),
            right_step: -inverse_slope(right, apex),
        };
        self.fill_sweep(sweep, triangle, target, shader)
    }

    fn fill_sweep<S: PixelShader>(
        &self,
        mut sweep: Sweep,
        triangle: &RenderTriangle,
        target: &mut RenderTarget<'_>,
        shader: &S,
    ) -> usize {
        sweep.advance(sweep.rows_before_grid(f64::from(target.height())));

        let mut written = 0;
        while sweep.in_range() {
            if !target.contains_row(sweep.row.floor() as i32) {
                break;
            }
            written += self.fill_span(
                sweep.row,
                sweep.left,
                sweep.right,
                triangle,
                target,
                shader,
            );
            sweep.advance(1.0);
        }
        written
    }

    /// Paints `x = left, left + 1, ...` while `x <= right`, clipped to the
    /// grid.
    #[inline]
    fn fill_span<S: PixelShader>(
        &self,
        y: f64,
        left: f64,
        right: f64,
        triangle: &RenderTriangle,
        target: &mut RenderTarget<'_>,
        shader: &S,
    ) -> usize {
        let width = f64::from(target.width());
        let mut x = if left < 0.0 { left + (-left).ceil() } else { left };

        let mut written = 0;
        while x <= right && x < width {
            if Self::paint(x, y, triangle, target, shader) {
                written += 1;
            }
            x += 1.0;
        }
        written
    }

    /// Depth-tests and shades the sample at window `(x, y)`.
    #[inline]
    fn paint<S: PixelShader>(
        x: f64,
        y: f64,
        triangle: &RenderTriangle,
        target: &mut RenderTarget<'_>,
        shader: &S,
    ) -> bool {
        let bary = Barycentric::from_window(Vec2::point(x, y), triangle);
        let position = bary.interpolate_position(triangle);

        let (px, py) = (x.floor() as i32, y.floor() as i32);
        target.set_pixel_with_depth(px, py, position.z(), || {
            shader.shade(position, bary.interpolate_normal(triangle))
        })
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &RenderTriangle,
        target: &mut RenderTarget<'_>,
        shader: &S,
    ) -> FillOutcome {
        if !triangle.is_valid() {
            return FillOutcome::SKIPPED;
        }

        let mut sorted = triangle.window;
        sort_by_y(&mut sorted);
        let [v0, v1, v2] = sorted;

        if is_horizontal(v0, v1) {
            let pixels_written = self.fill_flat_top([v0, v1], v2, triangle, target, shader);
            return FillOutcome {
                path: FillPath::FlatTop,
                pixels_written,
            };
        }

        if is_horizontal(v1, v2) {
            let pixels_written = self.fill_flat_bottom(v0, [v1, v2], triangle, target, shader);
            return FillOutcome {
                path: FillPath::FlatBottom,
                pixels_written,
            };
        }

        let split = split_vertex(triangle, sorted);
        trace!(
            "split at window ({:.3}, {:.3}), camera z {:.4}",
            split.window.x(),
            split.window.y(),
            split.position.z()
        );

        let top = self.fill_flat_bottom(v0, [v1, split.window], triangle, target, shader);
        let bottom = self.fill_flat_top([split.window, v1], v2, triangle, target, shader);
        FillOutcome {
            path: FillPath::Split,
            pixels_written: top + bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Color, BLACK};
    use crate::render::framebuffer::{DepthBuffer, FrameBuffer};
    use approx::assert_relative_eq;

    /// Paints every surviving sample one color.
    struct Solid(Color);

    impl PixelShader for Solid {
        fn shade(&self, _position: Vec3, _normal: Vec3) -> Color {
            self.0
        }
    }

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    /// A triangle with the given window footprint at constant depth `z`.
    fn flat_triangle(window: [(f64, f64); 3], z: f64) -> RenderTriangle {
        let window = window.map(|(x, y)| Vec2::point(x, y));
        let camera = window.map(|w| Vec3::point(w.x(), w.y(), z));
        let normal = Vec3::direction(0.0, 0.0, -1.0);
        RenderTriangle {
            world: camera,
            camera,
            projection: window,
            window,
            normals: [normal; 3],
            face_normal: normal,
        }
    }

    fn fill(
        triangle: &RenderTriangle,
        frame: &mut FrameBuffer,
        depth: &mut DepthBuffer,
        color: Color,
    ) -> FillOutcome {
        let mut target = RenderTarget::new(frame, depth);
        ScanlineRasterizer::new().fill_triangle(triangle, &mut target, &Solid(color))
    }

    fn count(frame: &FrameBuffer, color: Color) -> usize {
        frame.pixels().iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn flat_bottom_covers_expected_pixels() {
        let mut frame = FrameBuffer::new(32, 32, BLACK);
        let mut depth = DepthBuffer::new(32, 32);
        let t = flat_triangle([(10.0, 10.0), (0.0, 20.0), (20.0, 20.0)], 5.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        // Rows 10..=20 are 1, 3, 5, ... 21 pixels wide.
        assert_eq!(outcome.path, FillPath::FlatBottom);
        assert_eq!(outcome.pixels_written, 121);
        assert_eq!(count(&frame, RED), 121);
        assert_eq!(frame.get_pixel(10, 10), Some(RED));
        assert_eq!(frame.get_pixel(9, 10), Some(BLACK));
        assert_eq!(frame.get_pixel(0, 20), Some(RED));
        assert_eq!(frame.get_pixel(20, 20), Some(RED));
    }

    #[test]
    fn flat_top_covers_expected_pixels() {
        let mut frame = FrameBuffer::new(32, 32, BLACK);
        let mut depth = DepthBuffer::new(32, 32);
        let t = flat_triangle([(20.0, 10.0), (10.0, 20.0), (0.0, 10.0)], 5.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        assert_eq!(outcome.path, FillPath::FlatTop);
        assert_eq!(outcome.pixels_written, 121);
        assert_eq!(frame.get_pixel(10, 20), Some(RED));
        assert_eq!(frame.get_pixel(0, 10), Some(RED));
        assert_eq!(frame.get_pixel(10, 21), Some(BLACK));
    }

    #[test]
    fn general_triangle_is_split() {
        let mut frame = FrameBuffer::new(64, 64, BLACK);
        let mut depth = DepthBuffer::new(64, 64);
        let t = flat_triangle([(30.0, 5.0), (5.0, 25.0), (40.0, 50.0)], 5.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        assert_eq!(outcome.path, FillPath::Split);
        assert!(outcome.pixels_written > 0);
        // The split row is swept by both halves.
        assert!(count(&frame, RED) <= outcome.pixels_written);

        // Centroid is covered; corners of the bounding box are not.
        assert_eq!(frame.get_pixel(25, 26), Some(RED));
        assert_eq!(frame.get_pixel(5, 5), Some(BLACK));
        assert_eq!(frame.get_pixel(5, 50), Some(BLACK));

        // Nothing outside the footprint's rows.
        for x in 0..64 {
            assert_eq!(frame.get_pixel(x, 4), Some(BLACK));
            assert_eq!(frame.get_pixel(x, 51), Some(BLACK));
        }
    }

    #[test]
    fn split_vertex_lies_on_the_long_edge() {
        let t = flat_triangle([(30.0, 5.0), (5.0, 25.0), (40.0, 50.0)], 7.0);
        let split = split_vertex(&t, t.window);

        // Edge (30,5)-(40,50) at y = 25: x = 30 + 10·20/45
        assert_relative_eq!(split.window.x(), 30.0 + 200.0 / 45.0, epsilon = 1e-9);
        assert_relative_eq!(split.window.y(), 25.0);
        assert_relative_eq!(split.position.z(), 7.0, epsilon = 1e-9);
        assert_relative_eq!(split.position.x(), split.window.x(), epsilon = 1e-9);
        assert_relative_eq!(split.normal, t.face_normal, epsilon = 1e-9);
    }

    #[test]
    fn split_of_vertical_long_edge_keeps_its_x() {
        let t = flat_triangle([(5.0, 0.0), (0.0, 5.0), (5.0, 10.0)], 1.0);
        let split = split_vertex(&t, t.window);
        assert_eq!(split.window, Vec2::point(5.0, 5.0));
    }

    #[test]
    fn degenerate_triangle_writes_nothing() {
        let mut frame = FrameBuffer::new(8, 8, BLACK);
        let mut depth = DepthBuffer::new(8, 8);
        let t = flat_triangle([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)], 1.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        assert_eq!(outcome, FillOutcome::SKIPPED);
        assert_eq!(count(&frame, BLACK), 64);
        assert_eq!(depth.get(1, 1), Some(f64::INFINITY));
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let mut frame = FrameBuffer::new(32, 32, BLACK);
        let mut depth = DepthBuffer::new(32, 32);
        let footprint = [(10.0, 10.0), (0.0, 20.0), (20.0, 20.0)];
        let near = flat_triangle(footprint, 2.0);
        let far = flat_triangle(footprint, 9.0);

        fill(&far, &mut frame, &mut depth, BLUE);
        assert_eq!(fill(&near, &mut frame, &mut depth, RED).pixels_written, 121);
        assert_eq!(fill(&far, &mut frame, &mut depth, BLUE).pixels_written, 0);
        // Equal depth: the earlier writer stays.
        assert_eq!(fill(&near, &mut frame, &mut depth, BLUE).pixels_written, 0);

        assert_eq!(count(&frame, RED), 121);
        assert_eq!(depth.get(10, 15), Some(2.0));
    }

    #[test]
    fn partially_off_screen_triangle_is_clipped_to_the_grid() {
        let mut frame = FrameBuffer::new(16, 16, BLACK);
        let mut depth = DepthBuffer::new(16, 16);
        let t = flat_triangle([(8.0, -20.0), (-30.0, 30.0), (40.0, 30.0)], 3.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        assert_eq!(outcome.path, FillPath::FlatBottom);
        assert_eq!(count(&frame, RED), outcome.pixels_written);
        assert!(outcome.pixels_written > 0);
        assert_eq!(frame.get_pixel(8, 0), Some(RED));
    }

    #[test]
    fn fully_off_screen_triangle_writes_nothing() {
        let mut frame = FrameBuffer::new(16, 16, BLACK);
        let mut depth = DepthBuffer::new(16, 16);
        let t = flat_triangle([(100.0, 100.0), (90.0, 120.0), (130.0, 110.0)], 3.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        assert_eq!(outcome.path, FillPath::Split);
        assert_eq!(outcome.pixels_written, 0);
    }

    #[test]
    fn inverse_slope_ignores_only_vertical_edges() {
        let a = Vec2::point(0.0, 0.0);
        assert_eq!(inverse_slope(a, Vec2::point(0.0, 10.0)), 0.0);
        assert_eq!(inverse_slope(a, Vec2::point(0.0005, 10.0)), 0.0);
        assert_relative_eq!(inverse_slope(a, Vec2::point(1000.0, 5.0)), 200.0);
        assert_relative_eq!(inverse_slope(a, Vec2::point(10.0, 20.0)), 0.5);
        assert_relative_eq!(inverse_slope(a, Vec2::point(-10.0, 10.0)), -1.0);
    }

    #[test]
    fn wide_shallow_triangle_fills_its_base_row() {
        let mut frame = FrameBuffer::new(256, 32, BLACK);
        let mut depth = DepthBuffer::new(256, 32);
        let t = flat_triangle([(100.0, 10.0), (0.0, 11.0), (200.0, 11.0)], 5.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        // The apex pixel plus the whole 201-pixel base row.
        assert_eq!(outcome.path, FillPath::FlatBottom);
        assert_eq!(outcome.pixels_written, 202);
        assert_eq!(frame.get_pixel(0, 11), Some(RED));
        assert_eq!(frame.get_pixel(200, 11), Some(RED));
        assert_eq!(frame.get_pixel(201, 11), Some(BLACK));
    }

    #[test]
    fn wide_shallow_flat_top_fills_its_base_row() {
        let mut frame = FrameBuffer::new(256, 32, BLACK);
        let mut depth = DepthBuffer::new(256, 32);
        let t = flat_triangle([(0.0, 10.0), (200.0, 10.0), (100.0, 12.0)], 5.0);

        let outcome = fill(&t, &mut frame, &mut depth, RED);
        // Rows 12, 11, 10 are 1, 101 and 201 pixels wide.
        assert_eq!(outcome.path, FillPath::FlatTop);
        assert_eq!(outcome.pixels_written, 303);
        assert_eq!(frame.get_pixel(0, 10), Some(RED));
        assert_eq!(frame.get_pixel(150, 11), Some(RED));
    }
}
