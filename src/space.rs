//! Coordinate-space conversions.
//!
//! A [`SpaceConverter`] is built once per [`Camera`] and maps points through
//! the chain used by the pipeline:
//!
//! ```text
//! world --to_camera--> camera --to_projection--> projection --to_window--> window
//! ```
//!
//! # Camera Space
//!
//! The basis is `{U, V', N}` where `N` is the normalized view direction,
//! `V'` the up hint made orthogonal to `N` (Gram-Schmidt) and
//! `U = N x V'`. Camera-space coordinates of a world point `P` are
//! `(U·(P-C), V'·(P-C), N·(P-C))`, so `z` grows with distance in front of
//! the eye. The depth test relies on this orientation.

use log::debug;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::math::{Mat3, Vec2, Vec3};

/// Basis vectors shorter than this are rejected.
const BASIS_EPSILON: f64 = 1e-9;

/// Pixel grid targeted by the projection and window stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Divide projected coordinates by the camera's half-extents.
    pub normalize: bool,
}

impl Viewport {
    /// A normalized viewport of `width` x `height` pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            normalize: true,
        }
    }

    pub const fn with_normalize(self, normalize: bool) -> Self {
        Self { normalize, ..self }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Converts between world, camera, projection and window spaces.
#[derive(Debug, Clone)]
pub struct SpaceConverter<'a> {
    camera_to_world: Mat3,
    world_to_camera: Mat3,
    camera: &'a Camera,
}

impl<'a> SpaceConverter<'a> {
    /// Builds the orthonormal camera basis and both conversion matrices.
    ///
    /// # Errors
    ///
    /// [`RenderError::DegenerateBasis`] when `V` is parallel to `N` or either
    /// is zero, [`RenderError::SingularBasis`] when the basis matrix has
    /// `|det| <= 1e-8`.
    pub fn build(camera: &'a Camera) -> Result<Self, RenderError> {
        let projection = camera.up.project_onto(camera.direction);
        let orthogonal_v = camera.up - projection;
        let u = camera.direction.cross(orthogonal_v);

        let u = u
            .try_normalize(BASIS_EPSILON)
            .ok_or(RenderError::DegenerateBasis { axis: "U" })?;
        let v = orthogonal_v
            .try_normalize(BASIS_EPSILON)
            .ok_or(RenderError::DegenerateBasis { axis: "V" })?;
        let n = camera
            .direction
            .try_normalize(BASIS_EPSILON)
            .ok_or(RenderError::DegenerateBasis { axis: "N" })?;

        // Rows are the basis vectors: multiplying by this matrix projects an
        // offset onto U, V' and N.
        let world_to_camera = Mat3::from_rows(u, v, n);
        let camera_to_world = world_to_camera
            .inverse()
            .ok_or(RenderError::SingularBasis {
                determinant: world_to_camera.determinant(),
            })?;

        debug!(
            "camera basis built: U={:?} V={:?} N={:?}",
            world_to_camera.row(0).components(),
            world_to_camera.row(1).components(),
            world_to_camera.row(2).components()
        );

        Ok(Self {
            camera_to_world,
            world_to_camera,
            camera,
        })
    }

    pub fn camera_to_world(&self) -> &Mat3 {
        &self.camera_to_world
    }

    pub fn world_to_camera(&self) -> &Mat3 {
        &self.world_to_camera
    }

    /// World space to camera space: `world_to_camera * (P - C)`.
    pub fn to_camera(&self, point: Vec3) -> Vec3 {
        let offset = point - self.camera.position;
        (self.world_to_camera * offset).with_kind(point.kind())
    }

    /// Camera space back to world space: `camera_to_world * P + C`.
    pub fn to_world(&self, point: Vec3) -> Vec3 {
        (self.camera_to_world * point) + self.camera.position
    }

    /// Perspective divide onto the screen plane at distance `d`.
    ///
    /// With `normalize`, the result is also divided by the half-extents so
    /// the visible window spans `[-1, 1]` on both axes.
    ///
    /// Points on the eye plane (`z == 0`) produce infinities or NaN; callers
    /// are responsible for keeping them out.
    pub fn to_projection(&self, point: Vec3, normalize: bool) -> Vec2 {
        let d = self.camera.focal_distance;
        let mut x = d * point.x() / point.z();
        let mut y = d * point.y() / point.z();

        if normalize {
            x /= self.camera.half_width;
            y /= self.camera.half_height;
        }

        Vec2::point(x, y)
    }

    /// Camera space straight to pixel coordinates on `viewport`.
    pub fn to_viewport(&self, point: Vec3, viewport: &Viewport) -> Vec2 {
        let projected = self.to_projection(point, viewport.normalize);
        Self::to_window(projected, viewport.width, viewport.height)
    }

    /// Projection space to pixel coordinates, origin at the top-left.
    pub fn to_window(point: Vec2, width: u32, height: u32) -> Vec2 {
        let width = f64::from(width);
        let height = f64::from(height);
        let x = (width * (point.x() + 1.0) / 2.0 + 0.5).floor();
        let y = (height - height * (point.y() + 1.0) / 2.0 + 0.5).floor();
        Vec2::point(x, y)
    }
}
