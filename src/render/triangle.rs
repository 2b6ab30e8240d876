//! Triangle setup: lifting mesh faces into render-triangles.
//!
//! Every face is run through the [`SpaceConverter`] chain once per pass. The
//! resulting [`RenderTriangle`] carries each vertex in world, camera,
//! projection and window space, plus a smoothed camera-space normal used by
//! the shading model.
//!
//! # Vertex Normals
//!
//! Vertex normals come from [`smooth_vertex_normals`]: for each vertex, the
//! face normals of every valid triangle sharing that camera-space position
//! are summed and renormalized. Sharing is decided by position, not by
//! index, so duplicated vertices in the mesh still blend. This is a
//! quadratic scan over all triangles; fine for small and medium meshes.

use approx::abs_diff_eq;
use log::debug;

use super::barycentric::is_valid_triangle;
use crate::error::RenderError;
use crate::math::{Vec2, Vec3};
use crate::mesh::Mesh;
use crate::space::{SpaceConverter, Viewport};

/// Camera-space positions closer than this, component-wise, are the same
/// vertex for normal smoothing.
pub const SHARED_VERTEX_EPSILON: f64 = 1e-6;

/// One mesh face in every space the pipeline needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTriangle {
    pub world: [Vec3; 3],
    pub camera: [Vec3; 3],
    pub projection: [Vec2; 3],
    pub window: [Vec2; 3],
    /// Smoothed camera-space normal per vertex.
    pub normals: [Vec3; 3],
    /// `normalize((c2 - c0) x (c1 - c0))` in camera space.
    pub face_normal: Vec3,
}

impl RenderTriangle {
    /// Transforms the three world-space corners of a face. Vertex normals
    /// start out as the face normal.
    pub fn from_world(
        world: [Vec3; 3],
        converter: &SpaceConverter<'_>,
        viewport: &Viewport,
    ) -> Self {
        let camera = world.map(|p| converter.to_camera(p));
        let projection = camera.map(|p| converter.to_projection(p, viewport.normalize));
        let window =
            projection.map(|p| SpaceConverter::to_window(p, viewport.width, viewport.height));
        let face_normal = face_normal(&camera);

        Self {
            world,
            camera,
            projection,
            window,
            normals: [face_normal; 3],
            face_normal,
        }
    }

    /// Whether the window-space footprint has a usable area.
    pub fn is_valid(&self) -> bool {
        is_valid_triangle(self.window[0], self.window[1], self.window[2])
    }

    fn check_finite(&self, face: usize) -> Result<(), RenderError> {
        if !self.camera.iter().all(Vec3::is_finite) {
            return Err(RenderError::NonFiniteVertex {
                face,
                space: "camera",
            });
        }
        if !self.window.iter().all(Vec2::is_finite) {
            return Err(RenderError::NonFiniteVertex {
                face,
                space: "window",
            });
        }
        Ok(())
    }

    /// Camera-space Z of the centroid.
    pub fn centroid_depth(&self) -> f64 {
        (self.camera[0].z() + self.camera[1].z() + self.camera[2].z()) / 3.0
    }

    /// Whether any camera-space corner equals `point` within
    /// [`SHARED_VERTEX_EPSILON`].
    pub fn has_camera_vertex(&self, point: Vec3) -> bool {
        self.camera
            .iter()
            .any(|v| abs_diff_eq!(*v, point, epsilon = SHARED_VERTEX_EPSILON))
    }
}

/// Unit normal of a camera-space triangle; orientation follows the winding.
pub fn face_normal(camera: &[Vec3; 3]) -> Vec3 {
    let a = camera[2] - camera[0];
    let b = camera[1] - camera[0];
    a.cross(b).normalize()
}

/// Builds render-triangles for every face of `mesh`, with smoothed normals,
/// ordered nearest-first by centroid depth.
///
/// # Errors
///
/// [`RenderError::VertexIndexOutOfRange`] if a face points past the vertex
/// array, [`RenderError::NonFiniteVertex`] if a face has no finite camera or
/// window footprint.
pub fn build_render_triangles(
    mesh: &Mesh,
    converter: &SpaceConverter<'_>,
    viewport: &Viewport,
) -> Result<Vec<RenderTriangle>, RenderError> {
    let mut triangles = (0..mesh.faces().len())
        .map(|face| {
            let world = mesh.face_vertices(face)?;
            let triangle = RenderTriangle::from_world(world, converter, viewport);
            triangle.check_finite(face)?;
            Ok(triangle)
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    smooth_vertex_normals(&mut triangles);

    triangles.sort_by(|a, b| a.centroid_depth().total_cmp(&b.centroid_depth()));

    debug!(
        "built {} render triangles ({} degenerate)",
        triangles.len(),
        triangles.iter().filter(|t| !t.is_valid()).count()
    );
    Ok(triangles)
}

/// Replaces each valid triangle's vertex normals with the normalized sum of
/// its own face normal and the face normals of every other valid triangle
/// that shares the vertex position.
///
/// Degenerate triangles keep their face normal and contribute nothing.
pub fn smooth_vertex_normals(triangles: &mut [RenderTriangle]) {
    let valid: Vec<bool> = triangles.iter().map(RenderTriangle::is_valid).collect();

    let smoothed: Vec<Option<[Vec3; 3]>> = triangles
        .iter()
        .enumerate()
        .map(|(i, triangle)| {
            if !valid[i] {
                return None;
            }
            Some(triangle.camera.map(|vertex| {
                let sum = triangles
                    .iter()
                    .enumerate()
                    .filter(|&(j, other)| j != i && valid[j] && other.has_camera_vertex(vertex))
                    .fold(triangle.face_normal, |acc, (_, other)| acc + other.face_normal);
                sum.normalize()
            }))
        })
        .collect();

    for (triangle, normals) in triangles.iter_mut().zip(smoothed) {
        if let Some(normals) = normals {
            triangle.normals = normals;
        }
    }
}
