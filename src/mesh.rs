//! Triangle meshes in world space.

use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::error::RenderError;
use crate::math::Vec3;

// This struct represents a triangle defined by three vertices
// The members a, b, and c are zero-based indices into the vertex
// array of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub const fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("OBJ file {0} contains no triangles")]
    Empty(String),
}

/// A triangle mesh: world-space vertex positions plus index triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Unit cube centered at the origin, two triangles per side.
    pub fn cube() -> Self {
        Self::new(CUBE_VERTICES.to_vec(), CUBE_FACES.to_vec())
    }

    /// Loads every model in an OBJ file into a single mesh.
    ///
    /// Polygons are triangulated on load. Normals and texture coordinates in
    /// the file are ignored; vertex normals are derived from the geometry.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for model in &models {
            let base = vertices.len() as u32;
            vertices.extend(model.mesh.positions.chunks_exact(3).map(|p| {
                Vec3::point(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
            }));
            faces.extend(
                model
                    .mesh
                    .indices
                    .chunks_exact(3)
                    .map(|i| Face::new(base + i[0], base + i[1], base + i[2])),
            );
        }

        if faces.is_empty() {
            return Err(MeshError::Empty(path.display().to_string()));
        }

        debug!(
            "loaded {} vertices and {} faces from {}",
            vertices.len(),
            faces.len(),
            path.display()
        );
        Ok(Self::new(vertices, faces))
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                Vec3::point(min.x().min(v.x()), min.y().min(v.y()), min.z().min(v.z())),
                Vec3::point(max.x().max(v.x()), max.y().max(v.y()), max.z().max(v.z())),
            )
        }))
    }

    /// World-space positions of the three corners of face `index`.
    ///
    /// # Errors
    ///
    /// [`RenderError::VertexIndexOutOfRange`] if the face points past the
    /// vertex array.
    pub fn face_vertices(&self, index: usize) -> Result<[Vec3; 3], RenderError> {
        let [a, b, c] = self.faces[index].indices();
        let lookup = |vertex: u32| {
            self.vertices
                .get(vertex as usize)
                .copied()
                .ok_or(RenderError::VertexIndexOutOfRange {
                    face: index,
                    index: vertex,
                    vertex_count: self.vertices.len(),
                })
        };
        Ok([lookup(a)?, lookup(b)?, lookup(c)?])
    }
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::point(-1.0, -1.0, -1.0),
    Vec3::point(-1.0, 1.0, -1.0),
    Vec3::point(1.0, 1.0, -1.0),
    Vec3::point(1.0, -1.0, -1.0),
    Vec3::point(1.0, 1.0, 1.0),
    Vec3::point(1.0, -1.0, 1.0),
    Vec3::point(-1.0, 1.0, 1.0),
    Vec3::point(-1.0, -1.0, 1.0),
];

pub const CUBE_FACES: [Face; 12] = [
    // Front face
    Face::new(0, 1, 2),
    Face::new(0, 2, 3),
    // Right face
    Face::new(3, 2, 4),
    Face::new(3, 4, 5),
    // Back face
    Face::new(5, 4, 6),
    Face::new(5, 6, 7),
    // Left face
    Face::new(7, 6, 1),
    Face::new(7, 1, 0),
    // Top face
    Face::new(1, 6, 4),
    Face::new(1, 4, 2),
    // Bottom face
    Face::new(5, 7, 0),
    Face::new(5, 0, 3),
];
