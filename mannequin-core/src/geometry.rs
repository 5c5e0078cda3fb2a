/// Mesh data model: indexed vertices and triangles
use nalgebra::{Point3, Vector3};

use crate::error::GeometryError;

/// A vertex position in object-local space
pub type Vertex = Point3<f32>;

/// A triangle face given as three indices into the owning object's vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle(pub [u32; 3]);

impl Triangle {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self([a, b, c])
    }

    pub fn indices(&self) -> [u32; 3] {
        self.0
    }
}

/// An immutable indexed mesh for a single static shape
#[derive(Debug, Clone, PartialEq)]
pub struct GeometricObject {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl GeometricObject {
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flattened vertex positions (x, y, z per vertex) for attribute upload
    pub fn geometry(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x, v.y, v.z])
            .collect()
    }

    /// Flattened triangle indices for an element buffer
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flat_map(|t| t.indices()).collect()
    }

    /// Calculate the face normal of a triangle from its winding order
    ///
    /// Returns `None` when the index is out of range, the triangle references
    /// a missing vertex, or the face is degenerate.
    pub fn face_normal(&self, triangle: usize) -> Option<Vector3<f32>> {
        let [a, b, c] = self.triangles.get(triangle)?.indices();
        let v0 = self.vertices.get(a as usize)?;
        let v1 = self.vertices.get(b as usize)?;
        let v2 = self.vertices.get(c as usize)?;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).try_normalize(1e-12)
    }

    /// Check that every triangle index refers to a vertex of this object
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.vertices.len();
        for (triangle, face) in self.triangles.iter().enumerate() {
            if let Some(&index) = face.0.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GeometryError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}
