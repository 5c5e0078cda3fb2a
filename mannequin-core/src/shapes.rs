/// Shape generators producing static meshes
///
/// Generators accept any dimensions. Zero or negative values degenerate the
/// mesh instead of failing.
use nalgebra::Point3;

use crate::geometry::{GeometricObject, Triangle, Vertex};

/// Box-shaped head sitting two units above the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Head {
    pub length: f32,
    pub height: f32,
    pub width: f32,
}

impl Head {
    /// Vertical offset of the head's bottom face
    pub const BASE_Z: f32 = 2.0;

    pub fn new(length: f32, height: f32, width: f32) -> Self {
        Self {
            length,
            height,
            width,
        }
    }

    pub fn into_object(self) -> GeometricObject {
        let Self {
            length: l,
            height: h,
            width: w,
        } = self;
        let z0 = Self::BASE_Z;
        let z1 = h + Self::BASE_Z;

        let vertices = vec![
            Point3::new(w, l, z0),           // bottom front left
            Point3::new(w, l * 2.0, z0),     // bottom front right
            Point3::new(w, l * 2.0, z1),     // top front right
            Point3::new(w, l, z1),           // top front left
            Point3::new(0.0, l * 2.0, z0),   // bottom back right
            Point3::new(0.0, l, z0),         // bottom back left
            Point3::new(0.0, l * 2.0, z1),   // top back right
            Point3::new(0.0, l, z1),         // top back left
        ];

        let triangles = vec![
            // front
            Triangle::new(0, 1, 2),
            Triangle::new(0, 2, 3),
            // right
            Triangle::new(1, 4, 6),
            Triangle::new(1, 6, 2),
            // back
            Triangle::new(4, 5, 7),
            Triangle::new(4, 7, 6),
            // left
            Triangle::new(5, 0, 3),
            Triangle::new(5, 3, 7),
            // top
            Triangle::new(3, 2, 6),
            Triangle::new(3, 6, 7),
            // bottom
            Triangle::new(1, 0, 5),
            Triangle::new(1, 5, 4),
        ];

        GeometricObject::new(vertices, triangles)
    }
}

impl Default for Head {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5)
    }
}

impl From<Head> for GeometricObject {
    fn from(head: Head) -> Self {
        head.into_object()
    }
}

/// Axis-aligned box with its minimum corner at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub size_x: f32,
    pub size_y: f32,
    pub size_z: f32,
}

impl Cuboid {
    pub fn new(size_x: f32, size_y: f32, size_z: f32) -> Self {
        Self {
            size_x,
            size_y,
            size_z,
        }
    }

    pub fn into_object(self) -> GeometricObject {
        let mut vertices = Vec::with_capacity(8);
        let mut triangles = Vec::with_capacity(12);
        push_box(
            &mut vertices,
            &mut triangles,
            Point3::origin(),
            Point3::new(self.size_x, self.size_y, self.size_z),
        );
        GeometricObject::new(vertices, triangles)
    }
}

impl From<Cuboid> for GeometricObject {
    fn from(cuboid: Cuboid) -> Self {
        cuboid.into_object()
    }
}

/// Arrow pointing along +Z from the origin: a square shaft capped by a pyramid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub length: f32,
    pub shaft_width: f32,
    pub tip_length: f32,
    pub tip_width: f32,
}

impl Arrow {
    pub fn new(length: f32) -> Self {
        Self {
            length,
            shaft_width: length * 0.04,
            tip_length: length * 0.15,
            tip_width: length * 0.1,
        }
    }

    pub fn into_object(self) -> GeometricObject {
        let mut vertices = Vec::with_capacity(13);
        let mut triangles = Vec::with_capacity(18);

        let half_shaft = self.shaft_width / 2.0;
        let shaft_top = self.length - self.tip_length;
        push_box(
            &mut vertices,
            &mut triangles,
            Point3::new(-half_shaft, -half_shaft, 0.0),
            Point3::new(half_shaft, half_shaft, shaft_top),
        );

        let base = vertices.len() as u32;
        let t = self.tip_width / 2.0;
        vertices.extend([
            Point3::new(-t, -t, shaft_top),
            Point3::new(t, -t, shaft_top),
            Point3::new(t, t, shaft_top),
            Point3::new(-t, t, shaft_top),
            Point3::new(0.0, 0.0, self.length),
        ]);
        let apex = base + 4;
        for side in 0..4 {
            triangles.push(Triangle::new(base + side, base + (side + 1) % 4, apex));
        }
        triangles.push(Triangle::new(base, base + 2, base + 1));
        triangles.push(Triangle::new(base, base + 3, base + 2));

        GeometricObject::new(vertices, triangles)
    }
}

impl From<Arrow> for GeometricObject {
    fn from(arrow: Arrow) -> Self {
        arrow.into_object()
    }
}

/// Append an axis-aligned box spanning `min..max` with outward winding
fn push_box(vertices: &mut Vec<Vertex>, triangles: &mut Vec<Triangle>, min: Vertex, max: Vertex) {
    let base = vertices.len() as u32;
    vertices.extend([
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ]);

    const FACES: [[u32; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    triangles.extend(
        FACES
            .iter()
            .map(|[a, b, c]| Triangle::new(base + a, base + b, base + c)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Every face normal must point away from the mesh centroid
    fn assert_outward(object: &GeometricObject) {
        let count = object.vertex_count() as f32;
        let centroid = object
            .vertices()
            .iter()
            .fold(nalgebra::Vector3::<f32>::zeros(), |acc, v| acc + v.coords)
            / count;

        for (i, face) in object.triangles().iter().enumerate() {
            let [a, b, c] = face.indices();
            let verts = object.vertices();
            let face_center =
                (verts[a as usize].coords + verts[b as usize].coords + verts[c as usize].coords)
                    / 3.0;
            let normal = object.face_normal(i).unwrap();
            assert!(
                normal.dot(&(face_center - centroid)) > 0.0,
                "triangle {i} winds inward"
            );
        }
    }

    #[test]
    fn test_unit_head_topology() {
        let head = Head::new(1.0, 1.0, 1.0).into_object();
        assert_eq!(head.vertex_count(), 8);
        assert_eq!(head.triangle_count(), 12);

        let expected: [[u32; 3]; 12] = [
            [0, 1, 2],
            [0, 2, 3],
            [1, 4, 6],
            [1, 6, 2],
            [4, 5, 7],
            [4, 7, 6],
            [5, 0, 3],
            [5, 3, 7],
            [3, 2, 6],
            [3, 6, 7],
            [1, 0, 5],
            [1, 5, 4],
        ];
        let actual: Vec<[u32; 3]> = head.triangles().iter().map(|t| t.indices()).collect();
        assert_eq!(actual, expected);

        assert_eq!(head.vertices()[0], Point3::new(1.0, 1.0, 2.0));
        assert_eq!(head.vertices()[6], Point3::new(0.0, 2.0, 3.0));
    }

    #[rstest]
    #[case(1.0, 1.0, 1.0)]
    #[case(0.5, 0.5, 0.5)]
    #[case(2.0, 0.25, 7.5)]
    #[case(0.0, 0.0, 0.0)]
    #[case(-1.0, 3.0, -0.5)]
    fn test_head_has_no_dangling_index(#[case] length: f32, #[case] height: f32, #[case] width: f32) {
        let head = Head::new(length, height, width).into_object();
        let count = head.vertex_count() as u32;
        assert!(head.indices().iter().all(|&i| i < count));
        assert!(head.validate().is_ok());
    }

    #[test]
    fn test_head_winding_is_outward() {
        assert_outward(&Head::new(1.0, 1.0, 1.0).into_object());
        assert_outward(&Head::new(0.3, 2.0, 1.5).into_object());
    }

    #[test]
    fn test_default_head_dimensions() {
        assert_eq!(Head::default(), Head::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_cuboid() {
        let cuboid = Cuboid::new(1.0, 2.0, 3.0).into_object();
        assert_eq!(cuboid.vertex_count(), 8);
        assert_eq!(cuboid.triangle_count(), 12);
        assert!(cuboid.validate().is_ok());
        assert_outward(&cuboid);
    }

    #[test]
    fn test_arrow() {
        let arrow = Arrow::new(2.0).into_object();
        assert_eq!(arrow.vertex_count(), 13);
        assert_eq!(arrow.triangle_count(), 18);
        assert!(arrow.validate().is_ok());

        let top = arrow
            .vertices()
            .iter()
            .map(|v| v.z)
            .fold(f32::MIN, f32::max);
        assert!((top - 2.0).abs() < 1e-6);
    }
}
