/// Composite scene objects assembled from shapes
pub mod axes;
pub mod body;

pub use axes::Axes;
pub use body::EntireBody;

use crate::drawable::{DrawableFactory, MeshBuffers};
use crate::geometry::GeometricObject;

/// Build a drawable from a shape and its per-vertex colors
pub(crate) fn build_part<F: DrawableFactory>(
    factory: &mut F,
    shape: impl Into<GeometricObject>,
    colors: Vec<f32>,
) -> Result<F::Drawable, F::Error> {
    let object = shape.into();
    let buffers = MeshBuffers::new(&object, colors, factory.attributes())?;
    factory.create(buffers)
}

/// Repeat an RGB palette across `vertex_count` vertices
pub fn cycle_palette(palette: &[[f32; 3]], vertex_count: usize) -> Vec<f32> {
    if palette.is_empty() {
        return Vec::new();
    }
    palette
        .iter()
        .cycle()
        .take(vertex_count)
        .flat_map(|rgb| rgb.iter().copied())
        .collect()
}

/// One flat RGB color for every vertex
pub fn solid_color(rgb: [f32; 3], vertex_count: usize) -> Vec<f32> {
    cycle_palette(&[rgb], vertex_count)
}
