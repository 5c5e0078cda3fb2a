/// The articulated figure
use crate::drawable::DrawableFactory;
use crate::frame::{CoordinateFrame, Frame};
use crate::geometry::GeometricObject;
use crate::group::{ObjectGroup, Renderable};
use crate::shapes::Head;

use super::{build_part, cycle_palette};

/// Colors cycled across the head's vertices
pub const HEAD_PALETTE: [[f32; 3]; 4] = [
    [0.3, 0.0, 0.8],
    [1.0, 1.0, 1.0],
    [0.7, 0.1, 0.0],
    [0.3, 0.9, 0.2],
];

/// Body made of parts, each with its own frame relative to the body
#[derive(Debug)]
pub struct EntireBody<D> {
    parts: ObjectGroup<D>,
}

impl<D> EntireBody<D> {
    pub fn new<F>(factory: &mut F) -> Result<Self, F::Error>
    where
        F: DrawableFactory<Drawable = D>,
    {
        let mut body = Self {
            parts: ObjectGroup::new(),
        };

        let head = Head::new(1.0, 1.0, 1.0).into_object();
        let colors = cycle_palette(&HEAD_PALETTE, head.vertex_count());
        body.add_part(factory, head, colors, Frame::identity())?;

        log::debug!("body assembled with {} part(s)", body.parts.len());
        Ok(body)
    }

    /// Attach another part, colored per vertex, at `frame` relative to the body
    pub fn add_part<F>(
        &mut self,
        factory: &mut F,
        shape: impl Into<GeometricObject>,
        colors: Vec<f32>,
        frame: CoordinateFrame,
    ) -> Result<(), F::Error>
    where
        F: DrawableFactory<Drawable = D>,
    {
        let part = build_part(factory, shape, colors)?;
        self.parts.add(part, frame);
        Ok(())
    }

    pub fn parts(&self) -> &ObjectGroup<D> {
        &self.parts
    }
}

impl<D> Renderable<D> for EntireBody<D> {
    fn render(&self, renderer: &mut dyn FnMut(&D, &CoordinateFrame), frame: &CoordinateFrame) {
        self.parts.render(renderer, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::{HostMeshFactory, MeshBuffers};
    use crate::error::{GeometryError, RenderError};
    use crate::shapes::Cuboid;
    use crate::model::solid_color;

    #[test]
    fn test_body_has_head() {
        let body = EntireBody::new(&mut HostMeshFactory::default()).unwrap();
        assert_eq!(body.parts().len(), 1);

        let mut heads: Vec<MeshBuffers> = Vec::new();
        body.render(&mut |mesh, _| heads.push(mesh.clone()), &Frame::identity());
        assert_eq!(heads.len(), 1);
        assert_eq!(heads[0].vertex_count(), 8);
        assert_eq!(heads[0].triangle_count(), 12);
        assert_eq!(&heads[0].colors[..6], &[0.3, 0.0, 0.8, 1.0, 1.0, 1.0]);
        // palette wraps after four vertices
        assert_eq!(heads[0].colors.len(), 24);
        assert_eq!(&heads[0].colors[12..15], &[0.3, 0.0, 0.8]);
    }

    #[test]
    fn test_add_part_extends_render_order() {
        let mut factory = HostMeshFactory::default();
        let mut body = EntireBody::new(&mut factory).unwrap();
        let torso = Cuboid::new(1.0, 1.0, 2.0);
        body.add_part(
            &mut factory,
            torso,
            solid_color([0.2, 0.2, 0.9], 8),
            Frame::translation(0.0, 1.0, 0.0),
        )
        .unwrap();

        let world = Frame::translation(0.0, 0.0, 1.0);
        let mut frames = Vec::new();
        body.render(&mut |_, frame| frames.push(*frame), &world);
        assert_eq!(frames.len(), 2);
        assert!((frames[0] - world).norm() < 1e-6);
        assert!((frames[1] - Frame::translation(0.0, 1.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_add_part_rejects_short_color_array() {
        let mut factory = HostMeshFactory::default();
        let mut body = EntireBody::new(&mut factory).unwrap();
        let result = body.add_part(&mut factory, Cuboid::new(1.0, 1.0, 1.0), vec![1.0; 3], Frame::identity());
        assert_eq!(
            result,
            Err(RenderError::Geometry(GeometryError::ColorCount {
                expected: 24,
                actual: 3
            }))
        );
        assert_eq!(body.parts().len(), 1);
    }
}
