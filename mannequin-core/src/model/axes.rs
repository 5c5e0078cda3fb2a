/// Reference axes: red X, green Y, blue Z
use nalgebra::Vector3;

use crate::drawable::DrawableFactory;
use crate::frame::{CoordinateFrame, Frame};
use crate::group::{ObjectGroup, Renderable};
use crate::shapes::Arrow;

use super::{build_part, solid_color};

#[derive(Debug)]
pub struct Axes<D> {
    arrows: ObjectGroup<D>,
}

impl<D> Axes<D> {
    pub fn new<F>(factory: &mut F, length: f32) -> Result<Self, F::Error>
    where
        F: DrawableFactory<Drawable = D>,
    {
        // the arrow shape points along +Z; each frame turns it onto its axis
        let placements: [([f32; 3], CoordinateFrame); 3] = [
            ([1.0, 0.0, 0.0], Frame::rotation(90.0, Vector3::y())),
            ([0.0, 1.0, 0.0], Frame::rotation(-90.0, Vector3::x())),
            ([0.0, 0.0, 1.0], Frame::identity()),
        ];

        let mut arrows = ObjectGroup::new();
        for (color, frame) in placements {
            let shape = Arrow::new(length);
            let vertex_count = shape.into_object().vertex_count();
            let arrow = build_part(factory, shape, solid_color(color, vertex_count))?;
            arrows.add(arrow, frame);
        }

        Ok(Self { arrows })
    }

    pub fn arrows(&self) -> &ObjectGroup<D> {
        &self.arrows
    }
}

impl<D> Renderable<D> for Axes<D> {
    fn render(&self, renderer: &mut dyn FnMut(&D, &CoordinateFrame), frame: &CoordinateFrame) {
        self.arrows.render(renderer, frame);
    }
}
