/// Object groups: ordered drawables placed by local coordinate frames
///
/// A group does not know how to draw. `render` walks its entries and hands
/// each drawable, together with its effective frame, to a caller-supplied
/// callback that performs the actual shader work.
use crate::frame::{CoordinateFrame, Frame};

/// Anything that renders drawables of type `D` relative to a parent frame
pub trait Renderable<D> {
    fn render(&self, renderer: &mut dyn FnMut(&D, &CoordinateFrame), frame: &CoordinateFrame);
}

/// Member of a group: a drawable or a nested group
#[derive(Debug)]
pub enum Member<D> {
    Drawable(D),
    Group(ObjectGroup<D>),
}

/// A member together with its frame relative to the group
#[derive(Debug)]
pub struct GroupEntry<D> {
    pub member: Member<D>,
    pub frame: CoordinateFrame,
}

/// Ordered collection of members, drawn in insertion order
#[derive(Debug)]
pub struct ObjectGroup<D> {
    entries: Vec<GroupEntry<D>>,
}

impl<D> ObjectGroup<D> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a drawable placed by `frame`
    pub fn add(&mut self, drawable: D, frame: CoordinateFrame) {
        self.entries.push(GroupEntry {
            member: Member::Drawable(drawable),
            frame,
        });
    }

    /// Append a nested group placed by `frame`
    pub fn add_group(&mut self, group: ObjectGroup<D>, frame: CoordinateFrame) {
        self.entries.push(GroupEntry {
            member: Member::Group(group),
            frame,
        });
    }

    pub fn entries(&self) -> &[GroupEntry<D>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke `renderer` once per drawable with `parent * local` as its frame
    pub fn render<F>(&self, mut renderer: F, parent: &CoordinateFrame)
    where
        F: FnMut(&D, &CoordinateFrame),
    {
        self.render_into(&mut renderer, parent);
    }

    fn render_into(&self, renderer: &mut dyn FnMut(&D, &CoordinateFrame), parent: &CoordinateFrame) {
        for entry in &self.entries {
            let effective = Frame::compose(parent, &entry.frame);
            match &entry.member {
                Member::Drawable(drawable) => renderer(drawable, &effective),
                Member::Group(group) => group.render_into(renderer, &effective),
            }
        }
    }
}

impl<D> Default for ObjectGroup<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Renderable<D> for ObjectGroup<D> {
    fn render(&self, renderer: &mut dyn FnMut(&D, &CoordinateFrame), frame: &CoordinateFrame) {
        self.render_into(renderer, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    #[test]
    fn test_empty_group_is_noop() {
        let group: ObjectGroup<&str> = ObjectGroup::new();
        let mut calls = 0;
        group.render(|_, _| calls += 1, &Frame::identity());
        assert_eq!(calls, 0);
        assert!(group.is_empty());
    }

    #[test]
    fn test_render_preserves_insertion_order() {
        let mut group = ObjectGroup::new();
        for name in ["head", "torso", "left arm", "right arm", "legs"] {
            group.add(name, Frame::identity());
        }

        let mut seen = Vec::new();
        group.render(|drawable, _| seen.push(*drawable), &Frame::identity());
        assert_eq!(seen, vec!["head", "torso", "left arm", "right arm", "legs"]);
        assert_eq!(group.len(), 5);
    }

    #[test]
    fn test_parent_frame_applies_after_local() {
        let local = Frame::translation(2.0, 0.0, 0.0);
        let parent = Frame::rotation_z(90.0);
        let mut group = ObjectGroup::new();
        group.add(1u32, local);

        let mut presented = Vec::new();
        group.render(|_, frame| presented.push(*frame), &parent);

        let expected = parent * local;
        let swapped = local * parent;
        assert!((expected - swapped).norm() > 1.0);
        assert_eq!(presented.len(), 1);
        assert!((presented[0] - expected).norm() < 1e-6);
    }

    #[test]
    fn test_nested_groups_compose_recursively() {
        let mut arm = ObjectGroup::new();
        arm.add("hand", Frame::translation(0.0, 0.0, -1.0));

        let mut body = ObjectGroup::new();
        body.add("torso", Frame::identity());
        body.add_group(arm, Frame::translation(1.0, 0.0, 0.0));

        let world = Frame::translation(0.0, 5.0, 0.0);
        let mut presented: Vec<(&str, Matrix4<f32>)> = Vec::new();
        body.render(|name, frame| presented.push((*name, *frame)), &world);

        assert_eq!(presented.len(), 2);
        assert_eq!(presented[0].0, "torso");
        assert_eq!(presented[1].0, "hand");
        let hand = Frame::translation(1.0, 5.0, -1.0);
        assert!((presented[1].1 - hand).norm() < 1e-6);
    }

    #[test]
    fn test_renderable_trait_object() {
        let mut group = ObjectGroup::new();
        group.add('a', Frame::identity());
        group.add('b', Frame::identity());

        let renderable: &dyn Renderable<char> = &group;
        let mut seen = String::new();
        renderable.render(&mut |c, _| seen.push(*c), &Frame::identity());
        assert_eq!(seen, "ab");
    }
}
