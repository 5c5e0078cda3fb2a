/// Coordinate frames: 4x4 homogeneous transforms between local and parent space
use nalgebra::{Matrix4, Vector3};

/// Transform mapping an object's local space into its parent's space
pub type CoordinateFrame = Matrix4<f32>;

/// Convert degrees to radians
pub fn to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Frame builders used by the scene objects and camera controls
pub struct Frame;

impl Frame {
    pub fn identity() -> CoordinateFrame {
        Matrix4::identity()
    }

    pub fn translation(x: f32, y: f32, z: f32) -> CoordinateFrame {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Rotation about an arbitrary axis, angle in degrees
    pub fn rotation(degrees: f32, axis: Vector3<f32>) -> CoordinateFrame {
        match nalgebra::Unit::try_new(axis, f32::EPSILON) {
            Some(axis) => Matrix4::from_axis_angle(&axis, to_radians(degrees)),
            None => Matrix4::identity(),
        }
    }

    /// Rotation about the local Z axis, angle in degrees
    pub fn rotation_z(degrees: f32) -> CoordinateFrame {
        Self::rotation(degrees, Vector3::z())
    }

    /// Place a child frame inside a parent frame: the local transform applies first
    pub fn compose(parent: &CoordinateFrame, local: &CoordinateFrame) -> CoordinateFrame {
        parent * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_identity_rotation() {
        let matrix = Frame::rotation_z(0.0);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert_eq!(Frame::rotation(30.0, Vector3::zeros()), Frame::identity());
    }

    #[test]
    fn test_compose_applies_local_first() {
        let parent = Frame::rotation_z(90.0);
        let local = Frame::translation(1.0, 0.0, 0.0);
        let point = Frame::compose(&parent, &local).transform_point(&Point3::origin());
        // translate to +X, then rotate onto +Y
        assert!((point - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }
}
