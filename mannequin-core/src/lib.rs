/// Mannequin Core Library - Scene model for the articulated figure demo
///
/// This library provides the platform-independent core: mesh data, shape
/// generators, coordinate frames, object groups, the camera and the scene
/// root. Rendering back-ends plug in through the `ShaderProgram` and
/// `Drawable` traits.

pub mod camera;
pub mod drawable;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod group;
pub mod model;
pub mod scene;
pub mod shader;
pub mod shapes;
pub mod viewport;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use camera::{CameraConfig, CameraState, ProjectionPreset};
pub use drawable::{render_drawable, AttributeNames, Drawable, DrawableFactory, HostMeshFactory, MeshBuffers};
pub use error::{CameraError, GeometryError, RenderError};
pub use frame::{CoordinateFrame, Frame};
pub use geometry::{GeometricObject, Triangle, Vertex};
pub use group::{ObjectGroup, Renderable};
pub use model::{Axes, EntireBody};
pub use scene::{ControlEvent, Scene, SceneConfig};
pub use shader::{ArrayShader, FrameTarget, GlslType, ShaderProgram, ShaderSchema};
pub use shapes::{Arrow, Cuboid, Head};
