/// Error types for mesh binding, camera control and scene assembly
use thiserror::Error;

/// Errors raised when mesh data is bound into a drawable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("triangle {triangle} references vertex {index}, but the object has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("expected {expected} color components (3 per vertex), got {actual}")]
    ColorCount { expected: usize, actual: usize },
}

/// Errors raised by camera state updates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera frame is not invertible")]
    SingularFrame,
    #[error("unknown projection type: {0}")]
    UnknownPreset(String),
}

/// Errors raised while assembling or drawing a scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error("rendering back-end failed: {0}")]
    Backend(String),
}
