/// Shader program abstraction shared by the rendering back-ends
use nalgebra::Matrix4;

/// Uniform receiving the view matrix
pub const MODEL_VIEW: &str = "modelView";
/// Uniform receiving the projection matrix
pub const PROJECTION: &str = "projection";
/// Uniform receiving the object's effective coordinate frame
pub const OBJECT_COORD_FRAME: &str = "objectCoordFrame";
/// Per-vertex position attribute
pub const VERTEX_POSITION: &str = "vertexPos";
/// Per-vertex color attribute
pub const VERTEX_COLOR: &str = "vertexCol";

/// Semantic type of a declared shader variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlslType {
    Vec3,
    Mat4,
}

impl GlslType {
    /// Number of floats in one value
    pub fn components(self) -> usize {
        match self {
            GlslType::Vec3 => 3,
            GlslType::Mat4 => 16,
        }
    }
}

/// A named shader input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub name: String,
    pub ty: GlslType,
}

impl VariableDecl {
    pub fn new(name: &str, ty: GlslType) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// Uniforms and attributes a program declares
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderSchema {
    pub uniforms: Vec<VariableDecl>,
    pub attributes: Vec<VariableDecl>,
}

impl ShaderSchema {
    /// Schema of the per-vertex color program used by the scene
    pub fn vertex_color() -> Self {
        Self {
            uniforms: vec![
                VariableDecl::new(MODEL_VIEW, GlslType::Mat4),
                VariableDecl::new(PROJECTION, GlslType::Mat4),
                VariableDecl::new(OBJECT_COORD_FRAME, GlslType::Mat4),
            ],
            attributes: vec![
                VariableDecl::new(VERTEX_POSITION, GlslType::Vec3),
                VariableDecl::new(VERTEX_COLOR, GlslType::Vec3),
            ],
        }
    }

    pub fn uniform(&self, name: &str) -> Option<&VariableDecl> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&VariableDecl> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A compiled program that can be bound and fed matrix uniforms
pub trait ShaderProgram {
    fn bind(&mut self);
    fn set_uniform(&mut self, name: &str, value: &Matrix4<f32>);
    fn unbind(&mut self);
}

/// A program that accepts client-side vertex arrays
pub trait ArrayShader: ShaderProgram {
    fn set_attribute(&mut self, name: &str, data: &[f32]);
    fn draw_elements(&mut self, indices: &[u32]);
}

/// A program bound to a framebuffer that can be cleared at the start of a frame
pub trait FrameTarget: ShaderProgram {
    fn clear(&mut self);
}
