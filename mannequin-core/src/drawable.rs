/// Drawables: mesh data bound to shader attributes
use crate::camera::CameraState;
use crate::error::{GeometryError, RenderError};
use crate::frame::CoordinateFrame;
use crate::geometry::GeometricObject;
use crate::shader::{self, ArrayShader, ShaderProgram};

/// Something that can be drawn with a shader of type `S`
pub trait Drawable<S: ?Sized> {
    fn bind(&self, shader: &mut S);
    fn draw(&self, shader: &mut S);
    fn unbind(&self, shader: &mut S);
}

/// Bind, upload camera and frame uniforms, draw, then unbind
pub fn render_drawable<S, D>(drawable: &D, shader: &mut S, camera: &CameraState, frame: &CoordinateFrame)
where
    S: ShaderProgram + ?Sized,
    D: Drawable<S> + ?Sized,
{
    drawable.bind(shader);
    shader.set_uniform(shader::MODEL_VIEW, camera.view_matrix());
    shader.set_uniform(shader::PROJECTION, camera.projection_matrix());
    shader.set_uniform(shader::OBJECT_COORD_FRAME, frame);
    drawable.draw(shader);
    drawable.unbind(shader);
}

/// Attribute names the mesh data is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeNames {
    pub position: String,
    pub color: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            position: shader::VERTEX_POSITION.to_string(),
            color: shader::VERTEX_COLOR.to_string(),
        }
    }
}

/// Host-side vertex arrays ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u32>,
    pub attributes: AttributeNames,
}

impl MeshBuffers {
    /// Pair a mesh with one RGB color per vertex
    pub fn new(
        object: &GeometricObject,
        colors: Vec<f32>,
        attributes: AttributeNames,
    ) -> Result<Self, GeometryError> {
        object.validate()?;

        let expected = object.vertex_count() * 3;
        if colors.len() != expected {
            return Err(GeometryError::ColorCount {
                expected,
                actual: colors.len(),
            });
        }

        Ok(Self {
            positions: object.geometry(),
            colors,
            indices: object.indices(),
            attributes,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl<S: ArrayShader + ?Sized> Drawable<S> for MeshBuffers {
    fn bind(&self, shader: &mut S) {
        shader.bind();
        shader.set_attribute(&self.attributes.position, &self.positions);
        shader.set_attribute(&self.attributes.color, &self.colors);
    }

    fn draw(&self, shader: &mut S) {
        shader.draw_elements(&self.indices);
    }

    fn unbind(&self, shader: &mut S) {
        shader.unbind();
    }
}

/// Turns host-side mesh buffers into back-end drawables
pub trait DrawableFactory {
    type Drawable;
    type Error: From<GeometryError>;

    fn attributes(&self) -> AttributeNames {
        AttributeNames::default()
    }

    fn create(&mut self, buffers: MeshBuffers) -> Result<Self::Drawable, Self::Error>;
}

/// Keeps meshes in host memory, for software rendering
#[derive(Debug, Clone, Default)]
pub struct HostMeshFactory {
    pub attributes: AttributeNames,
}

impl DrawableFactory for HostMeshFactory {
    type Drawable = MeshBuffers;
    type Error = RenderError;

    fn attributes(&self) -> AttributeNames {
        self.attributes.clone()
    }

    fn create(&mut self, buffers: MeshBuffers) -> Result<MeshBuffers, RenderError> {
        Ok(buffers)
    }
}
