/// WebGL2 implementations of the shader program and drawable traits
use std::collections::HashMap;

use mannequin_core::drawable::{AttributeNames, Drawable, DrawableFactory, MeshBuffers};
use mannequin_core::shader::{FrameTarget, ShaderProgram, ShaderSchema};
use mannequin_core::RenderError;
use nalgebra::Matrix4;
use web_sys::{WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader as GlShader, WebGlUniformLocation};

fn backend(msg: impl Into<String>) -> RenderError {
    RenderError::Backend(msg.into())
}

fn compile_stage(gl: &Gl, stage: u32, source: &str) -> Result<GlShader, RenderError> {
    let shader = gl
        .create_shader(stage)
        .ok_or_else(|| backend("unable to create shader object"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(backend(format!("shader compilation failed: {log}")))
    }
}

/// A linked vertex/fragment program with resolved uniform and attribute locations
pub struct WebGlShader {
    gl: Gl,
    program: WebGlProgram,
    uniforms: HashMap<String, WebGlUniformLocation>,
    attributes: HashMap<String, u32>,
}

impl WebGlShader {
    pub fn new(
        gl: &Gl,
        vertex_source: &str,
        fragment_source: &str,
        schema: &ShaderSchema,
    ) -> Result<Self, RenderError> {
        let vertex = compile_stage(gl, Gl::VERTEX_SHADER, vertex_source)?;
        let fragment = compile_stage(gl, Gl::FRAGMENT_SHADER, fragment_source)?;

        let program = gl
            .create_program()
            .ok_or_else(|| backend("unable to create program object"))?;
        gl.attach_shader(&program, &vertex);
        gl.attach_shader(&program, &fragment);
        gl.link_program(&program);

        let linked = gl
            .get_program_parameter(&program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            return Err(backend(format!("program link failed: {log}")));
        }

        let mut uniforms = HashMap::new();
        for decl in &schema.uniforms {
            match gl.get_uniform_location(&program, &decl.name) {
                Some(location) => {
                    uniforms.insert(decl.name.clone(), location);
                }
                None => log::warn!("uniform {} is unused by the program", decl.name),
            }
        }

        let mut attributes = HashMap::new();
        for decl in &schema.attributes {
            let location = gl.get_attrib_location(&program, &decl.name);
            if location < 0 {
                log::warn!("attribute {} is unused by the program", decl.name);
            } else {
                attributes.insert(decl.name.clone(), location as u32);
            }
        }

        Ok(Self {
            gl: gl.clone(),
            program,
            uniforms,
            attributes,
        })
    }

    pub fn gl(&self) -> &Gl {
        &self.gl
    }

    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }
}

impl ShaderProgram for WebGlShader {
    fn bind(&mut self) {
        self.gl.use_program(Some(&self.program));
    }

    fn set_uniform(&mut self, name: &str, value: &Matrix4<f32>) {
        match self.uniforms.get(name) {
            // nalgebra stores column-major, as GL expects
            Some(location) => self
                .gl
                .uniform_matrix4fv_with_f32_array(Some(location), false, value.as_slice()),
            None => log::warn!("uniform {name} is not declared by the program"),
        }
    }

    fn unbind(&mut self) {
        self.gl.use_program(None);
    }
}

impl FrameTarget for WebGlShader {
    fn clear(&mut self) {
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }
}

/// Mesh uploaded into GPU buffers
pub struct WebGlMesh {
    positions: WebGlBuffer,
    colors: WebGlBuffer,
    indices: WebGlBuffer,
    index_count: i32,
    attributes: AttributeNames,
}

impl WebGlMesh {
    fn bind_attribute(shader: &WebGlShader, buffer: &WebGlBuffer, name: &str) {
        let gl = shader.gl();
        let Some(location) = shader.attribute_location(name) else {
            return;
        };
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        gl.vertex_attrib_pointer_with_i32(location, 3, Gl::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(location);
    }
}

impl Drawable<WebGlShader> for WebGlMesh {
    fn bind(&self, shader: &mut WebGlShader) {
        shader.bind();
        Self::bind_attribute(shader, &self.positions, &self.attributes.position);
        Self::bind_attribute(shader, &self.colors, &self.attributes.color);
        shader
            .gl()
            .bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&self.indices));
    }

    fn draw(&self, shader: &mut WebGlShader) {
        shader
            .gl()
            .draw_elements_with_i32(Gl::TRIANGLES, self.index_count, Gl::UNSIGNED_INT, 0);
    }

    fn unbind(&self, shader: &mut WebGlShader) {
        for name in [&self.attributes.position, &self.attributes.color] {
            if let Some(location) = shader.attribute_location(name) {
                shader.gl().disable_vertex_attrib_array(location);
            }
        }
        let gl = shader.gl();
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, None);
        shader.unbind();
    }
}

/// Creates [`WebGlMesh`] drawables on one GL context
pub struct WebGlMeshFactory {
    gl: Gl,
    attributes: AttributeNames,
}

impl WebGlMeshFactory {
    pub fn new(gl: &Gl) -> Self {
        Self {
            gl: gl.clone(),
            attributes: AttributeNames::default(),
        }
    }

    fn upload(&self, target: u32, bytes: &[u8]) -> Result<WebGlBuffer, RenderError> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or_else(|| backend("unable to create buffer"))?;
        self.gl.bind_buffer(target, Some(&buffer));
        self.gl
            .buffer_data_with_u8_array(target, bytes, Gl::STATIC_DRAW);
        self.gl.bind_buffer(target, None);
        Ok(buffer)
    }
}

impl DrawableFactory for WebGlMeshFactory {
    type Drawable = WebGlMesh;
    type Error = RenderError;

    fn attributes(&self) -> AttributeNames {
        self.attributes.clone()
    }

    fn create(&mut self, buffers: MeshBuffers) -> Result<WebGlMesh, RenderError> {
        let index_count = i32::try_from(buffers.indices.len())
            .map_err(|_| backend("index buffer too large"))?;

        Ok(WebGlMesh {
            positions: self.upload(Gl::ARRAY_BUFFER, bytemuck::cast_slice(&buffers.positions))?,
            colors: self.upload(Gl::ARRAY_BUFFER, bytemuck::cast_slice(&buffers.colors))?,
            indices: self.upload(Gl::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(&buffers.indices))?,
            index_count,
            attributes: buffers.attributes,
        })
    }
}
