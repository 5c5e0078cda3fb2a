/// Test doubles shared by the unit tests

use nalgebra::Matrix4;

use crate::shader::{ArrayShader, FrameTarget, ShaderProgram};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear,
    Bind,
    Uniform(String, Matrix4<f32>),
    Attribute(String, usize),
    Draw(usize),
    Unbind,
}

impl Call {
    pub fn label(&self) -> String {
        match self {
            Call::Clear => "clear".to_string(),
            Call::Bind => "bind".to_string(),
            Call::Uniform(name, _) => format!("uniform:{name}"),
            Call::Attribute(name, _) => format!("attribute:{name}"),
            Call::Draw(count) => format!("draw:{count}"),
            Call::Unbind => "unbind".to_string(),
        }
    }
}

/// Shader that records every call it receives
#[derive(Debug, Default)]
pub struct RecordingShader {
    pub calls: Vec<Call>,
}

impl RecordingShader {
    /// Last value uploaded to a uniform
    pub fn uniform(&self, name: &str) -> Option<Matrix4<f32>> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Uniform(n, value) if n == name => Some(*value),
            _ => None,
        })
    }

    /// Values uploaded to a uniform, in order
    pub fn uniforms(&self, name: &str) -> Vec<Matrix4<f32>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Uniform(n, value) if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Draw(_)))
            .count()
    }
}

impl ShaderProgram for RecordingShader {
    fn bind(&mut self) {
        self.calls.push(Call::Bind);
    }

    fn set_uniform(&mut self, name: &str, value: &Matrix4<f32>) {
        self.calls.push(Call::Uniform(name.to_string(), *value));
    }

    fn unbind(&mut self) {
        self.calls.push(Call::Unbind);
    }
}

impl ArrayShader for RecordingShader {
    fn set_attribute(&mut self, name: &str, data: &[f32]) {
        self.calls.push(Call::Attribute(name.to_string(), data.len()));
    }

    fn draw_elements(&mut self, indices: &[u32]) {
        self.calls.push(Call::Draw(indices.len()));
    }
}

impl FrameTarget for RecordingShader {
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }
}
