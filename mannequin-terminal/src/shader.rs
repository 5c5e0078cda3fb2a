/// Software implementation of the vertex-color shader program
use std::collections::HashMap;

use mannequin_core::shader::{
    ArrayShader, FrameTarget, ShaderProgram, ShaderSchema, MODEL_VIEW, OBJECT_COORD_FRAME,
    PROJECTION, VERTEX_COLOR, VERTEX_POSITION,
};
use nalgebra::{Matrix4, Point3, Vector3};

use crate::renderer::{AsciiRenderer, ScreenVertex};

/// Brightness floor so faces seen edge-on remain visible
const AMBIENT: f32 = 0.2;

/// Runs the vertex stage on the CPU and rasterizes into an [`AsciiRenderer`]
pub struct SoftwareShader {
    renderer: AsciiRenderer,
    schema: ShaderSchema,
    uniforms: HashMap<String, Matrix4<f32>>,
    attributes: HashMap<String, Vec<f32>>,
    bound: bool,
}

impl SoftwareShader {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            renderer: AsciiRenderer::new(width, height),
            schema: ShaderSchema::vertex_color(),
            uniforms: HashMap::new(),
            attributes: HashMap::new(),
            bound: false,
        }
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.renderer.resize(width, height);
    }

    /// Last value uploaded to a uniform
    pub fn uploaded(&self, name: &str) -> Option<Matrix4<f32>> {
        self.uniforms.get(name).copied()
    }

    fn uniform(&self, name: &str) -> Matrix4<f32> {
        self.uploaded(name).unwrap_or_else(Matrix4::identity)
    }

    /// Project a model-space point to screen coordinates and depth
    fn project(&self, mvp: &Matrix4<f32>, point: &Point3<f32>) -> Option<ScreenVertex> {
        let clip = mvp * point.to_homogeneous();
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let width = self.renderer.width() as f32;
        let height = self.renderer.height() as f32;
        Some((
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
            ndc.z,
        ))
    }
}

impl ShaderProgram for SoftwareShader {
    fn bind(&mut self) {
        self.bound = true;
    }

    fn set_uniform(&mut self, name: &str, value: &Matrix4<f32>) {
        if self.schema.uniform(name).is_none() {
            log::warn!("uniform {name} is not declared by the program");
            return;
        }
        self.uniforms.insert(name.to_string(), *value);
    }

    fn unbind(&mut self) {
        self.bound = false;
        self.attributes.clear();
    }
}

impl ArrayShader for SoftwareShader {
    fn set_attribute(&mut self, name: &str, data: &[f32]) {
        if self.schema.attribute(name).is_none() {
            log::warn!("attribute {name} is not declared by the program");
            return;
        }
        self.attributes.insert(name.to_string(), data.to_vec());
    }

    fn draw_elements(&mut self, indices: &[u32]) {
        if !self.bound {
            log::warn!("draw issued while the program is unbound");
            return;
        }
        let Some(positions) = self.attributes.get(VERTEX_POSITION) else {
            log::warn!("draw issued without {VERTEX_POSITION}");
            return;
        };
        let colors = self.attributes.get(VERTEX_COLOR);

        let model = self.uniform(OBJECT_COORD_FRAME);
        let model_view = self.uniform(MODEL_VIEW) * model;
        let mvp = self.uniform(PROJECTION) * model_view;

        let vertex = |i: u32| -> Option<Point3<f32>> {
            let base = i as usize * 3;
            positions
                .get(base..base + 3)
                .map(|p| Point3::new(p[0], p[1], p[2]))
        };
        let color = |i: u32| -> [f32; 3] {
            let base = i as usize * 3;
            colors
                .and_then(|c| c.get(base..base + 3))
                .map_or([1.0; 3], |c| [c[0], c[1], c[2]])
        };

        let mut faces = Vec::with_capacity(indices.len() / 3);
        for tri in indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (vertex(tri[0]), vertex(tri[1]), vertex(tri[2])) else {
                log::warn!("triangle {tri:?} references a missing vertex");
                continue;
            };
            let (Some(sa), Some(sb), Some(sc)) =
                (self.project(&mvp, &a), self.project(&mvp, &b), self.project(&mvp, &c))
            else {
                continue; // clipped
            };

            // Shade by how directly the face looks at the camera, in eye space
            let (ea, eb, ec) = (
                model_view.transform_point(&a),
                model_view.transform_point(&b),
                model_view.transform_point(&c),
            );
            let normal = (eb - ea).cross(&(ec - ea));
            let facing = normal
                .try_normalize(1e-12)
                .map_or(0.0, |n| n.dot(&Vector3::z()).abs());
            let brightness = AMBIENT + (1.0 - AMBIENT) * facing;

            let (ca, cb, cc) = (color(tri[0]), color(tri[1]), color(tri[2]));
            let rgb = [
                (ca[0] + cb[0] + cc[0]) / 3.0,
                (ca[1] + cb[1] + cc[1]) / 3.0,
                (ca[2] + cb[2] + cc[2]) / 3.0,
            ];
            faces.push(([sa, sb, sc], brightness, rgb));
        }

        for (coords, brightness, rgb) in faces {
            self.renderer.draw_triangle(coords, brightness, rgb);
        }
    }
}

impl FrameTarget for SoftwareShader {
    fn clear(&mut self) {
        self.renderer.clear();
    }
}
