/// Scene root: camera state, top-level objects and the per-frame render path
use nalgebra::Vector3;

use crate::camera::{CameraConfig, CameraState, ProjectionPreset};
use crate::drawable::{render_drawable, Drawable, DrawableFactory};
use crate::error::CameraError;
use crate::frame::{CoordinateFrame, Frame};
use crate::group::Renderable;
use crate::model::{Axes, EntireBody};
use crate::shader::{FrameTarget, ShaderProgram};

/// Scene construction parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub axes_length: f32,
    /// World position of the body
    pub body_position: Vector3<f32>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            axes_length: 5.0,
            body_position: Vector3::zeros(),
        }
    }
}

/// Input from the camera controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Absolute roll slider value in degrees
    RollChanged(f32),
    /// Absolute distance slider value
    DistanceChanged(f32),
    ProjectionChanged(ProjectionPreset),
}

pub struct Scene<D> {
    config: SceneConfig,
    camera: CameraState,
    axes: Axes<D>,
    body: EntireBody<D>,
    body_frame: CoordinateFrame,
}

impl<D> Scene<D> {
    pub fn new<F>(config: SceneConfig, factory: &mut F) -> Result<Self, F::Error>
    where
        F: DrawableFactory<Drawable = D>,
        F::Error: From<CameraError>,
    {
        let camera = CameraState::new(config.camera.clone())?;
        let body = EntireBody::new(factory)?;
        let axes = Axes::new(factory, config.axes_length)?;
        let p = config.body_position;
        let body_frame = Frame::translation(p.x, p.y, p.z);

        log::info!(
            "scene ready: {} body part(s), {} axis arrow(s), {} projection",
            body.parts().len(),
            axes.arrows().len(),
            camera.preset()
        );

        Ok(Self {
            config,
            camera,
            axes,
            body,
            body_frame,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn body(&self) -> &EntireBody<D> {
        &self.body
    }

    pub fn axes(&self) -> &Axes<D> {
        &self.axes
    }

    pub fn body_frame(&self) -> &CoordinateFrame {
        &self.body_frame
    }

    pub fn set_body_frame(&mut self, frame: CoordinateFrame) {
        self.body_frame = frame;
    }

    /// Follow a viewport resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
    }

    /// Apply a control change to the camera
    pub fn handle(&mut self, event: ControlEvent) -> Result<(), CameraError> {
        log::debug!("control event: {event:?}");
        match event {
            ControlEvent::RollChanged(degrees) => self.camera.set_roll_angle(degrees),
            ControlEvent::DistanceChanged(distance) => self.camera.set_distance(distance),
            ControlEvent::ProjectionChanged(preset) => self.camera.select_preset(preset),
        }
    }

    /// Draw every top-level object with the current camera
    pub fn render<S>(&self, shader: &mut S)
    where
        S: ShaderProgram + ?Sized,
        D: Drawable<S>,
    {
        let camera = &self.camera;
        let mut renderer =
            |drawable: &D, frame: &CoordinateFrame| render_drawable(drawable, shader, camera, frame);

        self.axes.render(&mut renderer, &Frame::identity());
        self.body.render(&mut renderer, &self.body_frame);
    }

    /// One animation tick: clear the target, then render
    pub fn tick<T>(&self, target: &mut T)
    where
        T: FrameTarget + ?Sized,
        D: Drawable<T>,
    {
        target.clear();
        self.render(target);
    }
}
