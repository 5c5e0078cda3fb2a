/// Camera state and projection presets
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::CameraError;
use crate::frame::{to_radians, CoordinateFrame, Frame};

/// Fixed projection presets selectable from the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionPreset {
    /// Orthographic, looking down the Z axis
    OrthoTop,
    /// Orthographic, looking from +X toward the origin
    OrthoFront,
    /// Orthographic, looking from +Y toward the origin
    OrthoSide,
    Perspective,
}

impl ProjectionPreset {
    pub const ALL: [ProjectionPreset; 4] = [
        ProjectionPreset::OrthoTop,
        ProjectionPreset::OrthoFront,
        ProjectionPreset::OrthoSide,
        ProjectionPreset::Perspective,
    ];

    /// Control value used by the projection type selector
    pub fn name(self) -> &'static str {
        match self {
            ProjectionPreset::OrthoTop => "orthotop",
            ProjectionPreset::OrthoFront => "orthofront",
            ProjectionPreset::OrthoSide => "orthoside",
            ProjectionPreset::Perspective => "perspective",
        }
    }

    /// Build the projection matrix for this preset
    pub fn projection_matrix(self, config: &CameraConfig) -> Matrix4<f32> {
        let s = config.view_scaler;
        match self {
            ProjectionPreset::Perspective => Matrix4::new_perspective(
                config.aspect,
                to_radians(config.fov_degrees),
                0.1 * s,
                6.0 * s,
            ),
            _ => Matrix4::new_orthographic(
                -config.aspect * s,
                config.aspect * s,
                -s,
                s,
                -4.0 * s,
                6.0 * s,
            ),
        }
    }

    /// Build the view matrix paired with this preset
    pub fn view_matrix(self, config: &CameraConfig) -> Matrix4<f32> {
        let origin = Point3::origin();
        match self {
            ProjectionPreset::OrthoTop => Matrix4::identity(),
            ProjectionPreset::OrthoFront => {
                Matrix4::look_at_rh(&Point3::new(1.0, 0.0, 0.0), &origin, &config.up)
            }
            ProjectionPreset::OrthoSide => {
                Matrix4::look_at_rh(&Point3::new(0.0, 1.0, 0.0), &origin, &config.up)
            }
            ProjectionPreset::Perspective => {
                Matrix4::look_at_rh(&config.eye, &config.gaze, &config.up)
            }
        }
    }
}

impl fmt::Display for ProjectionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionPreset {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| CameraError::UnknownPreset(s.to_string()))
    }
}

/// Camera placement and lens parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub eye: Point3<f32>,
    pub gaze: Point3<f32>,
    pub up: Vector3<f32>,
    /// Scales the orthographic bounds and the near/far planes
    pub view_scaler: f32,
    pub fov_degrees: f32,
    pub aspect: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(6.0, 5.0, 6.0),
            gaze: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 0.0, 1.0),
            view_scaler: 10.0,
            fov_degrees: 45.0,
            aspect: 4.0 / 3.0,
        }
    }
}

/// Camera frame plus the view and projection matrices derived from it
#[derive(Debug, Clone)]
pub struct CameraState {
    config: CameraConfig,
    frame: CoordinateFrame,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    preset: ProjectionPreset,
    roll_angle: f32,
    distance: f32,
}

impl CameraState {
    /// Start with the perspective preset
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let mut camera = Self {
            config,
            frame: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            preset: ProjectionPreset::Perspective,
            roll_angle: 0.0,
            distance: 0.0,
        };
        camera.select_preset(ProjectionPreset::Perspective)?;
        Ok(camera)
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }

    pub fn preset(&self) -> ProjectionPreset {
        self.preset
    }

    pub fn roll_angle(&self) -> f32 {
        self.roll_angle
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Move the roll control to an absolute angle in degrees
    pub fn set_roll_angle(&mut self, degrees: f32) -> Result<(), CameraError> {
        let delta = self.roll_angle - degrees;
        self.roll_by(delta)?;
        self.roll_angle = degrees;
        Ok(())
    }

    /// Rotate the camera frame about its own Z axis
    pub fn roll_by(&mut self, degrees: f32) -> Result<(), CameraError> {
        self.apply_local(&Frame::rotation_z(degrees))
    }

    /// Move the distance control to an absolute value
    pub fn set_distance(&mut self, distance: f32) -> Result<(), CameraError> {
        let delta = self.distance - distance;
        self.dolly_by(delta)?;
        self.distance = distance;
        Ok(())
    }

    /// Translate the camera frame along its own Z axis
    pub fn dolly_by(&mut self, delta: f32) -> Result<(), CameraError> {
        self.apply_local(&Frame::translation(0.0, 0.0, delta))
    }

    /// Change the viewport aspect ratio and rebuild the current projection
    pub fn set_aspect(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            log::warn!("ignoring aspect ratio {aspect}");
            return;
        }
        self.config.aspect = aspect;
        self.projection = self.preset.projection_matrix(&self.config);
    }

    /// Switch projection preset; the camera frame follows the preset's view
    pub fn select_preset(&mut self, preset: ProjectionPreset) -> Result<(), CameraError> {
        let view = preset.view_matrix(&self.config);
        let frame = invert(&view)?;

        self.projection = preset.projection_matrix(&self.config);
        self.view = view;
        self.frame = frame;
        self.preset = preset;
        log::debug!("projection preset switched to {preset}");
        Ok(())
    }

    fn apply_local(&mut self, transform: &CoordinateFrame) -> Result<(), CameraError> {
        let frame = self.frame * transform;
        let view = invert(&frame)?;
        self.frame = frame;
        self.view = view;
        Ok(())
    }
}

/// Invert a frame, rejecting singular or non-finite results
fn invert(matrix: &Matrix4<f32>) -> Result<Matrix4<f32>, CameraError> {
    matrix
        .try_inverse()
        .filter(|inverse| inverse.iter().all(|v| v.is_finite()))
        .ok_or(CameraError::SingularFrame)
}
