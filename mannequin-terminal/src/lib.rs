/// Terminal front-end: the mannequin scene drawn as colored ASCII
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use mannequin_core::{CameraState, ControlEvent, HostMeshFactory, MeshBuffers, ProjectionPreset, Scene, SceneConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;
pub mod shader;

pub use renderer::AsciiRenderer;
pub use shader::SoftwareShader;

/// Roll slider range in degrees
pub const ROLL_RANGE: (f32, f32) = (-180.0, 180.0);
/// Distance slider range
pub const DISTANCE_RANGE: (f32, f32) = (-10.0, 10.0);
const ROLL_STEP: f32 = 5.0;
const DISTANCE_STEP: f32 = 0.5;

/// Keep roll and distance values inside the slider ranges
pub fn clamp_to_slider(event: ControlEvent) -> ControlEvent {
    match event {
        ControlEvent::RollChanged(degrees) => {
            ControlEvent::RollChanged(degrees.clamp(ROLL_RANGE.0, ROLL_RANGE.1))
        }
        ControlEvent::DistanceChanged(distance) => {
            ControlEvent::DistanceChanged(distance.clamp(DISTANCE_RANGE.0, DISTANCE_RANGE.1))
        }
        preset => preset,
    }
}

/// Aspect ratio of a character grid; cells are roughly twice as tall as wide
fn grid_aspect(width: usize, height: usize) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / (2.0 * height as f32))
}

/// Map a key press to a camera control change
pub fn control_for_key(code: KeyCode, camera: &CameraState) -> Option<ControlEvent> {
    let roll = |delta: f32| clamp_to_slider(ControlEvent::RollChanged(camera.roll_angle() + delta));
    let distance =
        |delta: f32| clamp_to_slider(ControlEvent::DistanceChanged(camera.distance() + delta));

    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(roll(-ROLL_STEP)),
        KeyCode::Right | KeyCode::Char('d') => Some(roll(ROLL_STEP)),
        KeyCode::Up | KeyCode::Char('w') => Some(distance(DISTANCE_STEP)),
        KeyCode::Down | KeyCode::Char('s') => Some(distance(-DISTANCE_STEP)),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Some(ControlEvent::ProjectionChanged(ProjectionPreset::ALL[index]))
        }
        _ => None,
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene<MeshBuffers>,
    shader: SoftwareShader,
    running: bool,
    frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: SceneConfig, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(config, target_fps, width as usize, height as usize)
    }

    /// Build the app for a fixed character grid
    pub fn with_size(
        mut config: SceneConfig,
        target_fps: u32,
        width: usize,
        height: usize,
    ) -> io::Result<Self> {
        if let Some(aspect) = grid_aspect(width, height) {
            config.camera.aspect = aspect;
        }

        let scene = Scene::new(config, &mut HostMeshFactory::default())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to build scene: {}", e)))?;

        Ok(Self {
            scene,
            shader: SoftwareShader::new(width, height),
            running: true,
            frame_time: Duration::from_millis(1000 / u64::from(target_fps.max(1))),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn scene(&self) -> &Scene<MeshBuffers> {
        &self.scene
    }

    pub fn shader(&self) -> &SoftwareShader {
        &self.shader
    }

    /// Forward a control change to the scene, clamped to the slider ranges
    pub fn apply(&mut self, event: ControlEvent) -> io::Result<()> {
        let clamped = clamp_to_slider(event);
        if clamped != event {
            log::warn!("{event:?} is outside the control range, using {clamped:?}");
        }
        self.scene
            .handle(clamped)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("Camera update failed: {}", e)))
    }

    /// Resize the character grid and follow it with the camera aspect
    pub fn resize(&mut self, width: usize, height: usize) {
        self.shader.resize(width, height);
        if let Some(aspect) = grid_aspect(width, height) {
            self.scene.set_aspect(aspect);
        }
    }

    /// Render a single frame into the software target without touching the terminal
    pub fn render_offscreen(&mut self) {
        self.scene.tick(&mut self.shader);
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                code => {
                    if let Some(control) = control_for_key(code, self.scene.camera()) {
                        if let Err(e) = self.scene.handle(control) {
                            log::warn!("ignoring {control:?}: {e}");
                        }
                    }
                }
            },
            Event::Resize(width, height) => {
                self.resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_offscreen();

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.shader.renderer().draw(&mut stdout)?;

        // Draw UI overlay
        let camera = self.scene.camera();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Mannequin | FPS: {:.1} | {} | roll {:.0} dist {:.1} | ←/→ roll ↑/↓ distance 1-4 projection Q quit",
                self.fps,
                camera.preset(),
                camera.roll_angle(),
                camera.distance(),
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mannequin_core::shader::PROJECTION;
    use mannequin_core::CameraConfig;
    use nalgebra::Matrix4;

    #[test]
    fn test_key_mapping() {
        let camera = CameraState::new(CameraConfig::default()).unwrap();
        assert_eq!(
            control_for_key(KeyCode::Right, &camera),
            Some(ControlEvent::RollChanged(5.0))
        );
        assert_eq!(
            control_for_key(KeyCode::Down, &camera),
            Some(ControlEvent::DistanceChanged(-0.5))
        );
        assert_eq!(
            control_for_key(KeyCode::Char('3'), &camera),
            Some(ControlEvent::ProjectionChanged(ProjectionPreset::OrthoSide))
        );
        assert_eq!(control_for_key(KeyCode::Char('x'), &camera), None);
    }

    #[test]
    fn test_roll_clamped_to_slider_range() {
        let mut camera = CameraState::new(CameraConfig::default()).unwrap();
        camera.set_roll_angle(178.0).unwrap();
        assert_eq!(
            control_for_key(KeyCode::Right, &camera),
            Some(ControlEvent::RollChanged(180.0))
        );
    }

    #[test]
    fn test_offscreen_frame() {
        let mut app = TerminalApp::with_size(SceneConfig::default(), 30, 60, 30).unwrap();
        app.apply(ControlEvent::ProjectionChanged(ProjectionPreset::OrthoFront))
            .unwrap();
        app.render_offscreen();
        assert!(app.shader().renderer().covered_cells() > 0);
        assert_eq!(app.scene().camera().preset(), ProjectionPreset::OrthoFront);
    }

    #[test]
    fn test_out_of_range_start_values_are_clamped() {
        let mut app = TerminalApp::with_size(SceneConfig::default(), 30, 40, 20).unwrap();
        app.apply(ControlEvent::RollChanged(720.0)).unwrap();
        app.apply(ControlEvent::DistanceChanged(-25.0)).unwrap();

        let camera = app.scene().camera();
        assert_eq!(camera.roll_angle(), 180.0);
        assert_eq!(camera.distance(), -10.0);
        // the next key press moves by one step, not back from 720
        assert_eq!(
            control_for_key(KeyCode::Left, camera),
            Some(ControlEvent::RollChanged(175.0))
        );
    }

    #[test]
    fn test_resize_updates_uploaded_projection() {
        let mut app = TerminalApp::with_size(SceneConfig::default(), 30, 40, 40).unwrap();
        app.resize(160, 40);
        app.render_offscreen();

        assert!((app.scene().camera().config().aspect - 2.0).abs() < 1e-6);
        let config = CameraConfig {
            aspect: 2.0,
            ..CameraConfig::default()
        };
        let expected: Matrix4<f32> = ProjectionPreset::Perspective.projection_matrix(&config);
        let uploaded = app.shader().uploaded(PROJECTION).unwrap();
        assert!((uploaded - expected).norm() < 1e-5);
        assert_eq!(app.shader().renderer().width(), 160);
    }
}
