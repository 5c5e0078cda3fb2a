/// Mannequin Terminal Demo - figure and reference axes
///
/// Controls:
///   - Left/Right (A/D): Camera roll
///   - Up/Down (W/S): Camera distance
///   - 1-4: Projection (top, front, side, perspective)
///   - Q/ESC: Quit
use clap::Parser;
use mannequin_core::{ControlEvent, ProjectionPreset, SceneConfig};
use mannequin_terminal::TerminalApp;
use std::io;

#[derive(Parser, Debug)]
#[command(name = "mannequin-terminal", about = "Render the mannequin scene in the terminal")]
struct Args {
    /// Initial projection: orthotop, orthofront, orthoside or perspective
    #[arg(long, default_value = "perspective")]
    preset: ProjectionPreset,

    /// Initial camera roll in degrees, clamped to -180..180
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    roll: f32,

    /// Initial camera distance offset, clamped to -10..10
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    distance: f32,

    /// Target frame rate
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Length of the reference axes
    #[arg(long, default_value_t = 5.0)]
    axes_length: f32,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SceneConfig {
        axes_length: args.axes_length,
        ..SceneConfig::default()
    };

    let mut app = TerminalApp::new(config, args.fps)?;
    app.apply(ControlEvent::ProjectionChanged(args.preset))?;
    app.apply(ControlEvent::RollChanged(args.roll))?;
    app.apply(ControlEvent::DistanceChanged(args.distance))?;

    log::info!("starting terminal renderer with {} projection", args.preset);
    app.run()?;

    println!("Thank you for using the Mannequin terminal renderer!");
    Ok(())
}
