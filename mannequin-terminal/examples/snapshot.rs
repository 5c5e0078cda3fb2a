/// Example: Print one frame of the scene for every projection preset
///
/// Usage: cargo run --example snapshot -- [width] [height]
use std::env;
use std::io::{self, stdout, Write};

use mannequin_core::{ControlEvent, ProjectionPreset, SceneConfig};
use mannequin_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let width = args.get(1).and_then(|w| w.parse().ok()).unwrap_or(80);
    let height = args.get(2).and_then(|h| h.parse().ok()).unwrap_or(30);

    let mut app = TerminalApp::with_size(SceneConfig::default(), 1, width, height)?;
    let mut out = stdout();

    for preset in ProjectionPreset::ALL {
        app.apply(ControlEvent::ProjectionChanged(preset))?;
        app.render_offscreen();

        writeln!(out, "== {} ==", preset)?;
        app.shader().renderer().draw(&mut out)?;
        writeln!(out)?;
    }

    out.flush()
}
