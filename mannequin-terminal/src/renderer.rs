/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A projected vertex: screen x, screen y, depth
pub type ScreenVertex = (f32, f32, f32);

/// Character and color buffers with a depth buffer, one cell per terminal character
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character and color at a cell
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Color)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        Some((self.char_buffer[idx], self.color_buffer[idx]))
    }

    /// Number of cells covered by geometry
    pub fn covered_cells(&self) -> usize {
        self.depth_buffer.iter().filter(|d| d.is_finite()).count()
    }

    /// Rasterize one projected triangle
    ///
    /// `brightness` in `0..=1` selects the ramp character; `rgb` tints it.
    pub fn draw_triangle(&mut self, coords: [ScreenVertex; 3], brightness: f32, rgb: [f32; 3]) {
        let brightness = brightness.clamp(0.0, 1.0);
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        // never pick the blank so lit faces stay visible
        let character = LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)];
        let color = tint(rgb, 0.4 + 0.6 * brightness);

        self.rasterize_triangle(&coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenVertex; 3], character: char, color: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Scale an RGB color in `0..=1` and convert it to a terminal color
fn tint(rgb: [f32; 3], intensity: f32) -> Color {
    let channel = |c: f32| (c * intensity).clamp(0.0, 1.0) * 255.0;
    Color::Rgb {
        r: channel(rgb[0]) as u8,
        g: channel(rgb[1]) as u8,
        b: channel(rgb[2]) as u8,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_covers_cells() {
        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.draw_triangle(
            [(0.0, 0.0, 0.5), (10.0, 0.0, 0.5), (0.0, 10.0, 0.5)],
            1.0,
            [1.0, 0.0, 0.0],
        );
        assert!(renderer.covered_cells() > 30);
        assert_eq!(renderer.cell(0, 0), Some(('@', Color::Rgb { r: 255, g: 0, b: 0 })));
        assert_eq!(renderer.cell(9, 9).map(|(c, _)| c), Some(' '));
    }

    #[test]
    fn test_depth_test_keeps_nearest() {
        let mut renderer = AsciiRenderer::new(4, 4);
        let quad = |z: f32| [(0.0, 0.0, z), (8.0, 0.0, z), (0.0, 8.0, z)];
        renderer.draw_triangle(quad(0.2), 1.0, [0.0, 1.0, 0.0]);
        renderer.draw_triangle(quad(0.8), 1.0, [0.0, 0.0, 1.0]);
        assert_eq!(renderer.cell(0, 0).map(|(_, c)| c), Some(Color::Rgb { r: 0, g: 255, b: 0 }));

        renderer.clear();
        assert_eq!(renderer.covered_cells(), 0);
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.draw_triangle([(1.0, 1.0, 0.0), (2.0, 2.0, 0.0), (3.0, 3.0, 0.0)], 1.0, [1.0; 3]);
        assert_eq!(renderer.covered_cells(), 0);
    }
}
