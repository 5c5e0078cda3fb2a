/// Canvas sizing that keeps a 4:3 aspect ratio inside the browser window

/// Margin kept around the canvas, in CSS pixels
pub const MARGIN: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Fit a 4:3 canvas as wide as the window, shrinking when it would overflow vertically
pub fn fit_canvas(window_width: f64, window_height: f64, canvas_offset_top: f64) -> CanvasSize {
    let mut width = window_width - MARGIN;
    let mut height = 0.75 * width;
    if canvas_offset_top + height + MARGIN > window_height {
        height = window_height - canvas_offset_top - MARGIN;
        width = height * 4.0 / 3.0;
    }

    CanvasSize {
        width: width.max(0.0) as u32,
        height: height.max(0.0) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_enough_window_uses_full_width() {
        let size = fit_canvas(816.0, 1000.0, 50.0);
        assert_eq!(size, CanvasSize { width: 800, height: 600 });
    }

    #[test]
    fn test_short_window_limits_height() {
        let size = fit_canvas(1616.0, 666.0, 50.0);
        assert_eq!(size, CanvasSize { width: 800, height: 600 });
    }

    #[test]
    fn test_tiny_window_clamps_to_zero() {
        let size = fit_canvas(10.0, 10.0, 40.0);
        assert_eq!(size, CanvasSize { width: 0, height: 0 });
    }
}
