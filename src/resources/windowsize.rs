//! Window size and letterbox placement.
//!
//! Tracks the actual output dimensions in pixels, which usually differ from
//! the internal render resolution, and computes where the intermediate
//! surface lands when it is composited.

use raylib::prelude::*;

/// Output size in pixels, as reported by the platform for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl WindowSize {
    /// Where a `game_width` x `game_height` surface lands on the output.
    ///
    /// The surface is scaled uniformly by the largest factor that still fits
    /// and centered, leaving bars on two opposite sides. Degenerate sizes
    /// map to the whole output.
    pub fn calculate_letterbox(&self, game_width: u32, game_height: u32) -> Rectangle {
        let (out_w, out_h) = (self.w.max(0) as f32, self.h.max(0) as f32);
        let (src_w, src_h) = (game_width as f32, game_height as f32);
        if src_w == 0.0 || src_h == 0.0 || out_w == 0.0 || out_h == 0.0 {
            return Rectangle::new(0.0, 0.0, out_w, out_h);
        }

        let scale = (out_w / src_w).min(out_h / src_h);
        let (width, height) = (src_w * scale, src_h * scale);
        Rectangle::new((out_w - width) / 2.0, (out_h - height) / 2.0, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_same_aspect_fills_window() {
        let r = WindowSize { w: 1280, h: 720 }.calculate_letterbox(640, 360);
        assert!(approx_eq(r.x, 0.0));
        assert!(approx_eq(r.y, 0.0));
        assert!(approx_eq(r.width, 1280.0));
        assert!(approx_eq(r.height, 720.0));
    }

    #[test]
    fn test_wider_window_pillarboxes() {
        let r = WindowSize { w: 1000, h: 360 }.calculate_letterbox(640, 360);
        assert!(approx_eq(r.width, 640.0));
        assert!(approx_eq(r.x, 180.0));
        assert!(approx_eq(r.height, 360.0));
    }

    #[test]
    fn test_taller_window_letterboxes() {
        let r = WindowSize { w: 640, h: 640 }.calculate_letterbox(640, 360);
        assert!(approx_eq(r.width, 640.0));
        assert!(approx_eq(r.height, 360.0));
        assert!(approx_eq(r.y, 140.0));
    }

    #[test]
    fn test_degenerate_sizes_do_not_divide_by_zero() {
        let r = WindowSize { w: 0, h: 0 }.calculate_letterbox(640, 360);
        assert!(approx_eq(r.width, 0.0));
        let r = WindowSize { w: 800, h: 600 }.calculate_letterbox(0, 360);
        assert!(approx_eq(r.width, 800.0));
    }
}
