//! Seam between the application core and the windowing/rendering backend.
//!
//! - [`Platform`] – everything the core asks of the host per tick: input,
//!   audio, focus, output size and frame presentation.
//! - [`Frame`] – one presented frame: an intermediate pass at the internal
//!   resolution, then a composite onto the output.
//! - [`Canvas`] – what a scene may draw with during the intermediate pass.
//!
//! [`raylib_backend`] implements these on top of raylib. Tests implement
//! them with recording doubles.

pub mod raylib_backend;

use raylib::prelude::{Color, Rectangle, Vector2};

use crate::resources::animationstore::TextureRegion;
use crate::resources::input::InputState;

/// Host services consumed by [`App`](crate::app::App).
pub trait Platform {
    type Frame<'a>: Frame
    where
        Self: 'a;

    /// Refresh `input` with this frame's hardware state.
    fn poll_input(&mut self, input: &mut InputState);

    /// Pump audio streams. Backends without audio leave this empty.
    fn update_audio(&mut self) {}

    /// Whether the output window currently has focus.
    fn has_focus(&self) -> bool;

    /// Current output size in pixels.
    fn output_size(&self) -> (i32, i32);

    /// Size of the intermediate surface scenes draw into.
    fn render_size(&self) -> (u32, u32);

    /// Resolution of the display the window lives on.
    fn display_mode(&self) -> (i32, i32);

    /// Resize the output window.
    fn set_output_size(&mut self, width: i32, height: i32);

    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Ask the host to stop scheduling ticks.
    fn request_close(&mut self);

    /// Whether the host loop should stop (close requested or window closed).
    fn should_close(&self) -> bool;

    /// Seconds since the previous presented frame.
    fn frame_time(&self) -> f32;

    fn begin_frame(&mut self) -> Self::Frame<'_>;
}

/// One presented frame.
pub trait Frame {
    /// Run `pass` against the intermediate surface.
    fn draw_intermediate(&mut self, pass: &mut dyn FnMut(&mut dyn Canvas));

    /// Clear the output with `clear` and draw the intermediate surface onto
    /// it, scaled to the output size.
    fn composite(&mut self, clear: Color);
}

/// Drawing operations available to scenes.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Color);

    /// Draw `region` with its top-left corner at `position`.
    fn draw_region(&mut self, region: &TextureRegion, position: Vector2, tint: Color);

    fn draw_rectangle(&mut self, rect: Rectangle, color: Color);

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color);
}
