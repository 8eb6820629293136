//! Raylib implementation of the platform seam.
//!
//! [`RaylibPlatform`] owns the window, the intermediate [`RenderTarget`] and
//! the [`TextureStore`]. Each presented frame opens a raylib drawing scope;
//! the intermediate pass runs inside a texture mode on the render target and
//! the composite draws that texture letterboxed onto the window.

use log::{error, info};
use raylib::ffi;
use raylib::prelude::*;

use crate::platform::{Canvas, Frame, Platform};
use crate::resources::animationstore::TextureRegion;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::rendertarget::{RenderFilter, RenderTarget};
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;
use crate::systems::input::update_input_state;

/// Placeholder color for regions whose texture is not loaded.
const MISSING_TEXTURE_COLOR: Color = Color::MAGENTA;

pub struct RaylibPlatform {
    rl: RaylibHandle,
    thread: RaylibThread,
    target: RenderTarget,
    textures: TextureStore,
    close_requested: bool,
}

impl RaylibPlatform {
    /// Open the window and create the intermediate surface.
    pub fn new(config: &GameConfig) -> Result<Self, String> {
        let (window_width, window_height) = config.window_size();
        let mut builder = raylib::init();
        builder
            .size(window_width as i32, window_height as i32)
            .resizable()
            .title(&config.title);
        if config.vsync {
            builder.vsync();
        }
        let (mut rl, thread) = builder.build();
        rl.set_target_fps(config.target_fps);
        // Scenes decide what Escape does
        rl.set_exit_key(None);

        let (render_width, render_height) = config.render_size();
        let mut target = RenderTarget::new(&mut rl, &thread, render_width, render_height)?;
        if config.smooth_scaling {
            target.set_filter(RenderFilter::Bilinear);
        }

        let mut textures = TextureStore::new();
        textures.load_dir(&mut rl, &thread, &config.textures_dir)?;

        info!(
            "Window {}x{} opened, rendering at {}x{}",
            window_width, window_height, render_width, render_height
        );

        Ok(Self {
            rl,
            thread,
            target,
            textures,
            close_requested: false,
        })
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }
}

impl Platform for RaylibPlatform {
    type Frame<'a> = RaylibFrame<'a>;

    fn poll_input(&mut self, input: &mut InputState) {
        update_input_state(&self.rl, input);
        if input.fullscreen_toggle.just_pressed {
            let fullscreen = !self.rl.is_window_fullscreen();
            self.set_fullscreen(fullscreen);
        }
    }

    fn has_focus(&self) -> bool {
        self.rl.is_window_focused()
    }

    fn output_size(&self) -> (i32, i32) {
        (self.rl.get_screen_width(), self.rl.get_screen_height())
    }

    fn render_size(&self) -> (u32, u32) {
        (self.target.game_width, self.target.game_height)
    }

    fn display_mode(&self) -> (i32, i32) {
        let monitor: i32 = unsafe { ffi::GetCurrentMonitor() };
        let width = unsafe { ffi::GetMonitorWidth(monitor) };
        let height = unsafe { ffi::GetMonitorHeight(monitor) };
        (width, height)
    }

    fn set_output_size(&mut self, width: i32, height: i32) {
        if self.output_size() != (width, height) {
            info!("Resizing window to {}x{}", width, height);
            self.rl.set_window_size(width, height);
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.rl.is_window_fullscreen() == fullscreen {
            return;
        }
        if fullscreen {
            let (width, height) = self.display_mode();
            self.rl.set_window_size(width, height);
        }
        self.rl.toggle_fullscreen();
        if self.rl.is_window_fullscreen() == fullscreen {
            info!("Full screen {}", if fullscreen { "enabled" } else { "disabled" });
        } else {
            error!("Failed to switch full screen to {}", fullscreen);
        }
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }

    fn should_close(&self) -> bool {
        self.close_requested || self.rl.window_should_close()
    }

    fn frame_time(&self) -> f32 {
        self.rl.get_frame_time()
    }

    fn begin_frame(&mut self) -> RaylibFrame<'_> {
        let output = WindowSize {
            w: self.rl.get_screen_width(),
            h: self.rl.get_screen_height(),
        };
        RaylibFrame {
            d: self.rl.begin_drawing(&self.thread),
            thread: &self.thread,
            target: &mut self.target,
            textures: &self.textures,
            output,
        }
    }
}

/// A raylib drawing scope; drawing ends when the frame is dropped.
pub struct RaylibFrame<'a> {
    d: RaylibDrawHandle<'a>,
    thread: &'a RaylibThread,
    target: &'a mut RenderTarget,
    textures: &'a TextureStore,
    output: WindowSize,
}

impl Frame for RaylibFrame<'_> {
    fn draw_intermediate(&mut self, pass: &mut dyn FnMut(&mut dyn Canvas)) {
        let size = (self.target.game_width, self.target.game_height);
        let mut texture_mode = self
            .d
            .begin_texture_mode(self.thread, &mut self.target.texture);
        let mut canvas = RaylibCanvas {
            d: &mut texture_mode,
            textures: self.textures,
            size,
        };
        pass(&mut canvas);
    }

    fn composite(&mut self, clear: Color) {
        self.d.clear_background(clear);
        let dest = self
            .output
            .calculate_letterbox(self.target.game_width, self.target.game_height);
        let source = self.target.source_rect();
        unsafe {
            ffi::DrawTexturePro(
                self.target.texture.texture,
                source.into(),
                dest.into(),
                Vector2 { x: 0.0, y: 0.0 }.into(),
                0.0,
                Color::WHITE.into(),
            );
        }
    }
}

/// [`Canvas`] over any raylib draw scope.
pub struct RaylibCanvas<'a, D: RaylibDraw> {
    d: &'a mut D,
    textures: &'a TextureStore,
    size: (u32, u32),
}

impl<D: RaylibDraw> Canvas for RaylibCanvas<'_, D> {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.d.clear_background(color);
    }

    fn draw_region(&mut self, region: &TextureRegion, position: Vector2, tint: Color) {
        let dest = Rectangle {
            x: position.x,
            y: position.y,
            width: region.width().abs(),
            height: region.height().abs(),
        };
        match self.textures.get(&*region.tex_key) {
            Some(texture) => {
                self.d.draw_texture_pro(
                    texture,
                    region.rect,
                    dest,
                    Vector2 { x: 0.0, y: 0.0 },
                    0.0,
                    tint,
                );
            }
            None => self.d.draw_rectangle_lines_ex(dest, 1.0, MISSING_TEXTURE_COLOR),
        }
    }

    fn draw_rectangle(&mut self, rect: Rectangle, color: Color) {
        self.d.draw_rectangle_rec(rect, color);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color) {
        self.d.draw_text(text, x, y, font_size, color);
    }
}
