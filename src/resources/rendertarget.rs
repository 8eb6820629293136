//! Intermediate surface scenes draw into.
//!
//! Scenes always render at the internal resolution from
//! [`GameConfig`](crate::resources::gameconfig::GameConfig); the platform
//! then scales this surface onto the window during composite.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// How the surface is sampled when scaled onto the output.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum RenderFilter {
    /// Nearest neighbor. Keeps pixel art crisp.
    #[default]
    Nearest,
    Bilinear,
}

impl RenderFilter {
    fn raw(self) -> i32 {
        match self {
            RenderFilter::Nearest => TextureFilter::TEXTURE_FILTER_POINT as i32,
            RenderFilter::Bilinear => TextureFilter::TEXTURE_FILTER_BILINEAR as i32,
        }
    }
}

/// GPU render texture at the internal resolution.
///
/// Only usable on the thread that owns the window.
pub struct RenderTarget {
    pub texture: RenderTexture2D,
    pub game_width: u32,
    pub game_height: u32,
    filter: RenderFilter,
}

impl RenderTarget {
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create {}x{} render texture: {}", width, height, e))?;
        let mut target = Self {
            texture,
            game_width: width,
            game_height: height,
            filter: RenderFilter::default(),
        };
        target.set_filter(RenderFilter::default());
        Ok(target)
    }

    pub fn filter(&self) -> RenderFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: RenderFilter) {
        self.filter = filter;
        unsafe {
            ffi::SetTextureFilter(self.texture.texture, filter.raw());
        }
    }

    /// Whole-surface source rectangle, flipped vertically because render
    /// textures are stored bottom-up.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle::new(
            0.0,
            0.0,
            self.game_width as f32,
            -(self.game_height as f32),
        )
    }
}
