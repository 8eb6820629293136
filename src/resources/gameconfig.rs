//! Engine configuration.
//!
//! Settings that belong to the build rather than to the player: the fixed
//! internal render resolution, the initial window size, frame pacing and
//! where assets and save files live. Loaded from an INI file; anything
//! missing keeps a safe default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 360
//! smooth = false
//!
//! [window]
//! title = sceneloop
//! width = 1280
//! height = 720
//! vsync = true
//! target_fps = 60
//!
//! [paths]
//! textures = ./assets/textures
//! saves = ./save
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 360;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_SMOOTH_SCALING: bool = false;
const DEFAULT_TITLE: &str = "sceneloop";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_TEXTURES_DIR: &str = "./assets/textures";
const DEFAULT_SAVE_DIR: &str = "./save";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Scale the intermediate surface with bilinear filtering instead of
    /// nearest neighbor.
    pub smooth_scaling: bool,
    /// Window title.
    pub title: String,
    /// Window width before player settings are applied.
    pub window_width: u32,
    /// Window height before player settings are applied.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Directory scanned for `.png` textures at startup.
    pub textures_dir: PathBuf,
    /// Directory holding the settings and save JSON files.
    pub save_dir: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            smooth_scaling: DEFAULT_SMOOTH_SCALING,
            title: DEFAULT_TITLE.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            textures_dir: PathBuf::from(DEFAULT_TEXTURES_DIR),
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Overlay values from the INI file at `config_path`.
    ///
    /// Keys that are absent or malformed keep their current value. Fails
    /// only when the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| format!("Failed to load {}: {}", self.config_path.display(), e))?;

        read_u32(&ini, "render", "width", &mut self.render_width);
        read_u32(&ini, "render", "height", &mut self.render_height);
        read_bool(&ini, "render", "smooth", &mut self.smooth_scaling);

        if let Some(title) = ini.get("window", "title") {
            self.title = title;
        }
        read_u32(&ini, "window", "width", &mut self.window_width);
        read_u32(&ini, "window", "height", &mut self.window_height);
        read_u32(&ini, "window", "target_fps", &mut self.target_fps);
        read_bool(&ini, "window", "vsync", &mut self.vsync);

        if let Some(dir) = ini.get("paths", "textures") {
            self.textures_dir = PathBuf::from(dir);
        }
        if let Some(dir) = ini.get("paths", "saves") {
            self.save_dir = PathBuf::from(dir);
        }

        info!(
            "Config {}: render {}x{}, window {}x{} @{}fps (vsync {}), saves in {}",
            self.config_path.display(),
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.save_dir.display()
        );
        Ok(())
    }

    /// Write every value to `config_path`, creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut ini = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            ini.set(section, key, Some(value));
        };
        set("render", "width", self.render_width.to_string());
        set("render", "height", self.render_height.to_string());
        set("render", "smooth", self.smooth_scaling.to_string());
        set("window", "title", self.title.clone());
        set("window", "width", self.window_width.to_string());
        set("window", "height", self.window_height.to_string());
        set("window", "target_fps", self.target_fps.to_string());
        set("window", "vsync", self.vsync.to_string());
        set("paths", "textures", self.textures_dir.display().to_string());
        set("paths", "saves", self.save_dir.display().to_string());

        ini.write(&self.config_path)
            .map_err(|e| format!("Failed to write {}: {}", self.config_path.display(), e))?;
        info!("Wrote config to {}", self.config_path.display());
        Ok(())
    }

    /// Internal render size.
    pub fn render_size(&self) -> (u32, u32) {
        (self.render_width, self.render_height)
    }

    /// Initial window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn read_u32(ini: &Ini, section: &str, key: &str, target: &mut u32) {
    if let Some(value) = ini.getuint(section, key).ok().flatten() {
        *target = u32::try_from(value).unwrap_or(*target);
    }
}

fn read_bool(ini: &Ini, section: &str, key: &str, target: &mut bool) {
    if let Some(value) = ini.getbool(section, key).ok().flatten() {
        *target = value;
    }
}
