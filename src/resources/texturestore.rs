//! Loaded textures keyed by name.
//!
//! The raylib platform fills this at startup from the configured textures
//! directory; a file `hero.png` is stored under the key `hero`.

use std::path::Path;

use log::{info, warn};
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct TextureStore {
    map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Load every `.png` in `dir`. A missing directory loads nothing.
    pub fn load_dir(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        dir: &Path,
    ) -> Result<usize, String> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Texture directory {} not found", dir.display());
                return Ok(0);
            }
            Err(e) => return Err(format!("Failed to read {}: {}", dir.display(), e)),
        };

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("png") {
                continue;
            }
            let (Some(key), Some(path_str)) = (
                path.file_stem().and_then(|stem| stem.to_str()),
                path.to_str(),
            ) else {
                continue;
            };
            match rl.load_texture(th, path_str) {
                Ok(texture) => {
                    self.insert(key, texture);
                    loaded += 1;
                }
                Err(e) => warn!("Failed to load texture {}: {}", path.display(), e),
            }
        }
        info!("Loaded {} textures from {}", loaded, dir.display());
        Ok(loaded)
    }
}
