//! Player settings and save data persistence.
//!
//! Two independent JSON documents are kept side by side:
//!
//! - `GameSettings.json` – [`FileSettings`]: window resolution, pause on
//!   unfocus, fullscreen.
//! - `SaveFile.json` – [`SaveData`]: progress such as the high score.
//!
//! [`SaveStore`] is the load/store seam; [`JsonSaveStore`] writes real files
//! and [`MemorySaveStore`] keeps everything in memory. [`SaveManager`] owns
//! the loaded documents and remembers whether the store had to create them.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SAVE_FILE_NAME: &str = "SaveFile.json";
pub const SETTINGS_FILE_NAME: &str = "GameSettings.json";

/// Settings that outlive a single save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileSettings {
    /// Width the window is shown at. Zero until seeded from the display.
    pub window_resolution_width: i32,
    /// Height the window is shown at. Zero until seeded from the display.
    pub window_resolution_height: i32,
    /// Pause the active scene while the window is not focused.
    #[serde(rename = "pauseOnUF")]
    pub pause_on_uf: bool,
    /// Start in fullscreen.
    pub is_fullscreen: bool,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            window_resolution_width: 0,
            window_resolution_height: 0,
            pause_on_uf: true,
            is_fullscreen: true,
        }
    }
}

impl FileSettings {
    /// The stored resolution, if it has been seeded.
    pub fn window_resolution(&self) -> Option<(i32, i32)> {
        (self.window_resolution_width > 0 && self.window_resolution_height > 0)
            .then_some((self.window_resolution_width, self.window_resolution_height))
    }
}

/// "New game" progress values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub high_score: i32,
    pub first_time_opening: bool,
    pub offering_for_first_time: bool,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            high_score: 0,
            first_time_opening: true,
            offering_for_first_time: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize save data: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result of [`SaveStore::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSaves {
    pub settings: FileSettings,
    pub save_data: SaveData,
    /// The store had nothing and wrote defaults.
    pub freshly_created: bool,
}

/// Load/store service for settings and save data.
pub trait SaveStore {
    /// Read both documents, creating defaults when nothing is stored yet.
    fn load(&mut self) -> Result<LoadedSaves, SaveError>;
    /// Persist both documents.
    fn save(&mut self, settings: &FileSettings, save_data: &SaveData) -> Result<(), SaveError>;
    /// Forget stored progress so the next load starts fresh.
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// Files under one directory, pretty printed JSON.
#[derive(Debug, Clone)]
pub struct JsonSaveStore {
    dir: PathBuf,
}

impl JsonSaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn save_path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE_NAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    fn read<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, SaveError> {
        let text = fs::read_to_string(path).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SaveError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write<T: Serialize>(path: &Path, value: &T) -> Result<(), SaveError> {
        let text = serde_json::to_string_pretty(value).map_err(SaveError::Serialize)?;
        fs::write(path, text).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SaveStore for JsonSaveStore {
    fn load(&mut self) -> Result<LoadedSaves, SaveError> {
        let save_path = self.save_path();
        if save_path.exists() {
            let save_data = Self::read(&save_path)?;
            let settings_path = self.settings_path();
            let settings = if settings_path.exists() {
                Self::read(&settings_path)?
            } else {
                warn!(
                    "{} missing, using default settings",
                    settings_path.display()
                );
                FileSettings::default()
            };
            info!("Loaded save data from {}", self.dir.display());
            return Ok(LoadedSaves {
                settings,
                save_data,
                freshly_created: false,
            });
        }

        fs::create_dir_all(&self.dir).map_err(|source| SaveError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let loaded = LoadedSaves {
            freshly_created: true,
            ..LoadedSaves::default()
        };
        self.save(&loaded.settings, &loaded.save_data)?;
        info!("Created fresh save files in {}", self.dir.display());
        Ok(loaded)
    }

    fn save(&mut self, settings: &FileSettings, save_data: &SaveData) -> Result<(), SaveError> {
        Self::write(&self.save_path(), save_data)?;
        Self::write(&self.settings_path(), settings)
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        let path = self.save_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SaveError::Io { path, source }),
        }
    }
}

/// Keeps documents in memory. Useful for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    settings: Option<FileSettings>,
    save_data: Option<SaveData>,
    /// Number of successful `save` calls.
    pub save_count: usize,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds the given documents.
    pub fn with_contents(settings: FileSettings, save_data: SaveData) -> Self {
        Self {
            settings: Some(settings),
            save_data: Some(save_data),
            save_count: 0,
        }
    }
}

impl SaveStore for MemorySaveStore {
    fn load(&mut self) -> Result<LoadedSaves, SaveError> {
        if let Some(save_data) = self.save_data.clone() {
            return Ok(LoadedSaves {
                settings: self.settings.clone().unwrap_or_default(),
                save_data,
                freshly_created: false,
            });
        }
        let loaded = LoadedSaves {
            freshly_created: true,
            ..LoadedSaves::default()
        };
        self.save(&loaded.settings, &loaded.save_data)?;
        Ok(loaded)
    }

    fn save(&mut self, settings: &FileSettings, save_data: &SaveData) -> Result<(), SaveError> {
        self.settings = Some(settings.clone());
        self.save_data = Some(save_data.clone());
        self.save_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.save_data = None;
        Ok(())
    }
}

/// Loaded settings and save data plus the store they came from.
pub struct SaveManager {
    store: Box<dyn SaveStore>,
    settings: FileSettings,
    save_data: SaveData,
    freshly_created: bool,
}

impl SaveManager {
    /// Load from `store`, creating default documents if it is empty.
    pub fn load(store: impl SaveStore + 'static) -> Result<Self, SaveError> {
        let mut store: Box<dyn SaveStore> = Box::new(store);
        let loaded = store.load()?;
        Ok(Self {
            store,
            settings: loaded.settings,
            save_data: loaded.save_data,
            freshly_created: loaded.freshly_created,
        })
    }

    /// In-memory manager with default documents.
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemorySaveStore::new()),
            settings: FileSettings::default(),
            save_data: SaveData::default(),
            freshly_created: true,
        }
    }

    pub fn settings(&self) -> &FileSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut FileSettings {
        &mut self.settings
    }

    pub fn save_data(&self) -> &SaveData {
        &self.save_data
    }

    pub fn save_data_mut(&mut self) -> &mut SaveData {
        &mut self.save_data
    }

    /// Whether the store created the documents during the last load.
    pub fn was_freshly_created(&self) -> bool {
        self.freshly_created
    }

    /// Persist current settings and save data.
    pub fn save(&mut self) -> Result<(), SaveError> {
        self.store.save(&self.settings, &self.save_data)
    }

    /// Reset progress to "new game" values and persist.
    pub fn new_game(&mut self) -> Result<(), SaveError> {
        self.save_data = SaveData::default();
        self.save()
    }

    /// Delete stored progress and load again.
    pub fn clear(&mut self) -> Result<(), SaveError> {
        self.store.clear()?;
        let loaded = self.store.load()?;
        self.settings = loaded.settings;
        self.save_data = loaded.save_data;
        self.freshly_created = loaded.freshly_created;
        Ok(())
    }
}

/// Latch an achievement flag.
///
/// Reports whether the achievement was newly unlocked: `true` only on the
/// call that flips the flag, `false` once it is already set.
pub fn achievement_check(flag: &mut bool) -> bool {
    let newly_unlocked = !*flag;
    *flag = true;
    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_json_field_names() {
        let json = serde_json::to_value(FileSettings::default()).unwrap();
        assert_eq!(json["pauseOnUF"], true);
        assert_eq!(json["isFullscreen"], true);
        assert_eq!(json["windowResolutionWidth"], 0);

        let json = serde_json::to_value(SaveData::default()).unwrap();
        assert_eq!(json["highScore"], 0);
        assert_eq!(json["firstTimeOpening"], true);
        assert_eq!(json["offeringForFirstTime"], true);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: FileSettings = serde_json::from_str(r#"{"isFullscreen": false}"#).unwrap();
        assert!(!settings.is_fullscreen);
        assert!(settings.pause_on_uf);
        assert_eq!(settings.window_resolution(), None);
    }

    #[test]
    fn test_json_store_creates_fresh_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("Save Data");
        let mut store = JsonSaveStore::new(&dir);

        let loaded = store.load().unwrap();
        assert!(loaded.freshly_created);
        assert_eq!(loaded.save_data, SaveData::default());
        assert!(store.save_path().exists());
        assert!(store.settings_path().exists());

        let again = store.load().unwrap();
        assert!(!again.freshly_created);
    }

    #[test]
    fn test_json_store_round_trips_through_manager() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SaveManager::load(JsonSaveStore::new(temp_dir.path())).unwrap();
        assert!(manager.was_freshly_created());

        manager.save_data_mut().high_score = 420;
        manager.settings_mut().window_resolution_width = 1920;
        manager.settings_mut().window_resolution_height = 1080;
        manager.save().unwrap();

        let reloaded = SaveManager::load(JsonSaveStore::new(temp_dir.path())).unwrap();
        assert!(!reloaded.was_freshly_created());
        assert_eq!(reloaded.save_data().high_score, 420);
        assert_eq!(reloaded.settings().window_resolution(), Some((1920, 1080)));
    }

    #[test]
    fn test_json_store_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonSaveStore::new(temp_dir.path());
        fs::write(store.save_path(), "not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, SaveError::Parse { .. }));
    }

    #[test]
    fn test_clear_starts_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SaveManager::load(JsonSaveStore::new(temp_dir.path())).unwrap();
        manager.save_data_mut().high_score = 7;
        manager.settings_mut().is_fullscreen = false;
        manager.save().unwrap();

        manager.clear().unwrap();
        assert_eq!(manager.save_data().high_score, 0);
        assert!(manager.was_freshly_created());
    }

    #[test]
    fn test_new_game_resets_and_persists() {
        let mut manager = SaveManager::load(MemorySaveStore::with_contents(
            FileSettings::default(),
            SaveData {
                high_score: 99,
                first_time_opening: false,
                offering_for_first_time: false,
            },
        ))
        .unwrap();
        assert!(!manager.was_freshly_created());
        manager.new_game().unwrap();
        assert_eq!(manager.save_data(), &SaveData::default());
    }

    #[test]
    fn test_achievement_check_latches() {
        let mut unlocked = false;
        assert!(achievement_check(&mut unlocked));
        assert!(unlocked);
        assert!(!achievement_check(&mut unlocked));
    }
}
