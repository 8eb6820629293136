//! Long-lived data shared by the application core, the platform and scenes.
//!
//! Overview
//! - `animationstore` – animation definitions shared across sprites
//! - `gameconfig` – INI configuration for window, render size and paths
//! - `input` – per-frame keyboard state of the keys the game cares about
//! - `rendertarget` – intermediate surface scenes draw into
//! - `savemanager` – persisted player settings and progress
//! - `texturestore` – loaded textures keyed by name
//! - `windowsize` – output size and letterbox placement
//! - `worldtime` – frame clock and delta
pub mod animationstore;
pub mod gameconfig;
pub mod input;
pub mod rendertarget;
pub mod savemanager;
pub mod texturestore;
pub mod windowsize;
pub mod worldtime;
