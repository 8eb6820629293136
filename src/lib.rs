//! sceneloop library.
//!
//! The application core and scene lifecycle, sprite animation, persistence
//! and the raylib platform, exposed for the host binary and integration
//! tests.

pub mod app;
pub mod components;
pub mod game;
pub mod platform;
pub mod resources;
pub mod scene;
pub mod systems;
