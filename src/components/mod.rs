//! ECS components for entities in a scene's world.
//!
//! - [`animatedsprite`] – frame-accurate playback of a shared animation
//! - [`mapposition`] – where an entity is drawn on the intermediate surface
//! - [`zindex`] – draw order

pub mod animatedsprite;
pub mod mapposition;
pub mod zindex;
