//! Systems that scenes run over their ECS world.
//!
//! - [`animation`] – advance every [`AnimatedSprite`](crate::components::animatedsprite::AnimatedSprite) by the tick's delta
//! - [`input`] – read hardware input into [`InputState`](crate::resources::input::InputState)
//! - [`render`] – draw sprites in z order onto a [`Canvas`](crate::platform::Canvas)

pub mod animation;
pub mod input;
pub mod render;
