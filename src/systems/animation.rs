//! Animation system.
//!
//! [`animation`] feeds the tick's delta into every
//! [`AnimatedSprite`](crate::components::animatedsprite::AnimatedSprite).
//! Frame selection itself lives on the component so scenes that do not run
//! a schedule can call [`AnimatedSprite::advance`] directly.

use bevy_ecs::prelude::*;

use crate::components::animatedsprite::AnimatedSprite;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback.
///
/// Contract
/// - Reads [`WorldTime`] for the tick's delta.
/// - Stopped and finished sprites still accumulate elapsed time but keep
///   their frame.
pub fn animation(mut query: Query<&mut AnimatedSprite>, time: Res<WorldTime>) {
    let delta = time.delta_duration();
    for mut sprite in query.iter_mut() {
        sprite.advance(delta);
    }
}
