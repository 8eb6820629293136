//! Sprite rendering.
//!
//! [`draw_sprites`] draws every entity that has an
//! [`AnimatedSprite`] and a [`MapPosition`] onto a [`Canvas`], lowest
//! [`ZIndex`] first. Entities with equal z keep no particular order.

use bevy_ecs::prelude::*;
use raylib::prelude::Color;

use crate::components::animatedsprite::AnimatedSprite;
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::platform::Canvas;
use crate::resources::animationstore::TextureRegion;

/// Draw the world's sprites. Returns how many were drawn.
pub fn draw_sprites(world: &mut World, canvas: &mut dyn Canvas) -> usize {
    let mut to_draw: Vec<(TextureRegion, MapPosition, ZIndex)> = {
        let mut q = world.query::<(&AnimatedSprite, &MapPosition, Option<&ZIndex>)>();
        q.iter(world)
            .filter_map(|(sprite, pos, z)| {
                sprite
                    .region()
                    .map(|region| (region.clone(), *pos, z.copied().unwrap_or_default()))
            })
            .collect()
    };

    to_draw.sort_by_key(|(_, _, z)| *z);

    for (region, pos, _z) in to_draw.iter() {
        canvas.draw_region(region, pos.to_vec(), Color::WHITE);
    }
    to_draw.len()
}
