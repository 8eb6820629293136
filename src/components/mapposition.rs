use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Top-left corner of an entity's sprite, in intermediate-surface pixels.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn to_vec(self) -> Vector2 {
        Vector2 {
            x: self.x,
            y: self.y,
        }
    }
}
