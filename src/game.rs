//! Demo scenes run by the host binary.
//!
//! - [`TitleScene`] – title text; Enter starts, Escape quits.
//! - [`PlayScene`] – an animated hero collecting coins in a small bevy world.
//!
//! Both are registered in [`scene_store`] under [`TITLE_SCENE`] and
//! [`PLAY_SCENE`].

use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::*;

use crate::components::animatedsprite::AnimatedSprite;
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::platform::Canvas;
use crate::resources::animationstore::{Animation, AnimationStore, TextureRegion};
use crate::resources::worldtime::WorldTime;
use crate::scene::{Scene, SceneContext, SceneError, SceneStore};
use crate::systems::animation::animation;
use crate::systems::render::draw_sprites;

pub const TITLE_SCENE: &str = "title";
pub const PLAY_SCENE: &str = "play";

/// Texture the demo animations are cut from.
const HERO_TEXTURE: &str = "hero";
const HERO_FRAME: Vector2 = Vector2 { x: 16.0, y: 16.0 };
const HERO_SPEED: f32 = 90.0;
const COIN_COUNT: usize = 5;
const PICKUP_DISTANCE: f32 = 12.0;

/// All demo scenes.
pub fn scene_store() -> SceneStore {
    SceneStore::new()
        .with(TITLE_SCENE, TitleScene::new)
        .with(PLAY_SCENE, PlayScene::new)
}

#[derive(Default)]
pub struct TitleScene {
    welcome: bool,
    blink: f32,
}

impl TitleScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for TitleScene {
    fn initialize(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        if ctx.save_data().first_time_opening {
            self.welcome = true;
            ctx.save_data_mut().first_time_opening = false;
            ctx.save()?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext, delta_time: f32) {
        self.blink = (self.blink + delta_time) % 1.0;
        if ctx.input().confirm.just_pressed {
            if let Err(e) = ctx.request_scene_change(PLAY_SCENE) {
                error!("{}", e);
            }
        } else if ctx.input().back.just_pressed {
            ctx.request_exit();
        }
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        let (width, height) = canvas.size();
        let center_y = height as i32 / 2;
        canvas.draw_text("SCENELOOP", 24, center_y - 40, 40, Color::RAYWHITE);
        if self.welcome {
            canvas.draw_text("Welcome!", 24, center_y + 8, 20, Color::GOLD);
        }
        if self.blink < 0.5 {
            canvas.draw_text("Press ENTER", 24, center_y + 40, 20, Color::LIGHTGRAY);
        }
        canvas.draw_rectangle(
            Rectangle {
                x: 0.0,
                y: height as f32 - 4.0,
                width: width as f32,
                height: 4.0,
            },
            Color::DARKBLUE,
        );
    }
}

/// Marks the player entity.
#[derive(Component)]
struct Hero;

#[derive(Component)]
struct Coin;

pub struct PlayScene {
    world: World,
    schedule: Schedule,
    hero: Option<Entity>,
    score: i32,
    paused: bool,
}

impl PlayScene {
    pub fn new() -> Self {
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        Self {
            world: World::new(),
            schedule,
            hero: None,
            score: 0,
            paused: false,
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    fn load_animations() -> Result<AnimationStore, SceneError> {
        let delay = Duration::from_millis(120);
        let frame = |i: f32| {
            TextureRegion::new(
                HERO_TEXTURE,
                Rectangle {
                    x: i * HERO_FRAME.x,
                    y: 0.0,
                    width: HERO_FRAME.x,
                    height: HERO_FRAME.y,
                },
            )
        };

        let mut store = AnimationStore::new();
        store.insert(Animation::from_strip(
            "idle",
            HERO_TEXTURE,
            Vector2 { x: 0.0, y: 0.0 },
            HERO_FRAME,
            2,
            Duration::from_millis(400),
            true,
        )?);
        // Contact frames linger twice as long
        store.insert(Animation::with_weights(
            "walk",
            (0..4).map(|i| frame(i as f32 + 2.0)),
            [1, 2, 1, 2],
            delay,
            true,
        )?);
        store.insert(Animation::from_strip(
            "wave",
            HERO_TEXTURE,
            Vector2 {
                x: 0.0,
                y: HERO_FRAME.y,
            },
            HERO_FRAME,
            4,
            delay,
            false,
        )?);
        store.insert(Animation::from_strip(
            "coin",
            HERO_TEXTURE,
            Vector2 {
                x: 0.0,
                y: HERO_FRAME.y * 2.0,
            },
            HERO_FRAME,
            6,
            Duration::from_millis(80),
            true,
        )?);
        Ok(store)
    }

    fn spawn_coin(&mut self, ctx: &mut SceneContext) {
        let Some(coin) = self.world.resource::<AnimationStore>().get("coin").cloned() else {
            return;
        };
        let mut sprite = AnimatedSprite::with_animation(coin);
        // Desync the spin
        sprite.advance_secs(ctx.random_range(0.0, 0.5));
        let (width, height) = ctx.render_size();
        let x = ctx.random_range(0.0, width as f32 - HERO_FRAME.x);
        let y = ctx.random_range(0.0, height as f32 - HERO_FRAME.y);
        self.world
            .spawn((Coin, sprite, MapPosition::new(x, y), ZIndex(0)));
    }

    fn collect_coins(&mut self) -> usize {
        let Some(hero) = self.hero else {
            return 0;
        };
        let Some(hero_pos) = self.world.get::<MapPosition>(hero).copied() else {
            return 0;
        };
        let mut q = self
            .world
            .query_filtered::<(Entity, &MapPosition), With<Coin>>();
        let picked: Vec<Entity> = q
            .iter(&self.world)
            .filter(|(_, pos)| {
                let dx = pos.x - hero_pos.x;
                let dy = pos.y - hero_pos.y;
                (dx * dx + dy * dy).sqrt() < PICKUP_DISTANCE
            })
            .map(|(entity, _)| entity)
            .collect();
        for entity in &picked {
            self.world.despawn(*entity);
        }
        picked.len()
    }

    fn update_hero(&mut self, ctx: &SceneContext, delta_time: f32) {
        let Some(hero) = self.hero else {
            return;
        };
        let direction = ctx.input().direction();
        let waving = ctx.input().action_1.just_pressed;

        self.world
            .resource_scope(|world, store: Mut<AnimationStore>| {
                let Ok(mut entity) = world.get_entity_mut(hero) else {
                    return;
                };
                if let Some(mut pos) = entity.get_mut::<MapPosition>() {
                    pos.translate(
                        direction.x * HERO_SPEED * delta_time,
                        direction.y * HERO_SPEED * delta_time,
                    );
                }
                let Some(mut sprite) = entity.get_mut::<AnimatedSprite>() else {
                    return;
                };
                let mid_wave = sprite.animation().is_some_and(|a| a.name() == "wave")
                    && !sprite.is_finished();
                if waving {
                    store.play(&mut sprite, "wave");
                } else if direction.x != 0.0 || direction.y != 0.0 {
                    store.play(&mut sprite, "walk");
                } else if !mid_wave {
                    store.play(&mut sprite, "idle");
                }
            });
    }
}

impl Default for PlayScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PlayScene {
    fn initialize(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError> {
        let store = Self::load_animations()?;
        let idle = store
            .get("idle")
            .cloned()
            .ok_or_else(|| SceneError::Content("idle animation missing".to_string()))?;
        self.world.insert_resource(store);
        self.world.insert_resource(WorldTime::default());

        let hero = self
            .world
            .spawn((
                Hero,
                AnimatedSprite::with_animation(idle),
                MapPosition::new(32.0, 32.0),
                ZIndex(1),
            ))
            .id();
        self.hero = Some(hero);

        for _ in 0..COIN_COUNT {
            self.spawn_coin(ctx);
        }
        info!("Play scene ready, high score {}", ctx.save_data().high_score);
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext, delta_time: f32) {
        if ctx.input().back.just_pressed {
            if let Err(e) = ctx.request_scene_change(TITLE_SCENE) {
                error!("{}", e);
            }
            return;
        }

        *self.world.resource_mut::<WorldTime>() = *ctx.time();
        self.update_hero(ctx, delta_time);
        self.schedule.run(&mut self.world);

        let picked = self.collect_coins();
        for _ in 0..picked {
            self.score += 1;
            self.spawn_coin(ctx);
        }
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) {
        draw_sprites(&mut self.world, canvas);
        canvas.draw_text(&format!("Score {}", self.score), 8, 8, 20, Color::RAYWHITE);
        if self.paused {
            canvas.draw_text("PAUSED", 8, 32, 20, Color::YELLOW);
        }
    }

    fn on_focus_change(&mut self, focused: bool) {
        self.paused = !focused;
    }

    fn dispose(&mut self, ctx: &mut SceneContext) {
        if self.score > ctx.save_data().high_score {
            ctx.save_data_mut().high_score = self.score;
            info!("New high score {}", self.score);
            if let Err(e) = ctx.save() {
                warn!("Failed to save high score: {}", e);
            }
        }
        self.world.clear_entities();
        self.hero = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::savemanager::SaveManager;

    #[test]
    fn test_coins_spawn_inside_render_surface() {
        let mut ctx = SceneContext::new(scene_store(), SaveManager::in_memory()).with_seed(11);
        ctx.render_size = (100, 50);
        let mut scene = PlayScene::new();
        scene.initialize(&mut ctx).unwrap();

        let mut q = scene
            .world
            .query_filtered::<&MapPosition, With<Coin>>();
        let coins: Vec<MapPosition> = q.iter(&scene.world).copied().collect();
        assert_eq!(coins.len(), COIN_COUNT);
        for coin in coins {
            assert!((0.0..=100.0 - HERO_FRAME.x).contains(&coin.x), "x = {}", coin.x);
            assert!((0.0..=50.0 - HERO_FRAME.y).contains(&coin.y), "y = {}", coin.y);
        }
    }
}
