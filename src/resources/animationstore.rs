//! Animation definitions and their registry.
//!
//! An [`Animation`] is immutable playback data: an ordered list of texture
//! regions, a weight per frame that scales the base delay, and a loop flag.
//! Sprites share definitions through [`Arc`], so the store hands out cheap
//! clones and never copies frame data.
//!
//! Playback state (current frame, elapsed time, finished) lives in
//! [`AnimatedSprite`](crate::components::animatedsprite::AnimatedSprite).

use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Rectangle, Vector2};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::components::animatedsprite::AnimatedSprite;

/// Delay applied when an animation is built without an explicit one.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// A rectangular area of a texture shown as one animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRegion {
    /// Texture key in [`crate::resources::texturestore::TextureStore`].
    pub tex_key: Arc<str>,
    /// Source rectangle inside the texture, in pixels.
    pub rect: Rectangle,
}

impl TextureRegion {
    pub fn new(tex_key: impl Into<Arc<str>>, rect: Rectangle) -> Self {
        Self {
            tex_key: tex_key.into(),
            rect,
        }
    }

    pub fn width(&self) -> f32 {
        self.rect.width
    }

    pub fn height(&self) -> f32 {
        self.rect.height
    }
}

/// Reasons an animation definition is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error("animation '{0}' has no frames")]
    NoFrames(String),
    #[error("animation '{name}' has {frames} frames but {weights} weights")]
    WeightCountMismatch {
        name: String,
        frames: usize,
        weights: usize,
    },
    #[error("animation '{name}' frame {index} has a zero weight")]
    ZeroWeight { name: String, index: usize },
    #[error("animation '{0}' has a zero base delay")]
    ZeroDelay(String),
}

/// Immutable sprite animation data.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    name: String,
    frames: SmallVec<[TextureRegion; 8]>,
    frame_weights: SmallVec<[u32; 8]>,
    base_delay: Duration,
    looped: bool,
}

impl Animation {
    /// Build an animation where every frame is held for `base_delay`.
    pub fn new(
        name: impl Into<String>,
        frames: impl IntoIterator<Item = TextureRegion>,
        base_delay: Duration,
        looped: bool,
    ) -> Result<Self, AnimationError> {
        let frames: SmallVec<[TextureRegion; 8]> = frames.into_iter().collect();
        let weights = SmallVec::from_elem(1, frames.len());
        Self::build(name.into(), frames, weights, base_delay, looped)
    }

    /// Build an animation with a hold weight per frame.
    ///
    /// Frame `i` is shown for `base_delay * weights[i]`.
    pub fn with_weights(
        name: impl Into<String>,
        frames: impl IntoIterator<Item = TextureRegion>,
        weights: impl IntoIterator<Item = u32>,
        base_delay: Duration,
        looped: bool,
    ) -> Result<Self, AnimationError> {
        Self::build(
            name.into(),
            frames.into_iter().collect(),
            weights.into_iter().collect(),
            base_delay,
            looped,
        )
    }

    /// Build an animation from a horizontal strip of equally sized frames.
    ///
    /// The first frame starts at `origin` and each following frame is
    /// displaced by `frame_size.x` along the strip.
    pub fn from_strip(
        name: impl Into<String>,
        tex_key: impl Into<Arc<str>>,
        origin: Vector2,
        frame_size: Vector2,
        frame_count: usize,
        base_delay: Duration,
        looped: bool,
    ) -> Result<Self, AnimationError> {
        let tex_key: Arc<str> = tex_key.into();
        let frames = (0..frame_count).map(|i| {
            TextureRegion::new(
                tex_key.clone(),
                Rectangle {
                    x: origin.x + i as f32 * frame_size.x,
                    y: origin.y,
                    width: frame_size.x,
                    height: frame_size.y,
                },
            )
        });
        Self::new(name, frames, base_delay, looped)
    }

    fn build(
        name: String,
        frames: SmallVec<[TextureRegion; 8]>,
        frame_weights: SmallVec<[u32; 8]>,
        base_delay: Duration,
        looped: bool,
    ) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames(name));
        }
        if frames.len() != frame_weights.len() {
            return Err(AnimationError::WeightCountMismatch {
                name,
                frames: frames.len(),
                weights: frame_weights.len(),
            });
        }
        if let Some(index) = frame_weights.iter().position(|w| *w == 0) {
            return Err(AnimationError::ZeroWeight { name, index });
        }
        if base_delay.is_zero() {
            return Err(AnimationError::ZeroDelay(name));
        }
        Ok(Self {
            name,
            frames,
            frame_weights,
            base_delay,
            looped,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[TextureRegion] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&TextureRegion> {
        self.frames.get(index)
    }

    pub fn frame_weights(&self) -> &[u32] {
        &self.frame_weights
    }

    /// Number of frames; never zero.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Hold time of frame `index`: the base delay scaled by its weight.
    pub fn frame_deadline(&self, index: usize) -> Duration {
        let weight = self.frame_weights.get(index).copied().unwrap_or(1);
        self.base_delay.saturating_mul(weight)
    }

    /// Total time to play every frame once.
    pub fn total_duration(&self) -> Duration {
        (0..self.len())
            .map(|i| self.frame_deadline(i))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Central registry of reusable animations keyed by name.
#[derive(Resource, Default)]
pub struct AnimationStore {
    animations: FxHashMap<String, Arc<Animation>>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation under its own name, replacing any previous one.
    pub fn insert(&mut self, animation: Animation) -> Arc<Animation> {
        let animation = Arc::new(animation);
        self.animations
            .insert(animation.name().to_string(), animation.clone());
        animation
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&Arc<Animation>> {
        self.animations.get(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Bind the named animation to `sprite`.
    ///
    /// Returns `true` when the sprite was rebound. A sprite already playing
    /// this exact animation keeps its progress and `false` is returned, as
    /// does an unknown name.
    pub fn play(&self, sprite: &mut AnimatedSprite, name: impl AsRef<str>) -> bool {
        let Some(animation) = self.get(name.as_ref()) else {
            log::warn!("Animation '{}' not found in AnimationStore", name.as_ref());
            return false;
        };
        if sprite
            .animation()
            .is_some_and(|current| Arc::ptr_eq(current, animation))
        {
            return false;
        }
        sprite.rebind(animation.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: f32) -> TextureRegion {
        TextureRegion::new(
            "sheet",
            Rectangle {
                x,
                y: 0.0,
                width: 16.0,
                height: 16.0,
            },
        )
    }

    #[test]
    fn test_new_uses_unit_weights() {
        let anim = Animation::new("run", [region(0.0), region(16.0)], DEFAULT_FRAME_DELAY, true)
            .unwrap();
        assert_eq!(anim.frame_weights(), &[1, 1]);
        assert_eq!(anim.frame_deadline(1), Duration::from_millis(100));
        assert_eq!(anim.len(), 2);
    }

    #[test]
    fn test_rejects_empty_frames() {
        let err = Animation::new("empty", Vec::new(), DEFAULT_FRAME_DELAY, true).unwrap_err();
        assert_eq!(err, AnimationError::NoFrames("empty".to_string()));
    }

    #[test]
    fn test_rejects_weight_count_mismatch() {
        let err = Animation::with_weights(
            "bad",
            [region(0.0), region(16.0)],
            [1],
            DEFAULT_FRAME_DELAY,
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AnimationError::WeightCountMismatch {
                frames: 2,
                weights: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_weight() {
        let err = Animation::with_weights(
            "bad",
            [region(0.0), region(16.0)],
            [1, 0],
            DEFAULT_FRAME_DELAY,
            false,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnimationError::ZeroWeight {
                name: "bad".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_rejects_zero_delay() {
        let err = Animation::new("bad", [region(0.0)], Duration::ZERO, true).unwrap_err();
        assert_eq!(err, AnimationError::ZeroDelay("bad".to_string()));
    }

    #[test]
    fn test_weighted_deadlines_and_total() {
        let anim = Animation::with_weights(
            "blink",
            [region(0.0), region(16.0), region(32.0)],
            [1, 2, 1],
            Duration::from_millis(100),
            true,
        )
        .unwrap();
        assert_eq!(anim.frame_deadline(0), Duration::from_millis(100));
        assert_eq!(anim.frame_deadline(1), Duration::from_millis(200));
        assert_eq!(anim.total_duration(), Duration::from_millis(400));
    }

    #[test]
    fn test_from_strip_lays_frames_along_x() {
        let anim = Animation::from_strip(
            "walk",
            "hero",
            Vector2 { x: 0.0, y: 32.0 },
            Vector2 { x: 24.0, y: 32.0 },
            4,
            DEFAULT_FRAME_DELAY,
            true,
        )
        .unwrap();
        assert_eq!(anim.len(), 4);
        let last = anim.frame(3).unwrap();
        assert_eq!(last.rect.x, 72.0);
        assert_eq!(last.rect.y, 32.0);
        assert_eq!(&*last.tex_key, "hero");
    }

    #[test]
    fn test_store_play_rebinds_only_on_change() {
        let mut store = AnimationStore::new();
        store.insert(Animation::new("idle", [region(0.0)], DEFAULT_FRAME_DELAY, true).unwrap());
        store.insert(
            Animation::new("walk", [region(0.0), region(16.0)], DEFAULT_FRAME_DELAY, true)
                .unwrap(),
        );

        let mut sprite = AnimatedSprite::new();
        assert!(store.play(&mut sprite, "walk"));
        sprite.advance(Duration::from_millis(150));
        assert_eq!(sprite.current_frame(), 1);

        // Same animation again keeps progress
        assert!(!store.play(&mut sprite, "walk"));
        assert_eq!(sprite.current_frame(), 1);

        assert!(store.play(&mut sprite, "idle"));
        assert_eq!(sprite.current_frame(), 0);
        assert!(!store.play(&mut sprite, "missing"));
    }
}
