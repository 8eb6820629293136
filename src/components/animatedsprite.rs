//! Frame-accurate sprite animation playback.
//!
//! [`AnimatedSprite`] selects which region of a shared [`Animation`] is
//! visible. Time is fed in with [`AnimatedSprite::advance`]; the displayed
//! frame changes only when the accumulated time crosses the current frame's
//! deadline (`base_delay * weight`), independently of the render rate.

use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::Component;

use crate::resources::animationstore::{Animation, TextureRegion};

/// Playback state for one sprite.
///
/// Contract
/// - `current_frame` is always a valid index into the bound animation.
/// - `finished` is only ever set for non-looping animations.
/// - While stopped, elapsed time keeps accumulating but the frame does not
///   change; resuming continues the same frame's countdown.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatedSprite {
    animation: Option<Arc<Animation>>,
    current_frame: usize,
    elapsed: Duration,
    frame_deadline: Duration,
    stopped: bool,
    finished: bool,
}

impl AnimatedSprite {
    /// A sprite with nothing bound; it shows no region until [`rebind`](Self::rebind).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_animation(animation: Arc<Animation>) -> Self {
        let mut sprite = Self::new();
        sprite.rebind(animation);
        sprite
    }

    /// Replace the bound animation and restart from its first frame.
    pub fn rebind(&mut self, animation: Arc<Animation>) {
        self.current_frame = 0;
        self.elapsed = Duration::ZERO;
        self.finished = false;
        self.frame_deadline = animation.frame_deadline(0);
        self.animation = Some(animation);
    }

    /// Advance playback by `elapsed` real time.
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.stopped || self.finished {
            return;
        }

        let last = animation.len() - 1;
        // A single tick may span several short frames.
        while self.elapsed >= self.frame_deadline {
            self.elapsed -= self.frame_deadline;
            if animation.looped() {
                self.current_frame = (self.current_frame + 1) % animation.len();
            } else if self.current_frame < last {
                self.current_frame += 1;
            }
            self.frame_deadline = animation.frame_deadline(self.current_frame);

            if !animation.looped() && self.current_frame == last {
                // Non-looping playback holds the last frame.
                self.finished = true;
                break;
            }
        }
    }

    /// Advance by a frame time in seconds.
    ///
    /// Zero, negative and non-finite values have no effect.
    pub fn advance_secs(&mut self, seconds: f32) {
        if !seconds.is_finite() || seconds <= 0.0 {
            return;
        }
        if let Ok(elapsed) = Duration::try_from_secs_f32(seconds) {
            self.advance(elapsed);
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn resume(&mut self) {
        self.stopped = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True once a non-looping animation has reached its last frame.
    ///
    /// Set on arrival at the last frame, not after that frame's hold, so an
    /// n-frame animation is finished after n-1 deadlines.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Time accumulated since the current frame began.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_deadline(&self) -> Duration {
        self.frame_deadline
    }

    pub fn animation(&self) -> Option<&Arc<Animation>> {
        self.animation.as_ref()
    }

    /// The region currently on display.
    pub fn region(&self) -> Option<&TextureRegion> {
        self.animation
            .as_ref()
            .and_then(|animation| animation.frame(self.current_frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Rectangle;

    const D: Duration = Duration::from_millis(100);

    fn frames(n: usize) -> Vec<TextureRegion> {
        (0..n)
            .map(|i| {
                TextureRegion::new(
                    "sheet",
                    Rectangle {
                        x: i as f32 * 8.0,
                        y: 0.0,
                        width: 8.0,
                        height: 8.0,
                    },
                )
            })
            .collect()
    }

    fn uniform(n: usize, looped: bool) -> Arc<Animation> {
        Arc::new(Animation::new("anim", frames(n), D, looped).unwrap())
    }

    #[test]
    fn test_empty_sprite_ignores_time() {
        let mut sprite = AnimatedSprite::new();
        sprite.advance(Duration::from_secs(5));
        assert_eq!(sprite.current_frame(), 0);
        assert!(sprite.region().is_none());
        assert_eq!(sprite.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_looping_index_follows_elapsed_multiples() {
        for k in 0..12u32 {
            let mut sprite = AnimatedSprite::with_animation(uniform(4, true));
            sprite.advance(D * k);
            assert_eq!(sprite.current_frame(), k as usize % 4, "k = {}", k);
            assert!(!sprite.is_finished());
        }
    }

    #[test]
    fn test_looping_index_with_many_small_steps() {
        let mut sprite = AnimatedSprite::with_animation(uniform(3, true));
        for _ in 0..7 {
            sprite.advance(D);
        }
        assert_eq!(sprite.current_frame(), 1);
    }

    #[test]
    fn test_weighted_example_carries_remainder() {
        let anim = Arc::new(
            Animation::with_weights("blink", frames(3), [1, 2, 1], D, true).unwrap(),
        );
        let mut sprite = AnimatedSprite::with_animation(anim);

        sprite.advance(Duration::from_millis(150));
        assert_eq!(sprite.current_frame(), 1);
        assert_eq!(sprite.elapsed(), Duration::from_millis(50));
        assert_eq!(sprite.frame_deadline(), Duration::from_millis(200));

        sprite.advance(Duration::from_millis(150));
        assert_eq!(sprite.current_frame(), 2);
        assert_eq!(sprite.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_non_looping_finishes_on_last_frame() {
        let mut sprite = AnimatedSprite::with_animation(uniform(4, false));
        sprite.advance(D * 3);
        assert!(sprite.is_finished());
        assert_eq!(sprite.current_frame(), 3);

        sprite.advance(D * 10);
        assert!(sprite.is_finished());
        assert_eq!(sprite.current_frame(), 3);
    }

    #[test]
    fn test_non_looping_not_finished_before_last_frame() {
        let mut sprite = AnimatedSprite::with_animation(uniform(4, false));
        sprite.advance(D * 2 + Duration::from_millis(99));
        assert!(!sprite.is_finished());
        assert_eq!(sprite.current_frame(), 2);
    }

    #[test]
    fn test_single_frame_never_moves() {
        let mut looped = AnimatedSprite::with_animation(uniform(1, true));
        looped.advance(D * 9 + Duration::from_millis(30));
        assert_eq!(looped.current_frame(), 0);
        assert!(!looped.is_finished());
        assert_eq!(looped.elapsed(), Duration::from_millis(30));

        let mut once = AnimatedSprite::with_animation(uniform(1, false));
        once.advance(D);
        assert_eq!(once.current_frame(), 0);
        assert!(once.is_finished());
    }

    #[test]
    fn test_stopped_keeps_frame_but_accumulates() {
        let mut sprite = AnimatedSprite::with_animation(uniform(4, true));
        sprite.advance(Duration::from_millis(40));
        sprite.stop();
        sprite.advance(Duration::from_secs(3));
        assert_eq!(sprite.current_frame(), 0);
        assert!(sprite.is_stopped());

        // Resuming continues the countdown with what was accumulated.
        sprite.resume();
        sprite.advance(Duration::ZERO);
        assert_eq!(sprite.current_frame(), (3040 / 100) % 4);
    }

    #[test]
    fn test_rebind_resets_finished_and_frame() {
        let mut sprite = AnimatedSprite::with_animation(uniform(2, false));
        sprite.advance(D * 5);
        assert!(sprite.is_finished());

        sprite.rebind(uniform(3, true));
        assert_eq!(sprite.current_frame(), 0);
        assert!(!sprite.is_finished());
        assert_eq!(sprite.elapsed(), Duration::ZERO);
        assert_eq!(sprite.frame_deadline(), D);
    }

    #[test]
    fn test_rebind_mid_playback_restarts() {
        let anim = uniform(5, true);
        let mut sprite = AnimatedSprite::with_animation(anim.clone());
        sprite.advance(D * 3 + Duration::from_millis(20));
        assert_eq!(sprite.current_frame(), 3);
        sprite.rebind(anim);
        assert_eq!(sprite.current_frame(), 0);
        assert_eq!(sprite.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_advance_secs_ignores_bad_input() {
        let mut sprite = AnimatedSprite::with_animation(uniform(3, true));
        sprite.advance_secs(-1.0);
        sprite.advance_secs(f32::NAN);
        sprite.advance_secs(0.0);
        assert_eq!(sprite.elapsed(), Duration::ZERO);
        sprite.advance_secs(0.25);
        assert_eq!(sprite.current_frame(), 2);
    }

    #[test]
    fn test_elapsed_saturates_instead_of_overflowing() {
        let mut sprite = AnimatedSprite::with_animation(uniform(1, false));
        sprite.stop();
        sprite.advance(Duration::MAX);
        sprite.advance(Duration::from_secs(1));
        assert_eq!(sprite.elapsed(), Duration::MAX);
        assert_eq!(sprite.current_frame(), 0);
    }

    #[test]
    fn test_region_tracks_current_frame() {
        let mut sprite = AnimatedSprite::with_animation(uniform(3, true));
        sprite.advance(D);
        assert_eq!(sprite.region().unwrap().rect.x, 8.0);
    }
}
