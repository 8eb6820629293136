//! Frame clock shared by the application core and scenes.
//!
//! The clock accumulates every tick's frame time and derives `delta` by
//! subtracting the total seen at the end of the previous tick from the
//! current total. Totals never decrease, so `delta` is never negative.

use std::time::Duration;

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WorldTime {
    /// Total time accumulated over all ticks.
    pub elapsed: Duration,
    /// Seconds elapsed in the most recent tick.
    pub delta: f32,
    /// Number of ticks processed.
    pub frame_count: u64,
    previous_seconds: f64,
}

impl WorldTime {
    /// Accumulate one tick of `frame_time` seconds and refresh `delta`.
    pub fn advance(&mut self, frame_time: f32) {
        self.elapsed = self.elapsed.saturating_add(frame_duration(frame_time));
        let total = self.elapsed.as_secs_f64();
        self.delta = (total - self.previous_seconds) as f32;
        self.previous_seconds = total;
        self.frame_count += 1;
    }

    /// `delta` as a [`Duration`].
    pub fn delta_duration(&self) -> Duration {
        frame_duration(self.delta)
    }

    /// Total elapsed seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Convert a frame time in seconds into a duration.
///
/// Zero, negative and non-finite inputs map to [`Duration::ZERO`].
pub fn frame_duration(seconds: f32) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO)
}
