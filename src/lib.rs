pub mod app;
pub mod avatar;
pub mod camera;
pub mod components;
pub mod config;
pub mod difficulty;
pub mod game;
pub mod leaderboard;
pub mod reporter;
pub mod round;
pub mod stack;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;

/// Turns per-frame timestamps into a time scale relative to the reference frame interval
#[derive(Resource, Debug, Clone)]
pub struct FrameClock {
    target_frame_interval_ms: f64,
    previous_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(target_frame_interval_ms: f64) -> Self {
        Self {
            target_frame_interval_ms,
            previous_ms: None,
        }
    }

    /// Whether a previous timestamp exists, i.e. `tick` will measure real elapsed time
    pub fn is_primed(&self) -> bool {
        self.previous_ms.is_some()
    }

    /// Record `now_ms` and return the time scale since the previous call (1.0 on the first call)
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let scale = match self.previous_ms {
            Some(previous) => (now_ms - previous) / self.target_frame_interval_ms,
            None => 1.0,
        };
        self.previous_ms = Some(now_ms);
        scale as f32
    }

    /// Forget the previous timestamp; the next tick primes again
    pub fn reset(&mut self) {
        self.previous_ms = None;
    }
}
