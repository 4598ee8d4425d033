use serde::{Deserialize, Serialize};

pub const DEFAULT_SCROLL_SPEED: f32 = 3.0;
pub const DEFAULT_WRAP_THRESHOLD: f32 = 2.0;
pub const DEFAULT_RESET_DISTANCE: f32 = 44.0;

/// One piece of recycled track geometry.
///
/// Each instance scrolls toward the player and teleports back by
/// `reset_distance` the same tick it crosses `wrap_threshold`, which fakes an
/// endless track without any coordination between obstacles. Phase offsets
/// come entirely from differing `start_position`s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleScroller {
    start_position: f32,
    position: f32,
    speed: f32,
    wrap_threshold: f32,
    reset_distance: f32,
}

impl ObstacleScroller {
    pub fn new(start_position: f32) -> Self {
        Self {
            start_position,
            position: start_position,
            speed: DEFAULT_SCROLL_SPEED,
            wrap_threshold: DEFAULT_WRAP_THRESHOLD,
            reset_distance: DEFAULT_RESET_DISTANCE,
        }
    }

    pub fn with_track(mut self, speed: f32, wrap_threshold: f32, reset_distance: f32) -> Self {
        self.speed = speed;
        self.wrap_threshold = wrap_threshold;
        self.reset_distance = reset_distance;
        self
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn start_position(&self) -> f32 {
        self.start_position
    }

    /// Advance by `speed * dt`, wrapping instantly once past the threshold.
    /// The caller gates this on the shared game-over flag.
    pub fn tick(&mut self, dt: f32) {
        self.position += self.speed * dt;
        if self.position > self.wrap_threshold {
            self.position -= self.reset_distance;
        }
    }

    /// Reset signal: snap back to where this obstacle was placed, discarding
    /// accumulated motion.
    pub fn reset(&mut self) {
        self.position = self.start_position;
    }
}
