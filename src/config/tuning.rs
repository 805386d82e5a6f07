use log::warn;
use serde::{Deserialize, Serialize};

use crate::game;

// Gameplay tuning; a snapshot is handed to the simulation at every round reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub block_height: f32,
    pub initial_width: f32,
    pub base_speed: f32,
    pub speed_increment: f32,
    pub camera_threshold: usize,
    pub palette_size: usize,
    pub target_frame_interval_ms: f64,
    pub avatar: AvatarTuning,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            viewport_width: game::VIEWPORT_WIDTH,
            viewport_height: game::VIEWPORT_HEIGHT,
            block_height: game::BLOCK_HEIGHT,
            initial_width: game::INITIAL_WIDTH,
            base_speed: game::BASE_SPEED,
            speed_increment: game::SPEED_INCREMENT,
            camera_threshold: game::CAMERA_THRESHOLD,
            palette_size: game::PALETTE_SIZE,
            target_frame_interval_ms: game::TARGET_FRAME_INTERVAL_MS,
            avatar: AvatarTuning::default(),
        }
    }
}

impl TuningConfig {
    /// Replace values the simulation cannot run with (zero or negative sizes, a zero frame
    /// interval, NaN) by their defaults, logging each one
    #[must_use]
    pub fn validated(self) -> Self {
        let d = Self::default();
        Self {
            viewport_width: positive("viewport_width", self.viewport_width, d.viewport_width),
            viewport_height: positive("viewport_height", self.viewport_height, d.viewport_height),
            block_height: positive("block_height", self.block_height, d.block_height),
            initial_width: positive("initial_width", self.initial_width, d.initial_width),
            base_speed: positive("base_speed", self.base_speed, d.base_speed),
            speed_increment: non_negative(
                "speed_increment",
                self.speed_increment,
                d.speed_increment,
            ),
            camera_threshold: self.camera_threshold,
            palette_size: checked(
                "palette_size",
                self.palette_size,
                d.palette_size,
                self.palette_size >= 1,
            ),
            target_frame_interval_ms: checked(
                "target_frame_interval_ms",
                self.target_frame_interval_ms,
                d.target_frame_interval_ms,
                self.target_frame_interval_ms.is_finite() && self.target_frame_interval_ms > 0.0,
            ),
            avatar: self.avatar.validated(),
        }
    }
}

// Avatar physics and hazard-avoidance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarTuning {
    pub near_threshold: f32,
    pub alarm_threshold: f32,
    pub jump_impulse: f32,
    pub hop_impulse: f32,
    pub fall_bounce: f32,
    pub gravity: f32,
    pub smoothing: f32,
    pub half_width: f32,
    pub fall_margin: f32,
}

impl Default for AvatarTuning {
    fn default() -> Self {
        Self {
            near_threshold: game::NEAR_THRESHOLD,
            alarm_threshold: game::ALARM_THRESHOLD,
            jump_impulse: game::JUMP_IMPULSE,
            hop_impulse: game::HOP_IMPULSE,
            fall_bounce: game::FALL_BOUNCE,
            gravity: game::GRAVITY,
            smoothing: game::TRACKING_SMOOTHING,
            half_width: game::AVATAR_HALF_WIDTH,
            fall_margin: game::FALL_MARGIN,
        }
    }
}

impl AvatarTuning {
    #[must_use]
    pub fn validated(self) -> Self {
        let d = Self::default();
        Self {
            near_threshold: non_negative("near_threshold", self.near_threshold, d.near_threshold),
            alarm_threshold: non_negative(
                "alarm_threshold",
                self.alarm_threshold,
                d.alarm_threshold,
            ),
            jump_impulse: finite("jump_impulse", self.jump_impulse, d.jump_impulse),
            hop_impulse: finite("hop_impulse", self.hop_impulse, d.hop_impulse),
            fall_bounce: finite("fall_bounce", self.fall_bounce, d.fall_bounce),
            gravity: positive("gravity", self.gravity, d.gravity),
            smoothing: non_negative("smoothing", self.smoothing, d.smoothing),
            half_width: non_negative("half_width", self.half_width, d.half_width),
            fall_margin: non_negative("fall_margin", self.fall_margin, d.fall_margin),
        }
    }
}

pub(crate) fn positive(name: &str, value: f32, fallback: f32) -> f32 {
    checked(name, value, fallback, value.is_finite() && value > 0.0)
}

fn non_negative(name: &str, value: f32, fallback: f32) -> f32 {
    checked(name, value, fallback, value.is_finite() && value >= 0.0)
}

fn finite(name: &str, value: f32, fallback: f32) -> f32 {
    checked(name, value, fallback, value.is_finite())
}

fn checked<T: std::fmt::Display>(name: &str, value: T, fallback: T, ok: bool) -> T {
    if ok {
        value
    } else {
        warn!("Invalid tuning value {name} = {value}, using {fallback}");
        fallback
    }
}
