#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

use crate::config::TuningConfig;

/// Block speed after `placements` successful drops, with no upper bound
#[must_use]
pub fn speed_for(placements: u32, tuning: &TuningConfig) -> f32 {
    tuning.base_speed + placements as f32 * tuning.speed_increment
}
