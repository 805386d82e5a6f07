#![warn(clippy::all, clippy::pedantic)]

use log::debug;

use crate::components::{Avatar, AvatarState, Block, MovingBlock};
use crate::config::AvatarTuning;

/// What the hazard check decided for a standing avatar this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Calm,
    Alarmed,
    Jumped,
}

/// Distance from the moving block's leading edge to `x`.
/// Positive while `x` is still ahead of the block in its direction of travel.
#[must_use]
pub fn leading_gap(moving: &MovingBlock, x: f32) -> f32 {
    (x - moving.leading_edge()) * moving.direction.sign()
}

impl Avatar {
    /// Standing, centred on `landing`
    #[must_use]
    pub fn new(landing: &Block) -> Self {
        Self {
            x: landing.center(),
            y: landing.top,
            velocity_y: 0.0,
            state: AvatarState::Standing { alarmed: false },
        }
    }

    #[must_use]
    pub fn is_standing(&self) -> bool {
        matches!(self.state, AvatarState::Standing { .. })
    }

    #[must_use]
    pub fn is_falling(&self) -> bool {
        self.state == AvatarState::Falling
    }

    #[must_use]
    pub fn is_alarmed(&self) -> bool {
        self.state == AvatarState::Standing { alarmed: true }
    }

    /// Ease `x` toward `target_x`. Applies in every state.
    pub fn track(&mut self, target_x: f32, time_scale: f32, tuning: &AvatarTuning) {
        let factor = (tuning.smoothing * time_scale).min(1.0);
        self.x += (target_x - self.x) * factor;
    }

    /// Vertical physics for one frame. `floor_y` must be the current landing target's top,
    /// read fresh every frame. Returns true when a jump landed this frame.
    pub fn integrate(&mut self, floor_y: f32, time_scale: f32, tuning: &AvatarTuning) -> bool {
        match self.state {
            AvatarState::Standing { .. } => {
                self.y = floor_y;
                self.velocity_y = 0.0;
                false
            }
            AvatarState::Jumping => {
                self.y += self.velocity_y * time_scale;
                self.velocity_y += tuning.gravity * time_scale;

                if self.velocity_y > 0.0 && self.y >= floor_y {
                    self.y = floor_y;
                    self.velocity_y = 0.0;
                    self.state = AvatarState::Standing { alarmed: false };
                    debug!("Avatar landed at {floor_y:.1}");
                    true
                } else {
                    false
                }
            }
            AvatarState::Falling => {
                self.y += self.velocity_y * time_scale;
                self.velocity_y += tuning.gravity * time_scale;
                false
            }
        }
    }

    /// Hazard-avoidance heuristic. Only a standing avatar reacts; it raises the alarm when
    /// the approaching block is within the wide threshold and jumps inside the near one.
    pub fn assess_hazard(&mut self, moving: &MovingBlock, tuning: &AvatarTuning) -> Reaction {
        if !self.is_standing() {
            return Reaction::Calm;
        }

        let gap = leading_gap(moving, self.x);
        let threatening = gap >= 0.0;

        if threatening && gap <= tuning.near_threshold {
            self.velocity_y = tuning.jump_impulse;
            self.state = AvatarState::Jumping;
            debug!("Avatar jumps, block {gap:.1} away");
            Reaction::Jumped
        } else if threatening && gap <= tuning.alarm_threshold {
            self.state = AvatarState::Standing { alarmed: true };
            Reaction::Alarmed
        } else {
            self.state = AvatarState::Standing { alarmed: false };
            Reaction::Calm
        }
    }

    /// True if the block's leading edge swept into the avatar's body between `before` and `after`
    /// while the avatar's feet were inside the block's row (below `row_top`).
    #[must_use]
    pub fn struck_by(
        &self,
        before: &MovingBlock,
        after: &MovingBlock,
        row_top: f32,
        tuning: &AvatarTuning,
    ) -> bool {
        if self.is_falling() || self.y <= row_top {
            return false;
        }
        if before.direction != after.direction {
            return false;
        }

        let gap_before = leading_gap(before, self.x);
        let gap_after = leading_gap(after, self.x);
        gap_before > tuning.half_width && gap_after <= tuning.half_width
    }

    /// True if a standing avatar's feet are inside the block's row and its body overlaps the
    /// block. Catches a block that turned around at an edge and came back onto the avatar.
    #[must_use]
    pub fn overlapped_by(&self, moving: &MovingBlock, row_top: f32, tuning: &AvatarTuning) -> bool {
        self.is_standing()
            && self.y > row_top
            && moving.left < self.x + tuning.half_width
            && moving.right() > self.x - tuning.half_width
    }

    /// Small hop onto a freshly placed block. Only from Standing.
    pub fn hop(&mut self, tuning: &AvatarTuning) {
        if self.is_standing() {
            self.velocity_y = tuning.hop_impulse;
            self.state = AvatarState::Jumping;
        }
    }

    /// Enter the terminal falling state with a small upward bounce
    pub fn fall(&mut self, tuning: &AvatarTuning) {
        if !self.is_falling() {
            self.velocity_y = tuning.fall_bounce;
            self.state = AvatarState::Falling;
            debug!("Avatar falls from {:.1}", self.y);
        }
    }

    /// Whether a falling avatar has dropped past the bottom of the viewport plus the margin
    #[must_use]
    pub fn fell_out(&self, camera_offset: f32, viewport_height: f32, tuning: &AvatarTuning) -> bool {
        self.is_falling() && self.y + camera_offset > viewport_height + tuning.fall_margin
    }
}
