#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::avatar::Reaction;
use crate::components::{Avatar, Direction, MovingBlock, RoundPhase, RoundState};
use crate::config::TuningConfig;
use crate::difficulty;
use crate::stack::{Placement, Stack};

/// Receives round notifications synchronously, from inside the tick that caused them
pub trait RoundObserver {
    fn on_score_changed(&mut self, score: u32);
    fn on_game_over(&mut self, final_score: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    ScoreChanged(u32),
    GameOver(u32),
}

/// Observer that just records what it was told
#[derive(Debug, Clone, Default)]
pub struct RoundEvents {
    pub events: Vec<RoundEvent>,
}

impl RoundObserver for RoundEvents {
    fn on_score_changed(&mut self, score: u32) {
        self.events.push(RoundEvent::ScoreChanged(score));
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.events.push(RoundEvent::GameOver(final_score));
    }
}

/// Per-tick input
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub drop: bool,
}

/// All mutable gameplay state for one game instance
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    pub(crate) tuning: TuningConfig,
    // Applied at the next reset
    pub(crate) pending_tuning: Option<TuningConfig>,
    pub(crate) stack: Stack,
    pub(crate) avatar: Avatar,
    pub(crate) round: RoundState,
    rng: fastrand::Rng,
}

impl Simulation {
    #[must_use]
    pub fn new(tuning: TuningConfig, seed: u64) -> Self {
        let tuning = tuning.validated();
        let stack = Stack::new(&tuning);
        let avatar = Avatar::new(stack.top());
        let round = RoundState::new(tuning.base_speed);

        Self {
            tuning,
            pending_tuning: None,
            stack,
            avatar,
            round,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    #[must_use]
    pub fn tuning(&self) -> &TuningConfig {
        &self.tuning
    }

    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    #[must_use]
    pub fn moving_block(&self) -> &MovingBlock {
        self.stack.moving()
    }

    #[must_use]
    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.round.score
    }

    #[must_use]
    pub fn camera_offset(&self) -> f32 {
        self.round.camera_offset()
    }

    /// Queue new tuning for the next round
    pub fn set_tuning(&mut self, tuning: TuningConfig) {
        self.pending_tuning = Some(tuning.validated());
    }

    /// One tick: apply the input, then advance one frame
    pub fn step(&mut self, time_scale: f32, input: &TickInput, observer: &mut impl RoundObserver) {
        if input.drop {
            self.handle_drop(observer);
        }
        self.advance_frame(time_scale, observer);
    }

    /// A drop trigger (key, click or tap), handled the moment it arrives
    pub fn handle_drop(&mut self, observer: &mut impl RoundObserver) {
        match self.round.phase {
            RoundPhase::Idle => self.start(),
            RoundPhase::Active => self.place(observer),
            RoundPhase::Over => {}
            RoundPhase::OverScreen => self.reset(observer),
        }
    }

    /// Advance the world by one frame scaled by `time_scale`
    pub fn advance_frame(&mut self, time_scale: f32, observer: &mut impl RoundObserver) {
        if self.round.phase == RoundPhase::OverScreen {
            return;
        }

        let before = *self.stack.moving();
        if self.round.phase == RoundPhase::Active {
            self.stack
                .advance_moving_block(time_scale, self.tuning.viewport_width);
        }

        let landing = *self.stack.top();
        let avatar_tuning = &self.tuning.avatar;
        self.avatar.track(landing.center(), time_scale, avatar_tuning);
        self.avatar.integrate(landing.top, time_scale, avatar_tuning);

        if self.round.phase == RoundPhase::Active {
            let after = *self.stack.moving();
            if self.avatar.assess_hazard(&after, avatar_tuning) == Reaction::Jumped {
                debug!("Dodge at score {}", self.round.score);
            }

            let row_top = self.stack.moving_top();
            if self.avatar.struck_by(&before, &after, row_top, avatar_tuning)
                || self.avatar.overlapped_by(&after, row_top, avatar_tuning)
            {
                info!("Avatar struck by the moving block at score {}", self.round.score);
                self.avatar.fall(avatar_tuning);
                self.round.phase = RoundPhase::Over;
            }
        }

        if self.round.phase == RoundPhase::Over
            && self.avatar.fell_out(
                self.round.camera_offset(),
                self.tuning.viewport_height,
                avatar_tuning,
            )
        {
            self.round.phase = RoundPhase::OverScreen;
            info!("Round over with score {}", self.round.score);
            observer.on_game_over(self.round.score);
        }
    }

    /// Restore start-of-round state and announce the zeroed score
    pub fn reset(&mut self, observer: &mut impl RoundObserver) {
        if let Some(tuning) = self.pending_tuning.take() {
            self.tuning = tuning;
        }

        self.stack = Stack::new(&self.tuning);
        self.avatar = Avatar::new(self.stack.top());
        self.round = RoundState::new(self.tuning.base_speed);
        debug!("Round reset");

        observer.on_score_changed(0);
    }

    fn start(&mut self) {
        let direction = Direction::random(&mut self.rng);
        self.stack
            .respawn_moving_block(direction, self.round.speed, self.tuning.viewport_width);
        self.round.phase = RoundPhase::Active;
        info!("Round started");
    }

    fn place(&mut self, observer: &mut impl RoundObserver) {
        match self
            .stack
            .evaluate_placement(self.round.score, self.tuning.palette_size)
        {
            Placement::Miss { overlap } => {
                info!("Missed the tower (overlap {overlap:.1}) at score {}", self.round.score);
                self.avatar.fall(&self.tuning.avatar);
                self.round.phase = RoundPhase::Over;
            }
            Placement::Landed(_) => {
                self.round.score += 1;
                self.round.speed = difficulty::speed_for(self.round.score, &self.tuning);
                if self.round.camera.on_placement(
                    self.stack.len(),
                    self.tuning.camera_threshold,
                    self.tuning.block_height,
                ) {
                    debug!("Camera offset now {:.1}", self.round.camera_offset());
                }

                let direction = Direction::random(&mut self.rng);
                self.stack.respawn_moving_block(
                    direction,
                    self.round.speed,
                    self.tuning.viewport_width,
                );
                self.avatar.hop(&self.tuning.avatar);

                observer.on_score_changed(self.round.score);
            }
        }
    }
}
