#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;

use crate::camera::Camera;

/// A block resting on the tower. Coordinates are untranslated game units, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub color_index: usize,
}

impl Block {
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[must_use]
    pub fn center(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        if rng.bool() {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The block sliding back and forth one row above the landing target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingBlock {
    pub left: f32,
    pub width: f32,
    pub direction: Direction,
    pub speed: f32,
}

impl MovingBlock {
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Edge that hits things first given the direction of travel
    #[must_use]
    pub fn leading_edge(&self) -> f32 {
        match self.direction {
            Direction::Left => self.left,
            Direction::Right => self.right(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarState {
    Standing { alarmed: bool },
    Jumping,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    pub x: f32,
    // Feet position
    pub y: f32,
    pub velocity_y: f32,
    pub state: AvatarState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    // Waiting for the first drop
    Idle,
    Active,
    // Missed or struck, the avatar is still falling
    Over,
    // Terminal; the game-over notification has fired
    OverScreen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub score: u32,
    pub speed: f32,
    pub camera: Camera,
    pub phase: RoundPhase,
}

impl RoundState {
    #[must_use]
    pub fn new(base_speed: f32) -> Self {
        Self {
            score: 0,
            speed: base_speed,
            camera: Camera::default(),
            phase: RoundPhase::Idle,
        }
    }

    #[must_use]
    pub fn started(&self) -> bool {
        self.phase != RoundPhase::Idle
    }

    #[must_use]
    pub fn over_screen_shown(&self) -> bool {
        self.phase == RoundPhase::OverScreen
    }

    #[must_use]
    pub fn camera_offset(&self) -> f32 {
        self.camera.offset()
    }
}

/// Input latched by the host between frames
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub drop: bool,
}

/// What the host shows around the playfield, fed by round notifications
#[derive(Resource, Debug, Clone, Default)]
pub struct Hud {
    pub player: String,
    pub score: u32,
    pub session_best: u32,
    // Set when the over screen appears, cleared by the reset
    pub final_score: Option<u32>,
    pub rounds_played: u32,
}
