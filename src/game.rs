#![warn(clippy::all, clippy::pedantic)]

// Playfield dimensions, in game units (one block row is BLOCK_HEIGHT units tall)
pub const VIEWPORT_WIDTH: f32 = 300.0;
pub const VIEWPORT_HEIGHT: f32 = 600.0;
pub const BLOCK_HEIGHT: f32 = 25.0;
pub const INITIAL_WIDTH: f32 = 150.0;

// Timing
pub const TARGET_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0; // Reference display rate the speeds are tuned for

// Difficulty (units per reference frame)
pub const BASE_SPEED: f32 = 4.0;
pub const SPEED_INCREMENT: f32 = 0.2;

// Camera starts following once the stack is taller than this many blocks
pub const CAMERA_THRESHOLD: usize = 8;

// Number of block colours; placed blocks cycle through them
pub const PALETTE_SIZE: usize = 8;

// Avatar hazard heuristic
pub const NEAR_THRESHOLD: f32 = 45.0;
pub const ALARM_THRESHOLD: f32 = 70.0;

// Avatar physics (units per reference frame, y grows downward)
pub const JUMP_IMPULSE: f32 = -12.0;
pub const HOP_IMPULSE: f32 = -6.0;
pub const FALL_BOUNCE: f32 = -4.0;
pub const GRAVITY: f32 = 0.4;
pub const TRACKING_SMOOTHING: f32 = 0.15;
pub const AVATAR_HALF_WIDTH: f32 = 8.0;
pub const FALL_MARGIN: f32 = 50.0;

// Leaderboard
pub const LEADERBOARD_SIZE: usize = 20;
pub const ANONYMOUS_PLAYER: &str = "Anonymous";
