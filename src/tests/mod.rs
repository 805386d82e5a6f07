#![warn(clippy::all, clippy::pedantic)]

pub mod config_loader_tests;
pub mod stack_tests;
pub mod ui_tests;

// Shared test helpers
#[cfg(test)]
pub mod test_utils {
    use crate::components::{Block, Direction, MovingBlock};
    use crate::config::TuningConfig;
    use crate::round::{RoundEvents, Simulation, TickInput};

    pub const DROP: TickInput = TickInput { drop: true };
    pub const IDLE: TickInput = TickInput { drop: false };

    #[must_use]
    pub fn block(left: f32, width: f32) -> Block {
        Block {
            left,
            top: 575.0,
            width,
            color_index: 0,
        }
    }

    #[must_use]
    pub fn moving(left: f32, width: f32, direction: Direction) -> MovingBlock {
        MovingBlock {
            left,
            width,
            direction,
            speed: 4.0,
        }
    }

    // A simulation with default tuning and a fixed seed
    #[must_use]
    pub fn create_test_simulation() -> Simulation {
        Simulation::new(TuningConfig::default(), 7)
    }

    // Step until the phase changes or `max_frames` pass; returns the frames taken
    pub fn run_until<F>(
        simulation: &mut Simulation,
        events: &mut RoundEvents,
        max_frames: usize,
        done: F,
    ) -> usize
    where
        F: Fn(&Simulation) -> bool,
    {
        for frame in 0..max_frames {
            if done(simulation) {
                return frame;
            }
            simulation.step(1.0, &IDLE, events);
        }
        max_frames
    }
}
