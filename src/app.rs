#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::error;
use std::time::Instant;

use crate::FrameClock;
use crate::components::{Hud, Input};
use crate::config::Config;
use crate::leaderboard::{ScoreEntry, ScoreStore, normalize_name};
use crate::reporter::ScoreReporter;
use crate::round::Simulation;
use crate::systems;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// Supplies the per-frame timestamp
pub trait TimeSource {
    fn now_ms(&mut self) -> f64;
}

/// Wall-clock milliseconds since the source was created
pub struct SystemTimeSource {
    start: Instant,
}

impl SystemTimeSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Advances by a fixed step on every call, for driving the game without real time
pub struct FixedStepTimeSource {
    now_ms: f64,
    step_ms: f64,
}

impl FixedStepTimeSource {
    #[must_use]
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
        }
    }
}

impl TimeSource for FixedStepTimeSource {
    fn now_ms(&mut self) -> f64 {
        let now = self.now_ms;
        self.now_ms += self.step_ms;
        now
    }
}

pub struct App {
    pub world: World,
    pub should_quit: bool,
    time_source: Box<dyn TimeSource>,
    max_time_scale: f32,
}

impl App {
    pub fn new<S>(config: &Config, store: S) -> Self
    where
        S: ScoreStore + Send + 'static,
    {
        Self::with_time_source(
            config,
            store,
            Box::new(SystemTimeSource::new()),
            fastrand::u64(..),
        )
    }

    pub fn with_time_source<S>(
        config: &Config,
        store: S,
        time_source: Box<dyn TimeSource>,
        seed: u64,
    ) -> Self
    where
        S: ScoreStore + Send + 'static,
    {
        let simulation = Simulation::new(config.tuning.clone(), seed);
        let mut world = World::new();
        world.insert_resource(FrameClock::new(
            simulation.tuning().target_frame_interval_ms,
        ));
        world.insert_resource(Input::default());
        world.insert_resource(simulation);
        world.insert_resource(Hud {
            player: normalize_name(&config.player.name),
            ..Hud::default()
        });
        world.insert_resource(ScoreReporter::spawn(store, config.leaderboard.top_n));

        Self {
            world,
            should_quit: false,
            time_source,
            max_time_scale: config.display.clone().validated().max_time_scale,
        }
    }

    /// A drop trigger from the keyboard or pointer, applied right away
    pub fn on_drop(&mut self) {
        self.world.resource_mut::<Input>().drop = true;
        systems::input_system(&mut self.world);
    }

    /// Advance one frame using the injected time source
    pub fn on_frame(&mut self) {
        let now = self.time_source.now_ms();
        systems::frame_system(&mut self.world, now, self.max_time_scale);
    }

    /// Pick up a reloaded configuration. Gameplay tuning waits for the next round.
    pub fn apply_config(&mut self, config: &Config) {
        self.world
            .resource_mut::<Simulation>()
            .set_tuning(config.tuning.clone());
        self.world.resource_mut::<Hud>().player = normalize_name(&config.player.name);
        self.max_time_scale = config.display.clone().validated().max_time_scale;
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        self.world.resource::<Simulation>()
    }

    #[must_use]
    pub fn hud(&self) -> &Hud {
        self.world.resource::<Hud>()
    }

    #[must_use]
    pub fn leaderboard(&self) -> Option<&[ScoreEntry]> {
        self.world.resource::<ScoreReporter>().leaderboard()
    }
}
