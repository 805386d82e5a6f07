use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::FrameClock;
use crate::components::{Hud, Input};
use crate::reporter::ScoreReporter;
use crate::round::{RoundObserver, Simulation};

/// Routes round notifications to the HUD and the score reporter
pub struct HostObserver<'a> {
    hud: &'a mut Hud,
    reporter: &'a ScoreReporter,
}

impl RoundObserver for HostObserver<'_> {
    fn on_score_changed(&mut self, score: u32) {
        self.hud.score = score;
        self.hud.session_best = self.hud.session_best.max(score);
        if score == 0 {
            self.hud.final_score = None;
        }
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.hud.final_score = Some(final_score);
        self.hud.rounds_played += 1;

        // Best-effort: a failed hand-off is logged by the reporter and otherwise ignored
        self.reporter.submit(&self.hud.player, final_score);
        self.reporter.refresh();
    }
}

// Run `f` against the simulation with an observer wired to the host resources
fn with_simulation<U>(
    world: &mut World,
    f: impl FnOnce(&mut Simulation, &mut HostObserver<'_>) -> U,
) -> U {
    world.resource_scope(|world, mut simulation: Mut<Simulation>| {
        world.resource_scope(|world, reporter: Mut<ScoreReporter>| {
            let mut hud = world.resource_mut::<Hud>();
            let mut observer = HostObserver {
                hud: &mut *hud,
                reporter: &*reporter,
            };
            f(&mut *simulation, &mut observer)
        })
    })
}

/// Applies a latched drop trigger immediately
pub fn input_system(world: &mut World) {
    let dropped = std::mem::take(&mut world.resource_mut::<Input>().drop);
    if !dropped {
        return;
    }

    let phase = with_simulation(world, |simulation, observer| {
        simulation.handle_drop(observer);
        simulation.phase()
    });
    debug!("Drop handled, phase now {phase:?}");
}

/// One host frame at timestamp `now_ms`. The first frame only primes the clock.
pub fn frame_system(world: &mut World, now_ms: f64, max_time_scale: f32) {
    let (primed, time_scale) = {
        let mut clock = world.resource_mut::<FrameClock>();
        let primed = clock.is_primed();
        (primed, clock.tick(now_ms))
    };

    if primed {
        let time_scale = if time_scale.is_finite() {
            time_scale.clamp(0.0, max_time_scale.max(0.0))
        } else {
            0.0
        };
        trace!("Frame at {now_ms:.1}ms, time scale {time_scale:.2}");
        with_simulation(world, |simulation, observer| {
            simulation.advance_frame(time_scale, observer);
        });
    }

    world.resource_mut::<ScoreReporter>().poll();
}
