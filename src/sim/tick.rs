//! Fixed timestep simulation tick
//!
//! One invocation per host animation frame advances the whole sim exactly one
//! step and returns the effect events raised along the way. The caller
//! forwards those to the audio collaborator and publishes a snapshot.

use super::state::{GameEvent, GameState};
use super::{particles, physics, pickup};
use crate::consts::*;

/// Input snapshot for a single tick. Every intent is "held right now";
/// anything the host failed to report simply stays false.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub restart: bool,
}

/// Advance the game state by one tick.
///
/// Order within the tick: restart check, run input, footstep cadence, jump,
/// integration, collision resolution, treasure pickup and win check, particle
/// update. Nothing observes intermediate state; the snapshot is taken by the
/// caller after this returns.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Restart is accepted in any phase and resets atomically: the next
    // published snapshot is already the fresh session.
    if input.restart {
        state.restart();
        return events;
    }

    state.time_ticks += 1;

    // One RNG instance per tick; every burst raised this tick continues the
    // same stream instead of replaying it
    let mut rng = state.burst_rng();

    physics::apply_run_input(&mut state.player, input.left, input.right);

    // Footstep cadence while running on a surface
    if state.player.moving() && state.player.on_ground {
        state.player.step_timer += 1;
        if state.player.step_timer > STEP_INTERVAL_TICKS {
            state.player.step_timer = 0;
            events.push(GameEvent::Step);
        }
    }

    if physics::try_jump(&mut state.player, input.jump) {
        events.push(GameEvent::Jump);
        particles::jump_burst(&mut state.particles, &state.player, &mut rng);
    }

    physics::integrate(&mut state.player);
    physics::resolve_collisions(&mut state.player, &state.platforms);

    pickup::collect_treasures(state, &mut rng, &mut events);

    particles::update(&mut state.particles);

    events
}
