//! Collectible detection and the win transition

use rand::Rng;

use super::particles;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Scan every uncollected treasure against the player and pick up the ones
/// in range. After the full scan, flip the session to Won exactly once when
/// the last treasure went - even if several were taken this tick.
pub fn collect_treasures(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let center = state.player.center();

    for treasure in &mut state.treasures {
        if treasure.collected {
            continue;
        }
        // Distance to the logical anchor; render bobbing is ignored here
        if treasure.pos.distance(center) < PICKUP_RADIUS {
            treasure.collected = true;
            state.score += treasure.value;
            events.push(GameEvent::Collect);
            particles::collect_burst(&mut state.particles, treasure.pos, rng);
        }
    }

    if state.phase == GamePhase::Playing && state.treasures.iter().all(|t| t.collected) {
        state.phase = GamePhase::Won;
        events.push(GameEvent::Win);
    }
}
