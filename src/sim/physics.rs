//! Player physics and collision resolution
//!
//! Semi-implicit Euler per tick: forces update velocity, then position
//! integrates the new velocity. Collision resolution snaps the player onto
//! whichever surface it crossed; the ground check runs last and wins when a
//! platform would also apply.

use super::state::{Platform, Player};
use crate::consts::*;

/// Apply held direction keys to horizontal velocity and facing.
/// With neither key held, velocity decays by the friction multiplier and
/// approaches zero asymptotically; it is never snapped to exactly zero.
pub fn apply_run_input(player: &mut Player, left: bool, right: bool) {
    if left {
        player.vel.x = -PLAYER_SPEED;
        player.facing = -1;
    } else if right {
        player.vel.x = PLAYER_SPEED;
        player.facing = 1;
    } else {
        player.vel.x *= FRICTION;
    }
}

/// Attempt a jump. Fires only on the rising edge of the jump input and only
/// while grounded; returns true when the impulse was applied so the caller
/// can emit the effect event and particle burst.
pub fn try_jump(player: &mut Player, jump: bool) -> bool {
    let jumped = jump && !player.jump_held && player.on_ground;
    player.jump_held = jump;
    if jumped {
        player.vel.y = -JUMP_POWER;
        player.on_ground = false;
    }
    jumped
}

/// Accumulate gravity, integrate position, clamp to world bounds.
/// The horizontal clamp is silent: no bounce, no event.
pub fn integrate(player: &mut Player) {
    player.vel.y += GRAVITY;
    player.pos += player.vel;
    player.pos.x = player.pos.x.clamp(0.0, WORLD_WIDTH - player.size.x);
}

/// Resolve platform and ground collisions after integration.
///
/// Grounded is recomputed from scratch: it holds iff the player's lower edge
/// rests on a surface when this returns. A platform catches the player only
/// while descending, when the lower edge has crossed into the platform's top
/// band within its horizontal span. The ground line is checked last, so it
/// wins if both are in range.
pub fn resolve_collisions(player: &mut Player, platforms: &[Platform]) {
    // Every check is judged against the integrated position, so one snap
    // cannot open or close another check within the same tick.
    let bottom = player.bottom();
    let descending = player.vel.y > 0.0;
    player.on_ground = false;

    for platform in platforms {
        let in_span =
            player.pos.x + player.size.x > platform.left() && player.pos.x < platform.right();
        let in_band = bottom > platform.top() && bottom < platform.band_bottom();

        if descending && in_span && in_band {
            player.pos.y = platform.top() - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
        }
    }

    if bottom >= GROUND_Y {
        player.pos.y = GROUND_Y - player.size.y;
        player.vel.y = 0.0;
        player.on_ground = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn grounded_player() -> Player {
        let mut player = Player::spawn();
        player.pos.y = GROUND_Y - player.size.y;
        player.on_ground = true;
        player
    }

    fn step(player: &mut Player, platforms: &[Platform], left: bool, right: bool, jump: bool) {
        apply_run_input(player, left, right);
        try_jump(player, jump);
        integrate(player);
        resolve_collisions(player, platforms);
    }

    #[test]
    fn test_clamp_at_left_wall() {
        let mut player = grounded_player();
        player.pos.x = 0.0;
        step(&mut player, &[], true, false, false);
        assert_eq!(player.pos.x, 0.0);
        assert!(player.vel.x < 0.0);
    }

    #[test]
    fn test_clamp_at_right_wall() {
        let mut player = grounded_player();
        player.pos.x = WORLD_WIDTH - player.size.x;
        step(&mut player, &[], false, true, false);
        assert_eq!(player.pos.x, WORLD_WIDTH - player.size.x);
    }

    #[test]
    fn test_friction_decays_but_never_zeroes() {
        let mut player = grounded_player();
        player.vel.x = PLAYER_SPEED;
        let mut prev = player.vel.x;
        for _ in 0..200 {
            apply_run_input(&mut player, false, false);
            assert!(player.vel.x.abs() < prev.abs() || prev == 0.0);
            assert!(player.vel.x > 0.0, "friction must not snap vx to zero");
            prev = player.vel.x;
        }
    }

    #[test]
    fn test_jump_requires_ground_and_rising_edge() {
        let mut player = grounded_player();
        assert!(try_jump(&mut player, true));
        assert_eq!(player.vel.y, -JUMP_POWER);
        assert!(!player.on_ground);

        // Still holding jump mid-air: no second impulse
        assert!(!try_jump(&mut player, true));

        // Land, but the key was never released: still no impulse
        player.on_ground = true;
        player.vel.y = 0.0;
        assert!(!try_jump(&mut player, true));

        // Release, press again: jumps
        assert!(!try_jump(&mut player, false));
        assert!(try_jump(&mut player, true));
    }

    #[test]
    fn test_lands_on_ground() {
        let mut player = Player::spawn();
        player.pos.y = GROUND_Y - player.size.y - 5.0;
        player.vel.y = 10.0;
        integrate(&mut player);
        resolve_collisions(&mut player, &[]);
        assert_eq!(player.bottom(), GROUND_Y);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_lands_on_platform_only_when_descending() {
        let platform = Platform::new(320.0, GROUND_Y - 60.0, 60.0, 20.0);
        let mut player = Player::spawn();
        player.pos.x = 330.0;
        // Lower edge just above the platform top, falling
        player.pos.y = platform.top() - player.size.y - 2.0;
        player.vel.y = 8.0;
        integrate(&mut player);
        resolve_collisions(&mut player, std::slice::from_ref(&platform));
        assert_eq!(player.bottom(), platform.top());
        assert!(player.on_ground);

        // Same overlap but moving upward: passes through
        let mut rising = Player::spawn();
        rising.pos.x = 330.0;
        rising.pos.y = platform.top() - rising.size.y + 5.0;
        rising.vel.y = -JUMP_POWER;
        integrate(&mut rising);
        resolve_collisions(&mut rising, std::slice::from_ref(&platform));
        assert!(!rising.on_ground);
        assert!(rising.vel.y != 0.0);
    }

    #[test]
    fn test_walking_off_platform_clears_grounded() {
        let platform = Platform::new(320.0, GROUND_Y - 60.0, 60.0, 20.0);
        let mut player = Player::spawn();
        player.pos = Vec2::new(330.0, platform.top() - player.size.y);
        player.on_ground = true;
        // Walk right past the platform edge
        for _ in 0..30 {
            step(&mut player, std::slice::from_ref(&platform), false, true, false);
            if player.pos.x > platform.right() && player.bottom() < GROUND_Y {
                assert!(!player.on_ground, "airborne player must not stay grounded");
            }
        }
        // Eventually lands on the sand below
        assert_eq!(player.bottom(), GROUND_Y);
        assert!(player.on_ground);
    }

    #[test]
    fn test_ground_check_wins_when_both_apply() {
        // Platform band straddling the ground line; ground runs last and wins
        let platform = Platform::new(100.0, GROUND_Y - 10.0, 60.0, 20.0);
        let mut player = Player::spawn();
        player.pos.x = 110.0;
        player.pos.y = GROUND_Y - player.size.y + 4.0;
        player.vel.y = 3.0;
        resolve_collisions(&mut player, std::slice::from_ref(&platform));
        assert_eq!(player.bottom(), GROUND_Y);
        assert!(player.on_ground);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_world_bounds(
            start_x in 0.0f32..(WORLD_WIDTH - PLAYER_WIDTH),
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..300),
        ) {
            let platforms = [Platform::new(320.0, GROUND_Y - 60.0, 60.0, 20.0)];
            let mut player = grounded_player();
            player.pos.x = start_x;
            for (left, right, jump) in inputs {
                step(&mut player, &platforms, left, right, jump);
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.x <= WORLD_WIDTH - player.size.x);
                prop_assert!(player.bottom() <= GROUND_Y);
            }
        }
    }
}
