//! Short-lived visual particles
//!
//! Spawned by effect handlers (jump, collect), integrated every tick, and
//! reaped before the snapshot is published. Burst sizes are bounded by the
//! callers; the active set itself is uncapped.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleKind, Player};
use crate::consts::*;

/// Append one particle. Life starts at 1.0 unless overridden; decay per tick
/// is fixed.
pub fn spawn(
    particles: &mut Vec<Particle>,
    pos: Vec2,
    vel: Vec2,
    kind: ParticleKind,
    life: Option<f32>,
    size: f32,
) {
    particles.push(Particle {
        pos,
        vel,
        kind,
        life: life.unwrap_or(1.0),
        decay: PARTICLE_DECAY,
        size,
    });
}

/// Sand kicked up at the player's feet on jump
pub fn jump_burst(particles: &mut Vec<Particle>, player: &Player, rng: &mut impl Rng) {
    for _ in 0..JUMP_BURST {
        let spread = (rng.random::<f32>() - 0.5) * player.size.x;
        let pos = Vec2::new(player.center().x + spread, player.bottom());
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 4.0,
            rng.random::<f32>() * -2.0,
        );
        let size = rng.random::<f32>() * 3.0 + 1.0;
        spawn(particles, pos, vel, ParticleKind::Dust, None, size);
    }
}

/// Gold glitter scattered around a collected treasure
pub fn collect_burst(particles: &mut Vec<Particle>, at: Vec2, rng: &mut impl Rng) {
    for _ in 0..COLLECT_BURST {
        let offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * 20.0,
            (rng.random::<f32>() - 0.5) * 20.0,
        );
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 6.0,
            (rng.random::<f32>() - 0.5) * 6.0,
        );
        let size = rng.random::<f32>() * 3.0 + 1.0;
        spawn(particles, at + offset, vel, ParticleKind::Sparkle, None, size);
    }
}

/// Integrate every particle one tick and drop the expired ones.
/// Particle gravity is far lighter than the player's.
pub fn update(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= p.decay;
    }
    // Repeated f32 subtraction leaves sub-epsilon residue at nominal zero,
    // so a bare `> 0.0` would keep a spent particle one tick too long
    particles.retain(|p| p.life > 1e-6);
}
