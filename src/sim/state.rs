//! Game state and core simulation types
//!
//! All mutable gameplay state lives in [`GameState`]; the renderer collaborator
//! only ever sees the [`Snapshot`] published after each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// All treasures collected; only Restart leaves this phase
    Won,
}

/// Discrete effect events emitted by the sim for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    Step,
    Collect,
    Win,
}

/// Treasure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasureKind {
    Coin,
    Gem,
    Crown,
}

/// A collectible treasure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    /// Logical anchor point. Pickup distance is measured to this; any
    /// floating/bobbing offset is purely a render effect.
    pub pos: Vec2,
    pub kind: TreasureKind,
    pub value: u32,
    pub collected: bool,
}

impl Treasure {
    pub fn new(x: f32, y: f32, kind: TreasureKind, value: u32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
            value,
            collected: false,
        }
    }
}

/// A static platform (axis-aligned rectangle, immutable for the session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Top surface y (where a landing player rests)
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    /// Bottom of the landing band: a descending player whose lower edge is
    /// between `top()` and this is snapped on top.
    pub fn band_bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// +1 facing right, -1 facing left
    pub facing: i8,
    pub on_ground: bool,
    /// Ticks of grounded movement since the last footstep event
    pub step_timer: u32,
    /// Jump input latch so a held key fires only on its rising edge
    pub jump_held: bool,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            facing: 1,
            on_ground: false,
            step_timer: 0,
            jump_held: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Y of the player's lower edge
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn moving(&self) -> bool {
        self.vel.x.abs() > 0.0
    }
}

/// Visual particle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Sand kicked up by a jump
    Dust,
    /// Gold glitter from a pickup
    Sparkle,
}

/// A short-lived visual particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// Remaining life in [0, 1]; the particle is reaped once this runs out
    pub life: f32,
    pub decay: f32,
    pub size: f32,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed (particle burst shapes only; layout is static)
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u32,
    pub phase: GamePhase,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub treasures: Vec<Treasure>,
    pub particles: Vec<Particle>,
}

impl GameState {
    /// Create a fresh session with the island layout
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            time_ticks: 0,
            score: 0,
            phase: GamePhase::Playing,
            player: Player::spawn(),
            platforms: vec![Platform::new(320.0, GROUND_Y - 60.0, 60.0, 20.0)],
            treasures: vec![
                Treasure::new(200.0, GROUND_Y - 25.0, TreasureKind::Coin, 100),
                Treasure::new(400.0, GROUND_Y - 25.0, TreasureKind::Gem, 200),
                Treasure::new(600.0, GROUND_Y - 25.0, TreasureKind::Crown, 300),
                // Elevated, reachable from the platform
                Treasure::new(350.0, GROUND_Y - 80.0, TreasureKind::Coin, 100),
            ],
            particles: Vec::new(),
        }
    }

    /// Reset for a new round. Platforms are untouched; everything else goes
    /// back to its initial state in one step, so no consumer ever observes a
    /// partially reset session.
    pub fn restart(&mut self) {
        self.time_ticks = 0;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.player = Player::spawn();
        for treasure in &mut self.treasures {
            treasure.collected = false;
        }
        self.particles.clear();
    }

    pub fn won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// RNG for burst shapes on the current tick. Derived from the session
    /// seed and tick counter so replaying the same inputs replays the same
    /// particles, without carrying RNG state through serialization.
    pub fn burst_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.time_ticks.rotate_left(17))
    }

    /// Eye-blink animation phase, derived from the tick counter
    pub fn blinking(&self) -> bool {
        self.time_ticks % BLINK_PERIOD_TICKS < BLINK_CLOSED_TICKS
    }

    /// Publish the read-only view for the rendering collaborator
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: PlayerPose {
                pos: self.player.pos,
                size: self.player.size,
                facing: self.player.facing,
                on_ground: self.player.on_ground,
                moving: self.player.moving(),
                blinking: self.blinking(),
            },
            treasures: self.treasures.clone(),
            particles: self.particles.clone(),
            score: self.score,
            won: self.won(),
            time_ticks: self.time_ticks,
        }
    }
}

/// Player pose as seen by the renderer (no internal timers)
#[derive(Debug, Clone, Serialize)]
pub struct PlayerPose {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: i8,
    pub on_ground: bool,
    pub moving: bool,
    pub blinking: bool,
}

/// Immutable per-tick publication for the rendering collaborator
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub player: PlayerPose,
    pub treasures: Vec<Treasure>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub won: bool,
    pub time_ticks: u64,
}
