//! Treasure Isle - a tiny side-scrolling island platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, pickups, particles)
//! - `audio`: Procedural Web Audio (one-shot effects + looping background music)
//! - `settings`: Audio preferences persisted in LocalStorage

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game tuning constants
///
/// The sim is integrated per tick (one tick per animation frame, nominally
/// 60 Hz), so speeds and accelerations below are in pixels per tick.
pub mod consts {
    /// World dimensions in pixels
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 400.0;

    /// Y coordinate of the ground line (top of the sand)
    pub const GROUND_Y: f32 = 340.0;

    /// Player spawn and hitbox
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 280.0;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 44.0;

    /// Horizontal run speed while a direction key is held
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Upward impulse applied on jump (vy is set to the negative of this)
    pub const JUMP_POWER: f32 = 12.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;
    /// Per-tick horizontal velocity multiplier when no key is held.
    /// Decays asymptotically; vx is never snapped to exactly zero.
    pub const FRICTION: f32 = 0.8;

    /// Distance from player center within which a treasure is collected
    pub const PICKUP_RADIUS: f32 = 20.0;

    /// Particle life drain per tick (life starts at 1.0)
    pub const PARTICLE_DECAY: f32 = 0.02;
    /// Downward acceleration on particles, much lighter than the player's
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    /// Burst sizes
    pub const JUMP_BURST: usize = 5;
    pub const COLLECT_BURST: usize = 10;

    /// Grounded movement ticks between footstep effect events
    pub const STEP_INTERVAL_TICKS: u32 = 20;

    /// Eye-blink animation: closed for the first ticks of each period
    pub const BLINK_PERIOD_TICKS: u64 = 180;
    pub const BLINK_CLOSED_TICKS: u64 = 10;

    /// Background music tempo
    pub const MUSIC_TEMPO_BPM: f32 = 120.0;
    /// How far ahead of the audio clock the sequencer schedules notes (seconds)
    pub const MUSIC_LOOKAHEAD_SECS: f64 = 0.2;
}
