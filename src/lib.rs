//! Lantern Arena - a top-down flashlight survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, enemies, bullets, spawning, scoring)
//! - `arena`: Arena bounds, spawn band and viewport geometry
//! - `difficulty`: Difficulty tiers and their spawn/reload presets
//! - `settings`: Per-match configuration
//! - `highscores`: Best score persistence per difficulty tier
//! - `clock`: Fixed timestep accumulator

pub mod arena;
pub mod clock;
pub mod difficulty;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use arena::{Arena, ArenaSide, Viewport};
pub use difficulty::{DifficultyPreset, DifficultySettings, DifficultyTier};
pub use error::Error;
pub use highscores::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
pub use settings::MatchSettings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena defaults (world units)
    pub const ARENA_WIDTH: f32 = 20.0;
    pub const ARENA_HEIGHT: f32 = 15.0;
    pub const ARENA_BORDER_THICKNESS: f32 = 1.0;
    pub const ARENA_SPAWN_INSET: f32 = 0.5;
    /// Smallest width/height an arena may have
    pub const MIN_ARENA_EXTENT: f32 = 1.0;
    /// Largest spawn inset as a fraction of the smaller half-extent
    pub const MAX_SPAWN_INSET_FRACTION: f32 = 0.9;

    /// Player defaults
    pub const PLAYER_MOVE_SPEED: f32 = 5.0;
    pub const PLAYER_CLAMP_MARGIN: f32 = 0.5;
    pub const PLAYER_RADIUS: f32 = 0.5;
    pub const FLASHLIGHT_RANGE: f32 = 8.0;
    /// Full cone angle in degrees (the half angle is used for containment)
    pub const FLASHLIGHT_ANGLE: f32 = 45.0;
    /// Cosine slack so a target exactly on the cone edge counts as lit
    pub const CONE_COS_EPSILON: f32 = 4.0 * f32::EPSILON;
    pub const BULLET_SPEED: f32 = 15.0;
    pub const BULLET_RADIUS: f32 = 0.1;
    /// Remaining reload time below this counts as finished
    pub const RELOAD_EPSILON: f32 = 1e-4;

    /// Enemy defaults
    pub const ENEMY_CHASE_SPEED: f32 = 3.0;
    pub const ENEMY_RADIUS: f32 = 0.5;
    /// Seconds an enemy stays frozen after leaving the flashlight cone
    pub const FLASHLIGHT_FREEZE_TIME: f32 = 0.25;

    /// Bullet miss policy defaults
    pub const BULLET_OFFSCREEN_MARGIN: f32 = 1.0;
    pub const BULLET_MAX_LIFETIME: f32 = 4.0;

    /// Spawner defaults
    pub const SPAWN_OFFSCREEN_MARGIN: f32 = 2.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.05;

    /// Difficulty runtime floors
    pub const MIN_ENEMY_SPEED_MULTIPLIER: f32 = 0.01;
    pub const MIN_MISS_RELOAD_TIME: f32 = 0.05;
}

/// Cosine of the unsigned angle between two vectors.
///
/// Returns 1 (zero angle) when either vector has zero length.
#[inline]
pub fn cos_between(a: Vec2, b: Vec2) -> f32 {
    let denom = a.length() * b.length();
    if denom <= f32::EPSILON {
        return 1.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0)
}

/// Normalize a vector, or fall back when it is degenerate
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}
