//! Match settings
//!
//! Everything a designer can tune for one match. Loaded from JSON (missing
//! fields keep their defaults) and corrected at the point of use, never
//! rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::consts::*;
use crate::difficulty::{DifficultyPreset, DifficultySettings, DifficultyTier};
use crate::error::Error;

/// Where enemies appear when the spawner fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SpawnPlacement {
    /// On the arena's inset edge band
    ArenaEdge,
    /// Outside the current view (plus margin) but inside the arena
    OutsideView { margin: f32 },
}

impl Default for SpawnPlacement {
    fn default() -> Self {
        SpawnPlacement::OutsideView {
            margin: SPAWN_OFFSCREEN_MARGIN,
        }
    }
}

/// What the player's position is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementBound {
    #[default]
    Arena,
    /// The viewport supplied with each tick's input
    Viewport,
    Unbounded,
}

/// Arena dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
    pub border_thickness: f32,
    pub spawn_inset: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            border_thickness: ARENA_BORDER_THICKNESS,
            spawn_inset: ARENA_SPAWN_INSET,
        }
    }
}

impl ArenaSettings {
    pub fn build(&self) -> Arena {
        Arena::new(self.width, self.height, self.border_thickness, self.spawn_inset)
    }
}

/// Player tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub move_speed: f32,
    /// Margin kept from the movement bound's edges
    pub clamp_margin: f32,
    pub flashlight_range: f32,
    /// Full cone angle in degrees
    pub flashlight_angle: f32,
    pub bullet_speed: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_MOVE_SPEED,
            clamp_margin: PLAYER_CLAMP_MARGIN,
            flashlight_range: FLASHLIGHT_RANGE,
            flashlight_angle: FLASHLIGHT_ANGLE,
            bullet_speed: BULLET_SPEED,
        }
    }
}

/// Enemy tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub chase_speed: f32,
    /// Seconds an enemy stays frozen after the light leaves it
    pub flashlight_freeze_time: f32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            chase_speed: ENEMY_CHASE_SPEED,
            flashlight_freeze_time: FLASHLIGHT_FREEZE_TIME,
        }
    }
}

/// Conditions under which an in-flight bullet counts as a miss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    /// Miss when the bullet leaves the view by more than `offscreen_margin`
    pub miss_when_offscreen: bool,
    pub offscreen_margin: f32,
    /// Miss when the bullet leaves the arena
    pub miss_outside_arena: bool,
    /// Miss after this many seconds in flight (0 disables)
    pub max_lifetime: f32,
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            miss_when_offscreen: true,
            offscreen_margin: BULLET_OFFSCREEN_MARGIN,
            miss_outside_arena: true,
            max_lifetime: BULLET_MAX_LIFETIME,
        }
    }
}

/// Complete configuration for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tier: DifficultyTier,

    // === World ===
    pub arena: ArenaSettings,
    pub movement_bound: MovementBound,
    pub spawn_placement: SpawnPlacement,

    // === Entities ===
    pub player: PlayerSettings,
    pub enemy: EnemySettings,
    pub bullet: BulletSettings,

    // === Difficulty ===
    pub difficulty: DifficultySettings,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            tier: DifficultyTier::Easy,

            arena: ArenaSettings::default(),
            movement_bound: MovementBound::Arena,
            spawn_placement: SpawnPlacement::default(),

            player: PlayerSettings::default(),
            enemy: EnemySettings::default(),
            bullet: BulletSettings::default(),

            difficulty: DifficultySettings::recommended(),
        }
    }
}

impl MatchSettings {
    /// Default settings for a tier and seed
    pub fn for_tier(tier: DifficultyTier, seed: u64) -> Self {
        Self {
            seed,
            tier,
            ..Self::default()
        }
    }

    /// The active preset, corrected into its valid range
    pub fn active_preset(&self) -> DifficultyPreset {
        self.difficulty.preset_for(self.tier).sanitized()
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded match settings from {}", path.display());
        Ok(settings)
    }
}
