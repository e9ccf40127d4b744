//! Events emitted by the simulation for the presentation layer.
//!
//! The core never renders, plays sounds or touches storage. Collaborators
//! drain these after each tick and realize them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyTier;

pub type EntityId = u32;

/// How a bullet's flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOutcome {
    /// Struck a live enemy (instant reload)
    Hit,
    /// Wall, bounds or lifetime (slow reload)
    Miss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ScoreChanged { score: u32 },
    NewBestScore { tier: DifficultyTier, score: u32 },
    GameOver { final_score: u32 },
    /// The spawner placed a new enemy
    EnemySpawnRequested { id: EntityId, position: Vec2 },
    BulletFired {
        id: EntityId,
        position: Vec2,
        direction: Vec2,
        speed: f32,
    },
    EnemyKilled { id: EntityId },
    BulletResolved { id: EntityId, outcome: BulletOutcome },
    /// Entity removed from the world at the end of the tick
    EntityDestroyed { id: EntityId },
}
