//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input polling or storage

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod match_state;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use bullet::Bullet;
pub use collision::{CircleColliders, CollisionQuery, circles_overlap};
pub use enemy::{Enemy, EnemyState};
pub use events::{BulletOutcome, EntityId, GameEvent};
pub use match_state::MatchController;
pub use player::{Player, ShotRequest, WeaponState};
pub use spawner::{SpawnScheduler, offscreen_spawn_position};
pub use state::GameState;
pub use tick::{TickInput, tick};
