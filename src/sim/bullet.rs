//! Bullet flight and miss conditions
//!
//! A bullet flies in a straight line and resolves exactly once, either as a
//! hit on an enemy or as a miss. Enemy hits are tested before any miss
//! condition in the same tick. Resolution itself lives in `tick`, since it
//! touches the player, the enemies and the score.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::{BulletOutcome, EntityId};
use crate::arena::{Arena, Viewport};
use crate::settings::BulletSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    /// Player that fired it (receives the hit/miss callback)
    pub owner: EntityId,
    pub pos: Vec2,
    /// Unit direction, fixed at creation
    pub direction: Vec2,
    pub speed: f32,
    /// Seconds in flight
    pub age: f32,
    /// Set once the bullet has produced its outcome
    pub outcome: Option<BulletOutcome>,
}

impl Bullet {
    pub fn new(id: EntityId, owner: EntityId, pos: Vec2, direction: Vec2, speed: f32) -> Self {
        Self {
            id,
            owner,
            pos,
            direction: direction.normalize_or_zero(),
            speed,
            age: 0.0,
            outcome: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Advance along the flight line
    pub fn advance(&mut self, dt: f32) {
        if self.is_resolved() {
            return;
        }
        self.pos += self.direction * self.speed * dt;
        self.age += dt;
    }

    /// Record the outcome. Returns false if the bullet was already resolved.
    pub fn resolve(&mut self, outcome: BulletOutcome) -> bool {
        if self.is_resolved() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }

    /// Miss conditions other than wall contact: leaving the view, leaving
    /// the arena, or running out of lifetime. Each is an independent policy.
    pub fn out_of_play(
        &self,
        settings: &BulletSettings,
        arena: &Arena,
        viewport: Option<&Viewport>,
    ) -> bool {
        if settings.miss_when_offscreen
            && viewport.is_some_and(|view| view.is_outside(self.pos, settings.offscreen_margin))
        {
            return true;
        }
        if settings.miss_outside_arena && !arena.is_inside(self.pos) {
            return true;
        }
        settings.max_lifetime > 0.0 && self.age >= settings.max_lifetime
    }
}
