//! Enemies chase the player unless the flashlight holds them frozen

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::EntityId;
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Chasing,
    Frozen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub chase_speed: f32,
    /// Freeze time left; re-armed every tick the enemy is lit
    pub frozen_remaining: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(id: EntityId, pos: Vec2, chase_speed: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            chase_speed: chase_speed.max(0.0),
            frozen_remaining: 0.0,
            alive: true,
        }
    }

    pub fn state(&self) -> EnemyState {
        if self.frozen_remaining > 0.0 {
            EnemyState::Frozen
        } else {
            EnemyState::Chasing
        }
    }

    /// Refresh the freeze window from the flashlight and move.
    ///
    /// A lit enemy stays frozen for as long as it is lit, plus
    /// `freeze_time` afterwards. Unlit enemies head straight for the player.
    pub fn update(&mut self, player: &Player, speed_multiplier: f32, freeze_time: f32, dt: f32) {
        if !self.alive {
            return;
        }

        self.frozen_remaining = (self.frozen_remaining - dt).max(0.0);
        if player.is_in_flashlight(self.pos) {
            // Lit enemies are frozen even when the linger time is zero
            self.frozen_remaining = self.frozen_remaining.max(freeze_time).max(f32::MIN_POSITIVE);
        }

        self.vel = match self.state() {
            EnemyState::Frozen => Vec2::ZERO,
            EnemyState::Chasing => {
                (player.pos - self.pos).normalize_or_zero() * self.chase_speed * speed_multiplier
            }
        };
        self.pos += self.vel * dt;
    }

    /// Zero velocity (match over)
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Kill the enemy. Returns false if it was already dead.
    pub fn die(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.vel = Vec2::ZERO;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PlayerSettings;

    fn player_facing_right() -> Player {
        let mut player = Player::new(1, &PlayerSettings::default(), 1.0);
        player.aim_at(Some(Vec2::new(1.0, 0.0)));
        player
    }

    #[test]
    fn test_unlit_enemy_chases() {
        let player = player_facing_right();
        let mut enemy = Enemy::new(2, Vec2::new(0.0, 5.0), 3.0);
        enemy.update(&player, 1.0, 0.25, 0.1);
        assert_eq!(enemy.state(), EnemyState::Chasing);
        assert!((enemy.vel - Vec2::new(0.0, -3.0)).length() < 1e-5);
        assert!((enemy.pos.y - 4.7).abs() < 1e-5);
    }

    #[test]
    fn test_speed_multiplier_applied() {
        let player = player_facing_right();
        let mut enemy = Enemy::new(2, Vec2::new(-5.0, 0.0), 3.0);
        enemy.update(&player, 1.3, 0.25, 0.1);
        assert!((enemy.vel.length() - 3.9).abs() < 1e-5);
    }

    #[test]
    fn test_lit_enemy_frozen_while_lit() {
        let player = player_facing_right();
        let mut enemy = Enemy::new(2, Vec2::new(5.0, 0.0), 3.0);
        // Freeze time shorter than a tick still holds while lit
        for _ in 0..50 {
            enemy.update(&player, 1.0, 0.01, 0.1);
            assert_eq!(enemy.state(), EnemyState::Frozen);
            assert_eq!(enemy.vel, Vec2::ZERO);
        }
        assert_eq!(enemy.pos, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_freeze_lingers_after_light_leaves() {
        let mut player = player_facing_right();
        let mut enemy = Enemy::new(2, Vec2::new(5.0, 0.0), 3.0);
        enemy.update(&player, 1.0, 0.25, 0.1);
        assert_eq!(enemy.state(), EnemyState::Frozen);

        // Turn the light away
        player.aim_at(Some(Vec2::new(-1.0, 0.0)));
        enemy.update(&player, 1.0, 0.25, 0.1);
        assert_eq!(enemy.state(), EnemyState::Frozen);
        enemy.update(&player, 1.0, 0.25, 0.1);
        assert_eq!(enemy.state(), EnemyState::Frozen);
        enemy.update(&player, 1.0, 0.25, 0.1);
        assert_eq!(enemy.state(), EnemyState::Chasing);
        assert!(enemy.vel.x < 0.0);
    }

    #[test]
    fn test_die_once() {
        let mut enemy = Enemy::new(2, Vec2::ZERO, 3.0);
        assert!(enemy.die());
        assert!(!enemy.alive);
        assert!(!enemy.die());
    }
}
