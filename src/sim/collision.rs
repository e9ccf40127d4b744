//! Contact queries
//!
//! Overlap detection belongs to the host's physics. The simulation asks a
//! `CollisionQuery` once per pair it cares about and consumes the answers
//! synchronously within the tick. `CircleColliders` is a self-contained
//! implementation for headless runs and tests.

use glam::Vec2;

use super::bullet::Bullet;
use super::enemy::Enemy;
use super::player::Player;
use crate::arena::Arena;
use crate::consts::*;

pub trait CollisionQuery {
    /// Enemy body touches the player
    fn enemy_touches_player(&self, enemy: &Enemy, player: &Player) -> bool;
    /// Bullet overlaps a live enemy
    fn bullet_hits_enemy(&self, bullet: &Bullet, enemy: &Enemy) -> bool;
    /// Bullet struck one of the arena's walls
    fn bullet_hits_wall(&self, bullet: &Bullet, arena: &Arena) -> bool;
}

/// Circle colliders for every body; walls are the border strips just
/// outside the arena's inner rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleColliders {
    pub player_radius: f32,
    pub enemy_radius: f32,
    pub bullet_radius: f32,
}

impl Default for CircleColliders {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            enemy_radius: ENEMY_RADIUS,
            bullet_radius: BULLET_RADIUS,
        }
    }
}

impl CollisionQuery for CircleColliders {
    fn enemy_touches_player(&self, enemy: &Enemy, player: &Player) -> bool {
        circles_overlap(enemy.pos, self.enemy_radius, player.pos, self.player_radius)
    }

    fn bullet_hits_enemy(&self, bullet: &Bullet, enemy: &Enemy) -> bool {
        circles_overlap(bullet.pos, self.bullet_radius, enemy.pos, self.enemy_radius)
    }

    fn bullet_hits_wall(&self, bullet: &Bullet, arena: &Arena) -> bool {
        circle_touches_walls(bullet.pos, self.bullet_radius, arena)
    }
}

/// Two circles overlap (touching counts)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}

/// Circle reaches into the wall band around the arena
pub fn circle_touches_walls(pos: Vec2, radius: f32, arena: &Arena) -> bool {
    let half = arena.half_extents();
    let outer = half + Vec2::splat(arena.border_thickness());
    let reach = pos.abs() + Vec2::splat(radius);
    let inside_outer = pos.x.abs() - radius <= outer.x && pos.y.abs() - radius <= outer.y;
    inside_outer && (reach.x >= half.x || reach.y >= half.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 0.5, Vec2::new(1.0, 0.0), 0.5));
        assert!(!circles_overlap(Vec2::ZERO, 0.5, Vec2::new(1.01, 0.0), 0.5));
    }

    #[test]
    fn test_wall_band() {
        let arena = Arena::new(20.0, 15.0, 1.0, 0.5);
        assert!(!circle_touches_walls(Vec2::new(9.0, 0.0), 0.1, &arena));
        assert!(circle_touches_walls(Vec2::new(9.95, 0.0), 0.1, &arena));
        assert!(circle_touches_walls(Vec2::new(0.0, -8.0), 0.1, &arena));
        // Far past the border: no wall contact
        assert!(!circle_touches_walls(Vec2::new(30.0, 0.0), 0.1, &arena));
    }
}
