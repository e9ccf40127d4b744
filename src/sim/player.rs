//! The player: movement, flashlight aim and the single-shot weapon

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::EntityId;
use crate::arena::{Arena, Viewport};
use crate::consts::*;
use crate::settings::{MovementBound, PlayerSettings};
use crate::{cos_between, normalize_or};

/// Weapon state machine
///
/// `Armed -> InFlight` on fire; `InFlight -> Armed` on a hit;
/// `InFlight -> Reloading` on a miss; `Reloading -> Armed` when the
/// timer runs out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeaponState {
    Armed,
    /// The one bullet is in flight
    InFlight,
    Reloading { remaining: f32 },
}

/// Parameters for a bullet the player just fired
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    /// Unit vector toward the last aim point
    pub aim_direction: Vec2,
    pub weapon: WeaponState,
    pub move_speed: f32,
    pub clamp_margin: f32,
    pub flashlight_range: f32,
    /// Half of the cone angle, degrees in (0, 180]
    pub flashlight_half_angle: f32,
    pub bullet_speed: f32,
    pub miss_reload_time: f32,
    /// Trigger level seen last tick (for edge detection)
    fire_was_down: bool,
}

impl Player {
    pub fn new(id: EntityId, settings: &PlayerSettings, miss_reload_time: f32) -> Self {
        let full_angle = if settings.flashlight_angle.is_finite() {
            settings.flashlight_angle.clamp(f32::EPSILON, 360.0)
        } else {
            FLASHLIGHT_ANGLE
        };
        Self {
            id,
            pos: Vec2::ZERO,
            aim_direction: Vec2::X,
            weapon: WeaponState::Armed,
            move_speed: settings.move_speed.max(0.0),
            clamp_margin: settings.clamp_margin.max(0.0),
            flashlight_range: settings.flashlight_range.max(0.0),
            flashlight_half_angle: full_angle * 0.5,
            bullet_speed: settings.bullet_speed.max(0.0),
            miss_reload_time: miss_reload_time.max(MIN_MISS_RELOAD_TIME),
            fire_was_down: false,
        }
    }

    pub fn has_bullet(&self) -> bool {
        self.weapon == WeaponState::Armed
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.weapon, WeaponState::Reloading { .. })
    }

    pub fn reload_remaining(&self) -> f32 {
        match self.weapon {
            WeaponState::Reloading { remaining } => remaining,
            _ => 0.0,
        }
    }

    /// 1.0 unless reloading after a miss, then rises from 0 toward 1
    pub fn reload_progress(&self) -> f32 {
        match self.weapon {
            WeaponState::Reloading { remaining } => {
                (1.0 - remaining / self.miss_reload_time).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Move along the (normalized) input direction, then clamp to the bound
    pub fn update_movement(
        &mut self,
        input: Vec2,
        dt: f32,
        bound: MovementBound,
        arena: &Arena,
        viewport: Option<&Viewport>,
    ) {
        let dir = input.normalize_or_zero();
        let mut pos = self.pos + dir * self.move_speed * dt;

        pos = match (bound, viewport) {
            (MovementBound::Arena, _) => arena.clamp(pos, self.clamp_margin),
            (MovementBound::Viewport, Some(view)) => view.clamp(pos, self.clamp_margin),
            // No view supplied this tick: skip clamping
            (MovementBound::Viewport, None) | (MovementBound::Unbounded, _) => pos,
        };
        self.pos = pos;
    }

    /// Point the flashlight at a world position.
    ///
    /// Keeps the previous direction when there is no aim point or it sits
    /// on the player.
    pub fn aim_at(&mut self, aim_point: Option<Vec2>) {
        if let Some(target) = aim_point {
            self.aim_direction = normalize_or(target - self.pos, self.aim_direction);
        }
    }

    /// Count down a miss reload. Returns true on the tick it completes.
    pub fn update_reload(&mut self, dt: f32) -> bool {
        if let WeaponState::Reloading { remaining } = self.weapon {
            let remaining = (remaining - dt).max(0.0);
            if remaining <= RELOAD_EPSILON {
                self.weapon = WeaponState::Armed;
                log::debug!("Player {} reloaded", self.id);
                return true;
            }
            self.weapon = WeaponState::Reloading { remaining };
        }
        false
    }

    /// Fire on the trigger's rising edge while armed.
    ///
    /// `fire_down` is the trigger level this tick; holding it never fires
    /// a second shot.
    pub fn try_fire(&mut self, fire_down: bool) -> Option<ShotRequest> {
        let pressed = fire_down && !self.fire_was_down;
        self.fire_was_down = fire_down;

        if !pressed || self.weapon != WeaponState::Armed {
            return None;
        }

        self.weapon = WeaponState::InFlight;
        Some(ShotRequest {
            position: self.pos,
            direction: self.aim_direction,
            speed: self.bullet_speed,
        })
    }

    /// Bullet struck an enemy: instant reload
    pub fn on_bullet_hit(&mut self) {
        self.weapon = WeaponState::Armed;
    }

    /// Bullet missed: start the slow reload
    pub fn on_bullet_miss(&mut self) {
        if self.weapon == WeaponState::InFlight {
            self.weapon = WeaponState::Reloading {
                remaining: self.miss_reload_time,
            };
        } else {
            log::debug!("Ignoring miss while {:?}", self.weapon);
        }
    }

    /// True if the point is within range and inside the cone (both inclusive)
    pub fn is_in_flashlight(&self, point: Vec2) -> bool {
        let to_target = point - self.pos;
        if to_target.length() > self.flashlight_range {
            return false;
        }
        // Compared as cosines: angle <= half angle
        let cos_half = self.flashlight_half_angle.to_radians().cos();
        cos_between(self.aim_direction, to_target) >= cos_half - CONE_COS_EPSILON
    }
}
