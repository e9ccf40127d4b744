//! Arena geometry
//!
//! The arena is an axis-aligned rectangle centered on the origin. Enemies
//! spawn on a band inset from its edges, and the player is clamped inside it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the four arena edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArenaSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl ArenaSide {
    pub const ALL: [ArenaSide; 4] = [
        ArenaSide::Top,
        ArenaSide::Bottom,
        ArenaSide::Left,
        ArenaSide::Right,
    ];
}

/// Static arena bounds (immutable for the whole match)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    width: f32,
    height: f32,
    border_thickness: f32,
    spawn_inset: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            ARENA_WIDTH,
            ARENA_HEIGHT,
            ARENA_BORDER_THICKNESS,
            ARENA_SPAWN_INSET,
        )
    }
}

impl Arena {
    /// Build an arena, correcting out-of-range values.
    ///
    /// Width and height are raised to `MIN_ARENA_EXTENT`, and the spawn inset
    /// is clamped so the spawn band never collapses past the center.
    pub fn new(width: f32, height: f32, border_thickness: f32, spawn_inset: f32) -> Self {
        let w = if width.is_finite() { width.max(MIN_ARENA_EXTENT) } else { ARENA_WIDTH };
        let h = if height.is_finite() { height.max(MIN_ARENA_EXTENT) } else { ARENA_HEIGHT };
        let max_inset = (w / 2.0).min(h / 2.0) * MAX_SPAWN_INSET_FRACTION;
        let inset = if spawn_inset.is_finite() {
            spawn_inset.clamp(0.0, max_inset)
        } else {
            ARENA_SPAWN_INSET.min(max_inset)
        };
        if inset != spawn_inset || w != width || h != height {
            log::warn!(
                "Arena corrected: {}x{} inset {} -> {}x{} inset {}",
                width, height, spawn_inset, w, h, inset
            );
        }
        Self {
            width: w,
            height: h,
            border_thickness: border_thickness.max(0.0),
            spawn_inset: inset,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn border_thickness(&self) -> f32 {
        self.border_thickness
    }

    pub fn spawn_inset(&self) -> f32 {
        self.spawn_inset
    }

    /// Inner half-extents (width/2, height/2)
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Half-extents of the enemy spawn band
    #[inline]
    pub fn spawn_half_extents(&self) -> Vec2 {
        self.half_extents() - Vec2::splat(self.spawn_inset)
    }

    /// Pick a side uniformly and a point along that side's spawn band
    pub fn random_edge_spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> (ArenaSide, Vec2) {
        let half = self.spawn_half_extents();
        let side = ArenaSide::ALL[rng.random_range(0..4)];
        let pos = match side {
            ArenaSide::Top => Vec2::new(rng.random_range(-half.x..=half.x), half.y),
            ArenaSide::Bottom => Vec2::new(rng.random_range(-half.x..=half.x), -half.y),
            ArenaSide::Left => Vec2::new(-half.x, rng.random_range(-half.y..=half.y)),
            ArenaSide::Right => Vec2::new(half.x, rng.random_range(-half.y..=half.y)),
        };
        (side, pos)
    }

    /// Random spawn position on the inset edge band
    pub fn random_edge_spawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        self.random_edge_spawn(rng).1
    }

    /// True iff the point is strictly inside the arena (boundary is outside)
    pub fn is_inside(&self, pos: Vec2) -> bool {
        let half = self.half_extents();
        pos.x > -half.x && pos.x < half.x && pos.y > -half.y && pos.y < half.y
    }

    /// True iff the point lies within the spawn band's extents (inclusive)
    pub fn is_within_spawn_band(&self, pos: Vec2) -> bool {
        let half = self.spawn_half_extents();
        pos.x.abs() <= half.x && pos.y.abs() <= half.y
    }

    /// Clamp a point to [-(half - margin), half - margin] on each axis
    pub fn clamp(&self, pos: Vec2, margin: f32) -> Vec2 {
        let limit = (self.half_extents() - Vec2::splat(margin)).max(Vec2::ZERO);
        pos.clamp(-limit, limit)
    }
}

/// Axis-aligned view rectangle supplied by the camera collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Viewport {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// View of an orthographic camera (`ortho_size` is the half height)
    pub fn from_orthographic(center: Vec2, ortho_size: f32, aspect: f32) -> Self {
        Self::new(center, Vec2::new(ortho_size * aspect, ortho_size))
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// True if the point lies more than `margin` outside the view
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < self.left() - margin
            || pos.x > self.right() + margin
            || pos.y < self.bottom() - margin
            || pos.y > self.top() + margin
    }

    /// Clamp a point inside the view, shrunk by `margin` on each side
    pub fn clamp(&self, pos: Vec2, margin: f32) -> Vec2 {
        let limit = (self.half_extents - Vec2::splat(margin)).max(Vec2::ZERO);
        pos.clamp(self.center - limit, self.center + limit)
    }
}
