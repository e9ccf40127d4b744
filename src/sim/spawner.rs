//! Enemy spawn scheduling
//!
//! The spawner fires whenever the clock passes `next_spawn_at`, places an
//! enemy according to the placement policy, then samples the next interval
//! from the preset's (possibly ramped) range.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::{Arena, ArenaSide, Viewport};
use crate::difficulty::DifficultyPreset;
use crate::settings::SpawnPlacement;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Absolute time of the next spawn
    pub next_spawn_at: f32,
    /// Time the scheduler started (ramp is measured from here)
    pub started_at: f32,
    pub placement: SpawnPlacement,
}

impl SpawnScheduler {
    /// Start at `now` and schedule the first spawn
    pub fn new<R: Rng + ?Sized>(
        now: f32,
        placement: SpawnPlacement,
        preset: &DifficultyPreset,
        rng: &mut R,
    ) -> Self {
        let mut scheduler = Self {
            next_spawn_at: now,
            started_at: now,
            placement,
        };
        scheduler.schedule_next(now, preset, rng);
        scheduler
    }

    pub fn elapsed_since_start(&self, now: f32) -> f32 {
        (now - self.started_at).max(0.0)
    }

    /// Sample the next spawn time from the current interval range
    pub fn schedule_next<R: Rng + ?Sized>(&mut self, now: f32, preset: &DifficultyPreset, rng: &mut R) {
        let (min, max) = preset.current_interval_range(self.elapsed_since_start(now));
        let interval = rng.random_range(min..=max);
        self.next_spawn_at = now + interval;
    }

    /// Spawn position if one is due at `now`; schedules the following spawn
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        preset: &DifficultyPreset,
        arena: &Arena,
        viewport: Option<&Viewport>,
        rng: &mut R,
    ) -> Option<Vec2> {
        if now < self.next_spawn_at {
            return None;
        }

        let pos = match (self.placement, viewport) {
            (SpawnPlacement::OutsideView { margin }, Some(view)) => {
                offscreen_spawn_position(arena, view, margin, rng)
                    .unwrap_or_else(|| arena.random_edge_spawn_position(rng))
            }
            // No view to stay out of: use the edge band
            _ => arena.random_edge_spawn_position(rng),
        };

        self.schedule_next(now, preset, rng);
        Some(pos)
    }
}

/// Point outside the view (plus margin) but inside the arena's spawn band.
///
/// A side qualifies only when the gap between the view edge and the band
/// edge is positive. Returns `None` when no side has room.
pub fn offscreen_spawn_position<R: Rng + ?Sized>(
    arena: &Arena,
    view: &Viewport,
    margin: f32,
    rng: &mut R,
) -> Option<Vec2> {
    let band = arena.spawn_half_extents();
    let (left, right, bottom, top) = (-band.x, band.x, -band.y, band.y);

    // Inner gap limits, kept inside the band even when the view is not
    let gap_left = (view.left() - margin).min(right);
    let gap_right = (view.right() + margin).max(left);
    let gap_bottom = (view.bottom() - margin).min(top);
    let gap_top = (view.top() + margin).max(bottom);

    let mut sides = [ArenaSide::Left; 4];
    let mut count = 0;
    for (side, has_room) in [
        (ArenaSide::Left, gap_left > left),
        (ArenaSide::Right, gap_right < right),
        (ArenaSide::Bottom, gap_bottom > bottom),
        (ArenaSide::Top, gap_top < top),
    ] {
        if has_room {
            sides[count] = side;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }

    let side = sides[rng.random_range(0..count)];
    let pos = match side {
        ArenaSide::Left => Vec2::new(
            rng.random_range(left..=gap_left),
            rng.random_range(bottom..=top),
        ),
        ArenaSide::Right => Vec2::new(
            rng.random_range(gap_right..=right),
            rng.random_range(bottom..=top),
        ),
        ArenaSide::Bottom => Vec2::new(
            rng.random_range(left..=right),
            rng.random_range(bottom..=gap_bottom),
        ),
        ArenaSide::Top => Vec2::new(
            rng.random_range(left..=right),
            rng.random_range(gap_top..=top),
        ),
    };
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{DifficultySettings, DifficultyTier};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn constant_preset(interval: f32) -> DifficultyPreset {
        DifficultyPreset {
            min_spawn_interval: interval,
            max_spawn_interval: interval,
            ramp_enabled: false,
            ..DifficultyPreset::default()
        }
    }

    #[test]
    fn test_spawns_on_schedule() {
        let arena = Arena::default();
        let preset = constant_preset(2.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = SpawnScheduler::new(0.0, SpawnPlacement::ArenaEdge, &preset, &mut rng);
        assert_eq!(spawner.next_spawn_at, 2.0);

        assert!(spawner.update(1.9, &preset, &arena, None, &mut rng).is_none());
        let pos = spawner.update(2.0, &preset, &arena, None, &mut rng).unwrap();
        assert!(arena.is_within_spawn_band(pos));
        assert_eq!(spawner.next_spawn_at, 4.0);
    }

    #[test]
    fn test_intervals_follow_ramp() {
        let preset = DifficultySettings::recommended().preset_for(DifficultyTier::Extreme);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawner = SpawnScheduler::new(0.0, SpawnPlacement::ArenaEdge, &preset, &mut rng);
        let first = spawner.next_spawn_at;
        assert!((1.0..=2.0).contains(&first));

        // Past the ramp the interval comes from the end range
        spawner.schedule_next(200.0, &preset, &mut rng);
        let interval = spawner.next_spawn_at - 200.0;
        assert!((0.2 - 1e-4..=0.5 + 1e-4).contains(&interval));
    }

    #[test]
    fn test_offscreen_spawn_outside_view() {
        let arena = Arena::new(40.0, 30.0, 1.0, 0.5);
        let view = Viewport::new(Vec2::ZERO, Vec2::new(8.0, 5.0));
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let pos = offscreen_spawn_position(&arena, &view, 2.0, &mut rng).unwrap();
            assert!(arena.is_within_spawn_band(pos));
            assert!(view.is_outside(pos, 2.0) || on_margin(pos, &view, 2.0));
        }
    }

    fn on_margin(pos: Vec2, view: &Viewport, margin: f32) -> bool {
        (pos.x.abs() - (view.half_extents.x + margin)).abs() < 1e-4
            || (pos.y.abs() - (view.half_extents.y + margin)).abs() < 1e-4
    }

    #[test]
    fn test_offscreen_only_qualifying_sides() {
        // View covers the arena horizontally, so only top/bottom qualify
        let arena = Arena::new(20.0, 40.0, 1.0, 0.5);
        let view = Viewport::new(Vec2::ZERO, Vec2::new(12.0, 5.0));
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let pos = offscreen_spawn_position(&arena, &view, 2.0, &mut rng).unwrap();
            assert!(pos.y.abs() >= 7.0 - 1e-4);
        }
    }

    #[test]
    fn test_offscreen_view_past_arena_stays_in_band() {
        let arena = Arena::default();
        let view = Viewport::new(Vec2::new(30.0, 0.0), Vec2::new(2.0, 2.0));
        let mut rng = Pcg32::seed_from_u64(17);
        for _ in 0..1000 {
            let pos = offscreen_spawn_position(&arena, &view, 2.0, &mut rng).unwrap();
            assert!(pos.x.abs() <= 9.5 && pos.y.abs() <= 7.0, "{:?}", pos);
        }

        // Negative margin pulls the gap inside the view but never past the band
        let view = Viewport::new(Vec2::new(0.0, -12.0), Vec2::new(3.0, 3.0));
        for _ in 0..1000 {
            let pos = offscreen_spawn_position(&arena, &view, -4.0, &mut rng).unwrap();
            assert!(pos.x.abs() <= 9.5 && pos.y.abs() <= 7.0, "{:?}", pos);
        }
    }

    #[test]
    fn test_offscreen_falls_back_to_edge() {
        let arena = Arena::default();
        // View larger than the arena: no side has room
        let view = Viewport::new(Vec2::ZERO, Vec2::new(30.0, 30.0));
        let mut rng = Pcg32::seed_from_u64(9);
        assert!(offscreen_spawn_position(&arena, &view, 2.0, &mut rng).is_none());

        let preset = constant_preset(1.0);
        let placement = SpawnPlacement::OutsideView { margin: 2.0 };
        let mut spawner = SpawnScheduler::new(0.0, placement, &preset, &mut rng);
        let pos = spawner
            .update(1.0, &preset, &arena, Some(&view), &mut rng)
            .unwrap();
        let band = arena.spawn_half_extents();
        assert!(pos.x.abs() == band.x || pos.y.abs() == band.y);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let arena = Arena::default();
        let preset = constant_preset(0.5);
        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = SpawnScheduler::new(0.0, SpawnPlacement::ArenaEdge, &preset, &mut rng);
            (1..=10)
                .filter_map(|i| spawner.update(i as f32 * 0.5, &preset, &arena, None, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_eq!(run(42).len(), 10);
    }
}
