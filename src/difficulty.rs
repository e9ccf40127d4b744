//! Difficulty tiers and presets
//!
//! Each tier maps to one preset controlling the miss-reload time, the enemy
//! speed multiplier and the spawn interval ramp. The active preset is chosen
//! once at match start and never changes during the match.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty tier selected at match start.
///
/// Deserializes leniently from a name (any case) or a stored index; anything
/// unrecognized becomes Easy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "TierRepr")]
pub enum DifficultyTier {
    #[default]
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
            DifficultyTier::Extreme => "Extreme",
        }
    }

    /// Parse a tier name; unknown names map to Easy
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "medium" | "med" => DifficultyTier::Medium,
            "hard" => DifficultyTier::Hard,
            "extreme" => DifficultyTier::Extreme,
            _ => DifficultyTier::Easy,
        }
    }

    /// Tier from its stored index; out-of-range maps to Easy
    pub fn from_index(index: i32) -> Self {
        match index {
            1 => DifficultyTier::Medium,
            2 => DifficultyTier::Hard,
            3 => DifficultyTier::Extreme,
            _ => DifficultyTier::Easy,
        }
    }
}

/// Serialized forms accepted for a tier
#[derive(Deserialize)]
#[serde(untagged)]
enum TierRepr {
    Index(i64),
    Name(String),
}

impl From<TierRepr> for DifficultyTier {
    fn from(repr: TierRepr) -> Self {
        match repr {
            TierRepr::Index(index) => i32::try_from(index)
                .map(DifficultyTier::from_index)
                .unwrap_or_default(),
            TierRepr::Name(name) => DifficultyTier::from_name(&name),
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyPreset {
    /// Seconds to reload after missing a shot
    pub miss_reload_time: f32,
    /// Multiplier applied to each enemy's chase speed
    pub enemy_speed_multiplier: f32,
    /// Spawn interval range at match start
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    /// Shrink the spawn interval over time
    pub ramp_enabled: bool,
    /// Seconds until the end intervals are reached
    pub ramp_duration: f32,
    /// Spawn interval range once the ramp completes
    pub min_spawn_interval_end: f32,
    pub max_spawn_interval_end: f32,
}

impl Default for DifficultyPreset {
    fn default() -> Self {
        Self {
            miss_reload_time: 3.0,
            enemy_speed_multiplier: 1.0,
            min_spawn_interval: 2.0,
            max_spawn_interval: 5.0,
            ramp_enabled: true,
            ramp_duration: 120.0,
            min_spawn_interval_end: 0.6,
            max_spawn_interval_end: 1.5,
        }
    }
}

impl DifficultyPreset {
    /// Copy with every value forced into its valid range.
    ///
    /// Floors the reload time and speed multiplier, keeps intervals positive
    /// and swaps any min/max pair given in the wrong order.
    pub fn sanitized(&self) -> Self {
        let floor = |v: f32, min: f32| if v.is_finite() { v.max(min) } else { min };
        let ordered = |a: f32, b: f32| {
            let a = floor(a, MIN_SPAWN_INTERVAL);
            let b = floor(b, MIN_SPAWN_INTERVAL);
            if a <= b { (a, b) } else { (b, a) }
        };

        let (min_start, max_start) = ordered(self.min_spawn_interval, self.max_spawn_interval);
        let (min_end, max_end) = ordered(self.min_spawn_interval_end, self.max_spawn_interval_end);

        let fixed = Self {
            miss_reload_time: floor(self.miss_reload_time, MIN_MISS_RELOAD_TIME),
            enemy_speed_multiplier: floor(self.enemy_speed_multiplier, MIN_ENEMY_SPEED_MULTIPLIER),
            min_spawn_interval: min_start,
            max_spawn_interval: max_start,
            ramp_enabled: self.ramp_enabled,
            ramp_duration: floor(self.ramp_duration, 0.0),
            min_spawn_interval_end: min_end,
            max_spawn_interval_end: max_end,
        };
        if fixed != *self {
            log::warn!("Difficulty preset corrected: {:?} -> {:?}", self, fixed);
        }
        fixed
    }

    /// Spawn interval range after `elapsed` seconds of play.
    ///
    /// Without a ramp (or with a zero ramp duration) the start range is
    /// returned unchanged. Otherwise each bound is interpolated toward its
    /// end value; the resulting max is never below the resulting min.
    pub fn current_interval_range(&self, elapsed: f32) -> (f32, f32) {
        let mut min = self.min_spawn_interval;
        let mut max = self.max_spawn_interval;

        if self.ramp_enabled && self.ramp_duration > 0.0 {
            let t = (elapsed / self.ramp_duration).clamp(0.0, 1.0);
            min = lerp(self.min_spawn_interval, self.min_spawn_interval_end, t);
            max = lerp(self.max_spawn_interval, self.max_spawn_interval_end, t);
        }

        if max < min {
            max = min;
        }
        (min, max)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    // Exact at both ends so the ramp lands on the end bound
    if t >= 1.0 { b } else { a + (b - a) * t }
}

/// The four presets, one per tier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    pub easy: DifficultyPreset,
    pub medium: DifficultyPreset,
    pub hard: DifficultyPreset,
    pub extreme: DifficultyPreset,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self::recommended()
    }
}

impl DifficultySettings {
    /// Recommended tuning: easier tiers reload faster and ramp slower,
    /// and every tier ramps toward the same 0.2-0.5s end range.
    pub fn recommended() -> Self {
        let preset = |miss_reload_time, enemy_speed_multiplier, min, max, ramp_duration| {
            DifficultyPreset {
                miss_reload_time,
                enemy_speed_multiplier,
                min_spawn_interval: min,
                max_spawn_interval: max,
                ramp_enabled: true,
                ramp_duration,
                min_spawn_interval_end: 0.2,
                max_spawn_interval_end: 0.5,
            }
        };

        Self {
            easy: preset(0.5, 0.9, 3.0, 3.0, 180.0),
            medium: preset(1.0, 1.0, 2.0, 3.5, 140.0),
            hard: preset(1.5, 1.15, 1.5, 2.5, 110.0),
            extreme: preset(2.0, 1.3, 1.0, 2.0, 90.0),
        }
    }

    /// Preset for a tier
    pub fn preset_for(&self, tier: DifficultyTier) -> DifficultyPreset {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Medium => self.medium,
            DifficultyTier::Hard => self.hard,
            DifficultyTier::Extreme => self.extreme,
        }
    }

    /// Preset for a tier given by name; unknown names use Easy
    pub fn preset_for_name(&self, name: &str) -> DifficultyPreset {
        self.preset_for(DifficultyTier::from_name(name))
    }
}
