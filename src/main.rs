//! Lantern Arena headless runner
//!
//! Plays one match with a simple autopilot and reports the result. Rendering
//! and real input belong to a host; this binary only drives the simulation.
//!
//! Usage: `lantern-arena [settings.json] [best_scores.json]`

use lantern_arena::clock::FixedStepClock;
use lantern_arena::highscores::{JsonFileScoreStore, ScoreStore, persist_new_best};
use lantern_arena::sim::{CircleColliders, GameEvent, GameState, TickInput, tick};
use lantern_arena::{MatchSettings, Viewport};

/// Longest demo match in simulated seconds
const MAX_MATCH_SECONDS: f32 = 180.0;
/// Camera half height and aspect for the follow view
const CAMERA_ORTHO_SIZE: f32 = 5.0;
const CAMERA_ASPECT: f32 = 16.0 / 9.0;

fn main() {
    env_logger::init();
    log::info!("Lantern Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match MatchSettings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => MatchSettings::default(),
    };
    let scores_path = args
        .next()
        .unwrap_or_else(|| "lantern_arena_best.json".to_string());

    let mut store = match JsonFileScoreStore::open(&scores_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Cannot open best scores: {}", e);
            std::process::exit(1);
        }
    };

    let tier = settings.tier;
    let mut state = GameState::with_store(settings, &store);
    let colliders = CircleColliders::default();
    let mut clock = FixedStepClock::default();
    let mut pilot = Autopilot::default();

    while !state.is_game_over() && state.time < MAX_MATCH_SECONDS {
        let steps = clock.advance(clock.delta_time());
        for _ in 0..steps {
            let input = pilot.input(&state);
            tick(&mut state, &input, &colliders, clock.delta_time());

            let events = state.drain_events();
            persist_new_best(&mut store, &events);
            for event in &events {
                if let GameEvent::EnemyKilled { id } = event {
                    log::info!("Enemy {} down (score {})", id, state.score());
                }
            }
        }
    }

    println!(
        "{} match over after {:.1}s: score {} (best {})",
        tier,
        state.time,
        state.score(),
        store.load(tier)
    );
}

/// Demo driver: light the nearest enemy, back away from it and shoot
#[derive(Debug, Default)]
struct Autopilot {
    trigger_down: bool,
}

impl Autopilot {
    fn input(&mut self, state: &GameState) -> TickInput {
        let player = &state.player;
        let viewport = Viewport::from_orthographic(player.pos, CAMERA_ORTHO_SIZE, CAMERA_ASPECT);

        let nearest = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .partial_cmp(&b.pos.distance_squared(player.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(enemy) = nearest else {
            self.trigger_down = false;
            return TickInput {
                viewport: Some(viewport),
                ..Default::default()
            };
        };

        // Retreat, sliding sideways so the walls don't pin us
        let away = (player.pos - enemy.pos).normalize_or_zero();
        let movement = away + away.perp() * 0.5;

        // Alternate press/release so every armed tick can fire
        self.trigger_down = !self.trigger_down && player.has_bullet();

        TickInput {
            movement,
            aim_point: Some(enemy.pos),
            fire: self.trigger_down,
            viewport: Some(viewport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use lantern_arena::DifficultyTier;

    #[test]
    fn test_autopilot_aims_at_nearest() {
        let mut state = GameState::new(MatchSettings::for_tier(DifficultyTier::Easy, 1), 0);
        state.spawn_enemy(Vec2::new(6.0, 0.0));
        state.spawn_enemy(Vec2::new(0.0, 2.0));
        let mut pilot = Autopilot::default();
        let input = pilot.input(&state);
        assert_eq!(input.aim_point, Some(Vec2::new(0.0, 2.0)));
        assert!(input.fire);
        assert!(input.movement.y < 0.0);
        assert!(!pilot.input(&state).fire);
    }
}
