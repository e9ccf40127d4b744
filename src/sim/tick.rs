//! Fixed timestep simulation tick
//!
//! Order within a tick: player, enemies, bullets, spawner, removal. Enemies
//! therefore see this tick's aim, and a bullet fired this tick starts moving
//! on the next one. Once the match is over every system is inert.

use glam::Vec2;

use super::collision::CollisionQuery;
use super::events::{BulletOutcome, GameEvent};
use super::state::GameState;
use crate::arena::Viewport;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction (normalized by the player)
    pub movement: Vec2,
    /// World-space aim point (mouse/touch), if any
    pub aim_point: Option<Vec2>,
    /// Trigger held this tick; a shot needs a press after a release
    pub fire: bool,
    /// Current camera view, if the host has one
    pub viewport: Option<Viewport>,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, collisions: &dyn CollisionQuery, dt: f32) {
    if state.is_game_over() {
        return;
    }

    let dt = dt.max(0.0);
    state.time_ticks += 1;
    state.time += dt;

    // Bullets fired below are not processed until the next tick
    let existing_bullets = state.bullets.len();

    update_player(state, input, dt);
    update_enemies(state, collisions, dt);
    update_bullets(state, input.viewport.as_ref(), collisions, existing_bullets, dt);
    update_spawner(state, input.viewport.as_ref());
    remove_dead(state);
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    player.update_movement(
        input.movement,
        dt,
        state.settings.movement_bound,
        &state.arena,
        input.viewport.as_ref(),
    );
    player.aim_at(input.aim_point);
    player.update_reload(dt);

    if let Some(shot) = player.try_fire(input.fire) {
        let id = state.spawn_bullet(shot);
        log::debug!("Bullet {} fired toward ({:.2}, {:.2})", id, shot.direction.x, shot.direction.y);
    }
}

fn update_enemies(state: &mut GameState, collisions: &dyn CollisionQuery, dt: f32) {
    let speed_multiplier = state.preset.enemy_speed_multiplier;
    let freeze_time = state.settings.enemy.flashlight_freeze_time.max(0.0);

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        if state.match_state.is_game_over() {
            break;
        }
        enemy.update(&state.player, speed_multiplier, freeze_time, dt);
        if collisions.enemy_touches_player(enemy, &state.player) {
            log::debug!("Enemy {} reached the player", enemy.id);
            state.match_state.player_died(&mut state.events);
        }
    }

    if state.match_state.is_game_over() {
        for enemy in &mut state.enemies {
            enemy.halt();
        }
    }
}

fn update_bullets(
    state: &mut GameState,
    viewport: Option<&Viewport>,
    collisions: &dyn CollisionQuery,
    existing: usize,
    dt: f32,
) {
    if state.match_state.is_game_over() {
        return;
    }

    for bullet in state.bullets[..existing].iter_mut() {
        if bullet.is_resolved() {
            continue;
        }
        bullet.advance(dt);

        let struck = state
            .enemies
            .iter_mut()
            .find(|enemy| enemy.alive && collisions.bullet_hits_enemy(bullet, enemy));

        let outcome = if let Some(enemy) = struck {
            if enemy.die() {
                log::debug!("Bullet {} killed enemy {}", bullet.id, enemy.id);
                state.events.push(GameEvent::EnemyKilled { id: enemy.id });
                state.match_state.add_score(1, &mut state.events);
            }
            BulletOutcome::Hit
        } else if collisions.bullet_hits_wall(bullet, &state.arena)
            || bullet.out_of_play(&state.settings.bullet, &state.arena, viewport)
        {
            BulletOutcome::Miss
        } else {
            continue;
        };

        if !bullet.resolve(outcome) {
            continue;
        }
        if bullet.owner == state.player.id {
            match outcome {
                BulletOutcome::Hit => state.player.on_bullet_hit(),
                BulletOutcome::Miss => state.player.on_bullet_miss(),
            }
        }
        log::debug!("Bullet {} resolved: {:?}", bullet.id, outcome);
        state.events.push(GameEvent::BulletResolved {
            id: bullet.id,
            outcome,
        });
    }
}

fn update_spawner(state: &mut GameState, viewport: Option<&Viewport>) {
    if state.match_state.is_game_over() {
        return;
    }

    let spawned = state.spawner.update(
        state.time,
        &state.preset,
        &state.arena,
        viewport,
        &mut state.rng,
    );
    if let Some(pos) = spawned {
        state.spawn_enemy(pos);
    }
}

/// Drop killed enemies and resolved bullets, announcing each removal
fn remove_dead(state: &mut GameState) {
    let events = &mut state.events;
    state.enemies.retain(|enemy| {
        if !enemy.alive {
            events.push(GameEvent::EntityDestroyed { id: enemy.id });
        }
        enemy.alive
    });
    state.bullets.retain(|bullet| {
        if bullet.is_resolved() {
            events.push(GameEvent::EntityDestroyed { id: bullet.id });
        }
        !bullet.is_resolved()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::difficulty::DifficultyTier;
    use crate::settings::{MatchSettings, SpawnPlacement};
    use crate::sim::collision::CircleColliders;
    use crate::sim::player::WeaponState;

    fn quiet_settings() -> MatchSettings {
        // Spawner effectively idle so tests control every enemy
        let mut settings = MatchSettings::for_tier(DifficultyTier::Medium, 12345);
        settings.difficulty.medium.ramp_enabled = false;
        settings.difficulty.medium.min_spawn_interval = 1000.0;
        settings.difficulty.medium.max_spawn_interval = 1000.0;
        settings.spawn_placement = SpawnPlacement::ArenaEdge;
        settings
    }

    fn fire_at(target: Vec2) -> TickInput {
        TickInput {
            aim_point: Some(target),
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fired_bullet_moves_next_tick() {
        let mut state = GameState::new(quiet_settings(), 0);
        let colliders = CircleColliders::default();

        tick(&mut state, &fire_at(Vec2::new(5.0, 0.0)), &colliders, SIM_DT);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, Vec2::ZERO);
        assert_eq!(state.bullets[0].age, 0.0);
        assert_eq!(state.player.weapon, WeaponState::InFlight);

        tick(&mut state, &TickInput::default(), &colliders, SIM_DT);
        assert!(state.bullets[0].pos.x > 0.0);
    }

    #[test]
    fn test_hit_kills_enemy_and_rearms() {
        let mut state = GameState::new(quiet_settings(), 0);
        let colliders = CircleColliders::default();
        let enemy_id = state.spawn_enemy(Vec2::new(3.0, 0.0));
        state.drain_events();

        tick(&mut state, &fire_at(Vec2::new(3.0, 0.0)), &colliders, SIM_DT);
        let mut ticks = 0;
        while !state.player.has_bullet() && ticks < 120 {
            tick(&mut state, &TickInput::default(), &colliders, SIM_DT);
            ticks += 1;
        }

        assert!(state.player.has_bullet());
        assert_eq!(state.player.reload_progress(), 1.0);
        assert_eq!(state.score(), 1);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::EnemyKilled { id: enemy_id }));
        assert!(events.contains(&GameEvent::EntityDestroyed { id: enemy_id }));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::BulletResolved {
                outcome: BulletOutcome::Hit,
                ..
            }
        )));
    }

    #[test]
    fn test_wall_miss_starts_reload() {
        let mut state = GameState::new(quiet_settings(), 0);
        let colliders = CircleColliders::default();

        tick(&mut state, &fire_at(Vec2::new(0.0, -1.0)), &colliders, SIM_DT);
        let mut ticks = 0;
        while !state.player.is_reloading() && ticks < 600 {
            tick(&mut state, &TickInput::default(), &colliders, SIM_DT);
            ticks += 1;
        }
        assert!(state.player.is_reloading());
        assert_eq!(state.player.reload_progress(), 0.0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_lifetime_miss() {
        let mut settings = quiet_settings();
        settings.bullet.max_lifetime = 0.1;
        settings.bullet.miss_outside_arena = false;
        let mut state = GameState::new(settings, 0);
        let colliders = CircleColliders::default();

        tick(&mut state, &fire_at(Vec2::new(1.0, 0.0)), &colliders, SIM_DT);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &colliders, SIM_DT);
        }
        assert!(state.player.is_reloading());
    }

    #[test]
    fn test_contact_ends_match_once() {
        let mut state = GameState::new(quiet_settings(), 0);
        let colliders = CircleColliders::default();
        state.spawn_enemy(Vec2::new(0.5, 0.5));
        state.spawn_enemy(Vec2::new(-0.5, -0.5));

        tick(&mut state, &TickInput::default(), &colliders, SIM_DT);
        assert!(state.is_game_over());
        let events = state.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(state.enemies.iter().all(|e| e.vel == Vec2::ZERO));

        // Inert afterwards
        let ticks = state.time_ticks;
        let pos = state.player.pos;
        let input = TickInput {
            movement: Vec2::X,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, &colliders, SIM_DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos, pos);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_entities_stay_in_id_order() {
        let mut state = GameState::new(quiet_settings(), 0);
        let colliders = CircleColliders::default();
        for x in [-8.0, -7.0, -6.0, 6.0] {
            state.spawn_enemy(Vec2::new(x, 6.0));
        }
        state.enemies[1].die();

        tick(&mut state, &TickInput::default(), &colliders, SIM_DT);
        state.spawn_enemy(Vec2::new(8.0, -6.0));
        tick(&mut state, &TickInput::default(), &colliders, SIM_DT);

        let ids: Vec<_> = state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_dt_freezes_motion() {
        let mut state = GameState::new(quiet_settings(), 0);
        let colliders = CircleColliders::default();
        state.spawn_enemy(Vec2::new(-6.0, 0.0));
        let input = TickInput {
            movement: Vec2::Y,
            ..Default::default()
        };
        tick(&mut state, &input, &colliders, 0.0);
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert_eq!(state.enemies[0].pos, Vec2::new(-6.0, 0.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut settings = MatchSettings::for_tier(DifficultyTier::Extreme, 99999);
        settings.spawn_placement = SpawnPlacement::ArenaEdge;
        let mut state1 = GameState::new(settings.clone(), 0);
        let mut state2 = GameState::new(settings, 0);
        let colliders = CircleColliders::default();

        let inputs = [
            TickInput {
                movement: Vec2::new(1.0, 0.0),
                aim_point: Some(Vec2::new(3.0, 2.0)),
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, &colliders, SIM_DT);
            tick(&mut state2, input, &colliders, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
