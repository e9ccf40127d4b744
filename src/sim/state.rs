//! Game state for one match
//!
//! Owns every entity, the seeded RNG, the clock time and the pending event
//! queue. Constructed once per match and passed explicitly to `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::enemy::Enemy;
use super::events::{EntityId, GameEvent};
use super::match_state::MatchController;
use super::player::{Player, ShotRequest};
use super::spawner::SpawnScheduler;
use crate::arena::Arena;
use crate::difficulty::DifficultyPreset;
use crate::highscores::ScoreStore;
use crate::settings::MatchSettings;

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulated seconds since match start
    pub time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub settings: MatchSettings,
    pub arena: Arena,
    /// Active difficulty preset (fixed for the match)
    pub preset: DifficultyPreset,
    pub player: Player,
    /// Live enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// In-flight bullets (sorted by id)
    pub bullets: Vec<Bullet>,
    pub spawner: SpawnScheduler,
    pub match_state: MatchController,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameState {
    /// Start a match with a known best score for the selected tier
    pub fn new(settings: MatchSettings, best_score: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let arena = settings.arena.build();
        let preset = settings.active_preset();
        let spawner = SpawnScheduler::new(0.0, settings.spawn_placement, &preset, &mut rng);
        let player = Player::new(1, &settings.player, preset.miss_reload_time);

        log::info!(
            "Match start: tier={} seed={} reload={} speed_mult={} spawn={:.2}-{:.2} ramp={}s end={:.2}-{:.2}",
            settings.tier,
            settings.seed,
            preset.miss_reload_time,
            preset.enemy_speed_multiplier,
            preset.min_spawn_interval,
            preset.max_spawn_interval,
            preset.ramp_duration,
            preset.min_spawn_interval_end,
            preset.max_spawn_interval_end,
        );

        Self {
            seed: settings.seed,
            time: 0.0,
            time_ticks: 0,
            match_state: MatchController::new(settings.tier, best_score),
            settings,
            arena,
            preset,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            spawner,
            rng,
            events: Vec::new(),
            next_id: 2,
        }
    }

    /// Start a match, reading the tier's best score from a store
    pub fn with_store(settings: MatchSettings, store: &dyn ScoreStore) -> Self {
        let best = store.load(settings.tier);
        Self::new(settings, best)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy at `pos` and announce it
    pub fn spawn_enemy(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.enemies
            .push(Enemy::new(id, pos, self.settings.enemy.chase_speed));
        self.events.push(GameEvent::EnemySpawnRequested { id, position: pos });
        log::debug!("Enemy {} spawned at ({:.2}, {:.2})", id, pos.x, pos.y);
        id
    }

    /// Add the player's bullet and announce it
    pub fn spawn_bullet(&mut self, shot: ShotRequest) -> EntityId {
        let id = self.next_entity_id();
        self.bullets.push(Bullet::new(
            id,
            self.player.id,
            shot.position,
            shot.direction,
            shot.speed,
        ));
        self.events.push(GameEvent::BulletFired {
            id,
            position: shot.position,
            direction: shot.direction,
            speed: shot.speed,
        });
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.match_state.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.match_state.score()
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
