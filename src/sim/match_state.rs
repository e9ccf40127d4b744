//! Score and game-over bookkeeping for one match

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use crate::difficulty::DifficultyTier;

/// Owns the score, the in-memory best score and the one-way game-over flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchController {
    tier: DifficultyTier,
    score: u32,
    best_score: u32,
    game_over: bool,
}

impl MatchController {
    pub fn new(tier: DifficultyTier, best_score: u32) -> Self {
        Self {
            tier,
            score: 0,
            best_score,
            game_over: false,
        }
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Add points unless the match is over
    pub fn add_score(&mut self, points: u32, events: &mut Vec<GameEvent>) {
        if self.game_over {
            return;
        }

        self.score = self.score.saturating_add(points);
        events.push(GameEvent::ScoreChanged { score: self.score });

        if self.score > self.best_score {
            self.best_score = self.score;
            log::info!("New best score on {}: {}", self.tier, self.score);
            events.push(GameEvent::NewBestScore {
                tier: self.tier,
                score: self.score,
            });
        }
    }

    /// End the match; later calls do nothing
    pub fn player_died(&mut self, events: &mut Vec<GameEvent>) {
        if self.game_over {
            return;
        }

        self.game_over = true;
        log::info!("Game over ({}): score {}", self.tier, self.score);
        events.push(GameEvent::GameOver {
            final_score: self.score,
        });
    }
}
