//! Best score per difficulty tier
//!
//! The simulation only keeps the best score in memory and emits
//! `GameEvent::NewBestScore`; a `ScoreStore` collaborator persists it.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyTier;
use crate::error::Error;
use crate::sim::GameEvent;

/// Persistent best score storage keyed by tier
pub trait ScoreStore {
    /// Best score for a tier (0 if none recorded)
    fn load(&self, tier: DifficultyTier) -> u32;
    /// Store a new best score for a tier
    fn save(&mut self, tier: DifficultyTier, score: u32);
}

/// In-memory store (tests, and sessions without persistence)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: HashMap<DifficultyTier, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self, tier: DifficultyTier) -> u32 {
        self.scores.get(&tier).copied().unwrap_or(0)
    }

    fn save(&mut self, tier: DifficultyTier, score: u32) {
        self.scores.insert(tier, score);
    }
}

/// Best scores as stored on disk, keyed by tier name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestScores {
    pub scores: BTreeMap<String, u32>,
}

impl BestScores {
    pub fn get(&self, tier: DifficultyTier) -> u32 {
        self.scores.get(tier.as_str()).copied().unwrap_or(0)
    }

    pub fn set(&mut self, tier: DifficultyTier, score: u32) {
        self.scores.insert(tier.as_str().to_string(), score);
    }
}

/// JSON file backed store; every save rewrites the file
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
    scores: BestScores,
}

impl JsonFileScoreStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let scores = match std::fs::read_to_string(&path) {
            Ok(json) => {
                let scores: BestScores = serde_json::from_str(&json)?;
                log::info!("Loaded {} best scores", scores.scores.len());
                scores
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best scores found, starting fresh");
                BestScores::default()
            }
            Err(e) => return Err(Error::io(&path, e)),
        };
        Ok(Self { path, scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &BestScores {
        &self.scores
    }

    fn write(&self) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(&self.scores)?;
        std::fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&self, tier: DifficultyTier) -> u32 {
        self.scores.get(tier)
    }

    fn save(&mut self, tier: DifficultyTier, score: u32) {
        self.scores.set(tier, score);
        match self.write() {
            Ok(()) => log::info!("Best score saved ({} = {})", tier, score),
            Err(e) => log::warn!("Failed to save best score: {}", e),
        }
    }
}

/// Persist every `NewBestScore` in `events`; returns how many were saved
pub fn persist_new_best(store: &mut dyn ScoreStore, events: &[GameEvent]) -> usize {
    let mut saved = 0;
    for event in events {
        if let GameEvent::NewBestScore { tier, score } = *event {
            store.save(tier, score);
            saved += 1;
        }
    }
    saved
}
