//! Player and ScoreRecord data structures.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player. Assigned by the store in registration order and never reused.
pub type PlayerId = u32;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name (need not be unique).
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Win/loss counters owned by one player.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub wins: u32,
    pub losses: u32,
}

impl ScoreRecord {
    /// Number of completed matches (byes count as won matches).
    pub fn matches(&self) -> u32 {
        self.wins + self.losses
    }

    /// Apply a result delta to this record.
    pub fn apply(&mut self, wins_delta: u32, losses_delta: u32) {
        self.wins += wins_delta;
        self.losses += losses_delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
