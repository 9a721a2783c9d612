//! One row of the standings table.

use crate::models::player::{Player, PlayerId, ScoreRecord};
use serde::{Deserialize, Serialize};

/// Ranked view of a player: `(id, name, wins, matches)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub matches: u32,
}

impl Standing {
    pub fn from_player(player: &Player, record: ScoreRecord) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            wins: record.wins,
            matches: record.matches(),
        }
    }

    pub fn losses(&self) -> u32 {
        self.matches - self.wins
    }
}
