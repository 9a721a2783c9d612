//! Matchup, Bye, and the pairing views handed back to callers.

use crate::models::player::PlayerId;
use crate::models::standing::Standing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round number, starting at 1.
pub type Round = u32;

/// Two players assigned to play each other in one round. Never mutated once stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub round: Round,
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub created_at: DateTime<Utc>,
}

impl Matchup {
    pub fn new(round: Round, player_1: PlayerId, player_2: PlayerId) -> Self {
        Self {
            round,
            player_1,
            player_2,
            created_at: Utc::now(),
        }
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.player_1 == id || self.player_2 == id
    }

    /// Order-independent key for rematch lookups.
    pub fn key(&self) -> (PlayerId, PlayerId) {
        pair_key(self.player_1, self.player_2)
    }
}

pub(crate) fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A round in which a player sat out because the field was odd.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bye {
    pub round: Round,
    pub player: PlayerId,
    pub created_at: DateTime<Utc>,
}

impl Bye {
    pub fn new(round: Round, player: PlayerId) -> Self {
        Self {
            round,
            player,
            created_at: Utc::now(),
        }
    }
}

/// One generated pairing, annotated with both display names.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairingEntry {
    pub id_1: PlayerId,
    pub name_1: String,
    pub id_2: PlayerId,
    pub name_2: String,
}

/// Everything produced by one call to generate pairings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundPairings {
    pub round: Round,
    pub pairings: Vec<PairingEntry>,
    /// Set only when the odd-player policy hands out a bye.
    pub bye: Option<Standing>,
}

impl RoundPairings {
    /// Ids of every player seated this round (bye excluded).
    pub fn seated(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.pairings.iter().flat_map(|p| [p.id_1, p.id_2])
    }
}

/// A reported result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Round of the matchup this result settles; `None` for a result with no open matchup.
    pub round: Option<Round>,
    pub winner: PlayerId,
    pub loser: PlayerId,
}

impl MatchOutcome {
    /// Whether this result settles `matchup`.
    pub fn settles(&self, matchup: &Matchup) -> bool {
        self.round == Some(matchup.round)
            && matchup.involves(self.winner)
            && matchup.involves(self.loser)
    }
}
