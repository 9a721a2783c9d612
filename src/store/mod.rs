//! Persistence collaborator: the operations the engine needs from a tournament store.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    Bye, MatchOutcome, Matchup, Player, PlayerId, Round, ScoreRecord, TournamentId,
};
use std::collections::HashMap;

/// Errors raised by a store implementation.
#[derive(Debug)]
pub enum StoreError {
    /// `begin` called while a transaction is already open.
    TransactionInProgress,
    /// `commit` or `rollback` called without an open transaction.
    NoTransaction,
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::TransactionInProgress => write!(f, "A transaction is already in progress"),
            StoreError::NoTransaction => write!(f, "No transaction in progress"),
            StoreError::Io(e) => write!(f, "Store I/O failed: {}", e),
            StoreError::Serialization(e) => write!(f, "Store (de)serialization failed: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e)
    }
}

/// Players, score records, matchups, byes and results for a single tournament.
///
/// Writes between `begin` and `commit` form one unit: after `rollback` the store
/// must look as it did at `begin`. Player ids are never handed out twice, even
/// across a rollback.
pub trait TournamentStore {
    /// Id of the tournament this store holds. Stable across reloads.
    fn tournament_id(&self) -> TournamentId;

    fn begin(&mut self) -> Result<(), StoreError>;
    fn commit(&mut self) -> Result<(), StoreError>;
    fn rollback(&mut self) -> Result<(), StoreError>;

    /// Add a player to the roster and return its freshly assigned id.
    fn insert_player(&mut self, name: &str) -> Result<PlayerId, StoreError>;
    /// All players in registration order.
    fn list_players(&self) -> Result<Vec<Player>, StoreError>;

    fn score_records(&self) -> Result<HashMap<PlayerId, ScoreRecord>, StoreError>;
    /// Add the deltas to `id`'s record, creating it first if absent.
    fn upsert_score(
        &mut self,
        id: PlayerId,
        wins_delta: u32,
        losses_delta: u32,
    ) -> Result<(), StoreError>;

    /// Matchups of one round, or of every round when `round` is `None`.
    fn list_matchups(&self, round: Option<Round>) -> Result<Vec<Matchup>, StoreError>;
    fn insert_matchup(
        &mut self,
        round: Round,
        player_1: PlayerId,
        player_2: PlayerId,
    ) -> Result<Matchup, StoreError>;

    fn list_byes(&self) -> Result<Vec<Bye>, StoreError>;
    fn insert_bye(&mut self, round: Round, player: PlayerId) -> Result<Bye, StoreError>;

    /// Reported results in reporting order.
    fn list_outcomes(&self) -> Result<Vec<MatchOutcome>, StoreError>;
    fn insert_outcome(&mut self, outcome: MatchOutcome) -> Result<(), StoreError>;

    /// Drop all matchups, byes and results and zero every score record. Players stay.
    fn truncate_matches(&mut self) -> Result<(), StoreError>;
    /// Drop players, score records, matchups, byes and results.
    fn truncate_all(&mut self) -> Result<(), StoreError>;
}
