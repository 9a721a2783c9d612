//! Tournament, TournamentState, and TournamentError.

use crate::logic;
use crate::models::config::EngineConfig;
use crate::models::matchup::{Bye, MatchOutcome, Matchup, Round, RoundPairings};
use crate::models::player::{Player, PlayerId, ScoreRecord};
use crate::models::standing::Standing;
use crate::store::{MemoryStore, StoreError, TournamentStore};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Debug)]
pub enum TournamentError {
    /// Not allowed in the current state (odd field, round in progress, ...).
    InvalidState(String),
    /// A caller-supplied value is unusable (self-match, empty name, bad roster row).
    InvalidArgument(String),
    /// Referenced player is not registered.
    NotFound(PlayerId),
    /// The store could not be read or written.
    PersistenceFailure(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            TournamentError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            TournamentError::NotFound(id) => write!(f, "Player {} not found", id),
            TournamentError::PersistenceFailure(msg) => write!(f, "Persistence failure: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<StoreError> for TournamentError {
    fn from(e: StoreError) -> Self {
        TournamentError::PersistenceFailure(e.to_string())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Everything a store keeps for one tournament. Serialized as-is by [`MemoryStore`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    #[serde(default = "Uuid::new_v4")]
    pub id: TournamentId,
    /// Last id handed out; the next player gets `last_player_id + 1`.
    pub last_player_id: PlayerId,
    /// Registered players in registration order.
    pub players: Vec<Player>,
    pub scores: BTreeMap<PlayerId, ScoreRecord>,
    pub matchups: Vec<Matchup>,
    pub byes: Vec<Bye>,
    #[serde(default)]
    pub outcomes: Vec<MatchOutcome>,
}

impl Default for TournamentState {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            last_player_id: 0,
            players: Vec::new(),
            scores: BTreeMap::new(),
            matchups: Vec::new(),
            byes: Vec::new(),
            outcomes: Vec::new(),
        }
    }
}

/// A Swiss tournament over an injected store. Every mutating call runs as one transaction.
pub struct Tournament<S: TournamentStore = MemoryStore> {
    store: S,
    config: EngineConfig,
}

impl Tournament<MemoryStore> {
    /// Empty in-memory tournament with default policies.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), EngineConfig::default())
    }
}

impl<S: TournamentStore> Tournament<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Id kept by the store, so it survives save and reload.
    pub fn id(&self) -> TournamentId {
        self.store.tournament_id()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run `op` between `begin` and `commit`; roll back if it fails.
    fn transaction<T>(
        &mut self,
        op: impl FnOnce(&mut S, &EngineConfig) -> Result<T, TournamentError>,
    ) -> Result<T, TournamentError> {
        self.store.begin()?;
        match op(&mut self.store, &self.config) {
            Ok(value) => {
                self.store.commit()?;
                Ok(value)
            }
            Err(e) => {
                match self.store.rollback() {
                    Ok(()) => log::warn!("Tournament {}: rolled back ({})", self.id(), e),
                    Err(rb) => log::warn!(
                        "Tournament {}: rollback failed ({}) after: {}",
                        self.id(),
                        rb,
                        e
                    ),
                }
                Err(e)
            }
        }
    }

    /// Register a player and return the assigned id.
    pub fn register_player(&mut self, name: &str) -> Result<PlayerId, TournamentError> {
        let id = self.transaction(|store, _| logic::register_player(store, name))?;
        log::info!("Tournament {}: registered player {}", self.id(), id);
        Ok(id)
    }

    /// Register the default eight-player roster. Only valid while the roster is empty.
    pub fn bootstrap_roster(&mut self) -> Result<Vec<PlayerId>, TournamentError> {
        let ids = self.transaction(|store, _| logic::bootstrap_roster(store))?;
        log::info!("Tournament {}: bootstrapped {} players", self.id(), ids.len());
        Ok(ids)
    }

    /// Register every row of a CSV roster (`name` column). All rows or none.
    pub fn import_roster_csv<R: std::io::Read>(
        &mut self,
        reader: R,
    ) -> Result<Vec<PlayerId>, TournamentError> {
        let ids = self.transaction(|store, _| logic::import_roster_csv(store, reader))?;
        log::info!("Tournament {}: imported {} players", self.id(), ids.len());
        Ok(ids)
    }

    pub fn count_players(&self) -> Result<usize, TournamentError> {
        logic::count_players(&self.store)
    }

    pub fn players(&self) -> Result<Vec<Player>, TournamentError> {
        Ok(self.store.list_players()?)
    }

    /// Remove all match history and reset every score to 0-0. Players stay registered.
    pub fn delete_matches(&mut self) -> Result<(), TournamentError> {
        self.transaction(|store, _| logic::delete_matches(store))?;
        log::info!("Tournament {}: match history cleared", self.id());
        Ok(())
    }

    /// Remove all players along with their scores and match history.
    pub fn delete_players(&mut self) -> Result<(), TournamentError> {
        self.transaction(|store, _| logic::delete_players(store))?;
        log::info!("Tournament {}: roster cleared", self.id());
        Ok(())
    }

    pub fn player_standings(&self) -> Result<Vec<Standing>, TournamentError> {
        logic::player_standings(&self.store)
    }

    /// Write the current standings as CSV (`id,name,wins,matches`).
    pub fn write_standings_csv<W: std::io::Write>(&self, writer: W) -> Result<(), TournamentError> {
        let standings = self.player_standings()?;
        logic::write_standings_csv(&standings, writer)
    }

    /// Record that `winner` beat `loser`, settling their open matchup if they have one.
    pub fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchOutcome, TournamentError> {
        self.transaction(|store, _| logic::report_match(store, winner, loser))
    }

    /// Pair the next round from the current standings and persist it.
    pub fn swiss_pairings(&mut self) -> Result<RoundPairings, TournamentError> {
        let pairings = self.transaction(|store, config| logic::swiss_pairings(store, config))?;
        log::info!(
            "Tournament {}: round {} paired ({} matchups{})",
            self.id(),
            pairings.round,
            pairings.pairings.len(),
            if pairings.bye.is_some() { ", 1 bye" } else { "" }
        );
        Ok(pairings)
    }

    /// Report a random winner for every matchup of `round`.
    pub fn simulate_round<R: Rng + ?Sized>(
        &mut self,
        round: Round,
        rng: &mut R,
    ) -> Result<Vec<MatchOutcome>, TournamentError> {
        let outcomes = self.transaction(|store, _| logic::simulate_round(store, round, rng))?;
        log::info!(
            "Tournament {}: simulated {} results for round {}",
            self.id(),
            outcomes.len(),
            round
        );
        Ok(outcomes)
    }

    /// Most recent round with pairings, or `None` before the first round.
    pub fn current_round(&self) -> Result<Option<Round>, TournamentError> {
        logic::latest_round(&self.store)
    }

    pub fn matchups(&self, round: Option<Round>) -> Result<Vec<Matchup>, TournamentError> {
        Ok(self.store.list_matchups(round)?)
    }

    pub fn byes(&self) -> Result<Vec<Bye>, TournamentError> {
        Ok(self.store.list_byes()?)
    }
}
