//! Swiss-system tournament: library with models, pairing/standings logic and a pluggable store.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    bootstrap_roster, player_standings, register_player, report_match, simulate_round,
    swiss_pairings, DEFAULT_ROSTER,
};
pub use models::{
    Bye, EngineConfig, MatchOutcome, Matchup, OddPlayerPolicy, PairingEntry, Player, PlayerId,
    RematchPolicy, Round, RoundPairings, ScoreRecord, Standing, Tournament, TournamentError,
    TournamentId, TournamentState,
};
pub use store::{MemoryStore, StoreError, TournamentStore};
