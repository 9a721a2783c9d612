//! Data structures for a Swiss tournament: players, scores, matchups, standings, configuration.

mod config;
mod matchup;
mod player;
mod standing;
mod tournament;

pub use config::{EngineConfig, OddPlayerPolicy, RematchPolicy};
pub(crate) use matchup::pair_key;
pub use matchup::{Bye, MatchOutcome, Matchup, PairingEntry, Round, RoundPairings};
pub use player::{Player, PlayerId, ScoreRecord};
pub use standing::Standing;
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};
