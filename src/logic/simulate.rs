//! Random results for a paired round (used by the demo to advance the tournament).

use crate::logic::results::report_match;
use crate::models::{MatchOutcome, Round, TournamentError};
use crate::store::TournamentStore;
use rand::Rng;

/// Pick a winner at random for each matchup of `round` and report it.
pub fn simulate_round<S: TournamentStore + ?Sized, R: Rng + ?Sized>(
    store: &mut S,
    round: Round,
    rng: &mut R,
) -> Result<Vec<MatchOutcome>, TournamentError> {
    let matchups = store.list_matchups(Some(round))?;
    if matchups.is_empty() {
        return Err(TournamentError::InvalidState(format!("round {} has no matchups", round)));
    }

    let mut outcomes = Vec::with_capacity(matchups.len());
    for m in matchups {
        let (winner, loser) = if rng.gen_bool(0.5) {
            (m.player_1, m.player_2)
        } else {
            (m.player_2, m.player_1)
        };
        outcomes.push(report_match(store, winner, loser)?);
    }
    Ok(outcomes)
}
