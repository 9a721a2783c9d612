//! Match result reporting.

use crate::models::{MatchOutcome, Matchup, PlayerId, TournamentError};
use crate::store::TournamentStore;

/// Record one result: `winner` gains a win, `loser` gains a loss.
///
/// The result settles the earliest matchup between the two players that has no result
/// yet. Not idempotent: reporting again counts again, but settles nothing further, so it
/// cannot stand in for another matchup's result. Both players must be registered.
pub fn report_match<S: TournamentStore + ?Sized>(
    store: &mut S,
    winner: PlayerId,
    loser: PlayerId,
) -> Result<MatchOutcome, TournamentError> {
    if winner == loser {
        return Err(TournamentError::InvalidArgument(format!(
            "player {} cannot be both winner and loser",
            winner
        )));
    }
    let players = store.list_players()?;
    for id in [winner, loser] {
        if !players.iter().any(|p| p.id == id) {
            return Err(TournamentError::NotFound(id));
        }
    }

    let outcomes = store.list_outcomes()?;
    let round = store
        .list_matchups(None)?
        .iter()
        .filter(|m| m.involves(winner) && m.involves(loser))
        .find(|m| !is_settled(m, &outcomes))
        .map(|m| m.round);
    if round.is_none() {
        log::warn!("No open matchup for {} v {}, recording result unpaired", winner, loser);
    }

    let outcome = MatchOutcome {
        round,
        winner,
        loser,
    };
    store.upsert_score(winner, 1, 0)?;
    store.upsert_score(loser, 0, 1)?;
    store.insert_outcome(outcome)?;
    log::debug!("Result recorded: {} beat {} (round {:?})", winner, loser, round);
    Ok(outcome)
}

pub(crate) fn is_settled(matchup: &Matchup, outcomes: &[MatchOutcome]) -> bool {
    outcomes.iter().any(|o| o.settles(matchup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn self_match_is_rejected() {
        let mut store = MemoryStore::new();
        let a = store.insert_player("A").unwrap();
        assert!(matches!(
            report_match(&mut store, a, a),
            Err(TournamentError::InvalidArgument(_))
        ));
        assert!(store.score_records().unwrap().is_empty());
        assert!(store.list_outcomes().unwrap().is_empty());
    }

    #[test]
    fn creates_records_on_first_report() {
        let mut store = MemoryStore::new();
        let a = store.insert_player("A").unwrap();
        let b = store.insert_player("B").unwrap();

        report_match(&mut store, a, b).unwrap();
        report_match(&mut store, a, b).unwrap();

        let scores = store.score_records().unwrap();
        assert_eq!((scores[&a].wins, scores[&a].losses), (2, 0));
        assert_eq!((scores[&b].wins, scores[&b].losses), (0, 2));
    }

    #[test]
    fn settles_the_open_matchup_once() {
        let mut store = MemoryStore::new();
        let a = store.insert_player("A").unwrap();
        let b = store.insert_player("B").unwrap();
        store.insert_matchup(1, a, b).unwrap();

        let first = report_match(&mut store, b, a).unwrap();
        let again = report_match(&mut store, b, a).unwrap();

        assert_eq!(first.round, Some(1));
        assert_eq!(again.round, None);
        assert_eq!(store.list_outcomes().unwrap(), vec![first, again]);
    }

    #[test]
    fn settles_earliest_open_rematch() {
        let mut store = MemoryStore::new();
        let a = store.insert_player("A").unwrap();
        let b = store.insert_player("B").unwrap();
        store.insert_matchup(1, a, b).unwrap();
        store.insert_matchup(2, b, a).unwrap();

        assert_eq!(report_match(&mut store, a, b).unwrap().round, Some(1));
        assert_eq!(report_match(&mut store, a, b).unwrap().round, Some(2));
    }

    #[test]
    fn unknown_loser_is_not_found() {
        let mut store = MemoryStore::new();
        let a = store.insert_player("A").unwrap();
        assert!(matches!(
            report_match(&mut store, a, 7),
            Err(TournamentError::NotFound(7))
        ));
    }
}
