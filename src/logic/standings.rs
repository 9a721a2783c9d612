//! Standings: rank players by wins.

use crate::models::{Player, PlayerId, ScoreRecord, Standing, TournamentError};
use crate::store::TournamentStore;
use std::collections::HashMap;

/// Current standings, best record first.
///
/// Players without a score record yet count as 0 wins, 0 matches. Records with no
/// matching player are ignored.
pub fn player_standings<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<Vec<Standing>, TournamentError> {
    let players = store.list_players()?;
    let scores = store.score_records()?;
    Ok(rank(&players, &scores))
}

/// Sort by wins descending; equal wins keep registration order (lower id first).
pub fn rank(players: &[Player], scores: &HashMap<PlayerId, ScoreRecord>) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players
        .iter()
        .map(|p| Standing::from_player(p, scores.get(&p.id).copied().unwrap_or_default()))
        .collect();
    standings.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));
    standings
}
