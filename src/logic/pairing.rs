//! Swiss pairing: next round from the current standings.

use crate::logic::results::is_settled;
use crate::logic::standings::player_standings;
use crate::models::{
    pair_key, EngineConfig, OddPlayerPolicy, PairingEntry, PlayerId, RematchPolicy, Round,
    RoundPairings, Standing, TournamentError,
};
use crate::store::TournamentStore;
use std::collections::{HashMap, HashSet};

/// Highest round that has matchups or byes, `None` before round 1.
pub fn latest_round<S: TournamentStore + ?Sized>(
    store: &S,
) -> Result<Option<Round>, TournamentError> {
    let matchups = store.list_matchups(None)?;
    let byes = store.list_byes()?;
    Ok(matchups
        .iter()
        .map(|m| m.round)
        .chain(byes.iter().map(|b| b.round))
        .max())
}

/// Generate and persist the next round's pairings.
///
/// 1. Round number is 1 for a fresh tournament, otherwise one past the latest round.
/// 2. Rank players with [`player_standings`].
/// 3. Odd field: reject, or hand the lowest-ranked eligible player a bye (credited as a win).
/// 4. Pair neighbours down the standings: `(rank[0], rank[1])`, `(rank[2], rank[3])`, ...
///    With [`RematchPolicy::Avoid`] the pairing closest to that order without a rematch
///    is used instead, when one exists.
/// 5. Store one matchup per pair under the new round.
pub fn swiss_pairings<S: TournamentStore + ?Sized>(
    store: &mut S,
    config: &EngineConfig,
) -> Result<RoundPairings, TournamentError> {
    let round = latest_round(store)?.map_or(1, |r| r + 1);
    let mut ranked = player_standings(store)?;

    if ranked.len() < 2 {
        return Err(TournamentError::InvalidState(format!(
            "need at least 2 players to pair, have {}",
            ranked.len()
        )));
    }
    if config.enforce_round_completion && round > 1 {
        ensure_round_settled(store, round - 1)?;
    }

    let bye = if ranked.len() % 2 == 1 {
        match config.odd_players {
            OddPlayerPolicy::Reject => {
                return Err(TournamentError::InvalidState(format!(
                    "cannot pair an odd number of players ({})",
                    ranked.len()
                )));
            }
            OddPlayerPolicy::Bye => Some(assign_bye(store, round, &mut ranked)?),
        }
    } else {
        None
    };

    let played = match config.rematches {
        RematchPolicy::Allow => HashSet::new(),
        RematchPolicy::Avoid => store
            .list_matchups(None)?
            .iter()
            .map(|m| m.key())
            .collect(),
    };
    let pairs = pair_ranked(&ranked, config.rematches, &played);

    let names: HashMap<PlayerId, String> = store
        .list_players()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    let name_of = |id: PlayerId| names.get(&id).cloned().ok_or(TournamentError::NotFound(id));

    let mut pairings = Vec::with_capacity(pairs.len());
    for (id_1, id_2) in pairs {
        store.insert_matchup(round, id_1, id_2)?;
        log::debug!("Round {}: {} vs {}", round, id_1, id_2);
        pairings.push(PairingEntry {
            id_1,
            name_1: name_of(id_1)?,
            id_2,
            name_2: name_of(id_2)?,
        });
    }

    Ok(RoundPairings {
        round,
        pairings,
        bye,
    })
}

/// Every matchup of `previous` must have a reported result.
fn ensure_round_settled<S: TournamentStore + ?Sized>(
    store: &S,
    previous: Round,
) -> Result<(), TournamentError> {
    let outcomes = store.list_outcomes()?;
    let open = store
        .list_matchups(Some(previous))?
        .iter()
        .filter(|m| !is_settled(m, &outcomes))
        .count();
    if open > 0 {
        return Err(TournamentError::InvalidState(format!(
            "round {} still has {} unreported match(es)",
            previous, open
        )));
    }
    Ok(())
}

/// Remove the bye recipient from `ranked`, record the bye and credit it as a win.
fn assign_bye<S: TournamentStore + ?Sized>(
    store: &mut S,
    round: Round,
    ranked: &mut Vec<Standing>,
) -> Result<Standing, TournamentError> {
    let had_bye: HashSet<PlayerId> = store.list_byes()?.iter().map(|b| b.player).collect();
    let idx = match ranked.iter().rposition(|s| !had_bye.contains(&s.id)) {
        Some(idx) => idx,
        None => {
            log::warn!("Round {}: every player already had a bye, repeating one", round);
            ranked.len() - 1
        }
    };
    let player = ranked.remove(idx);
    store.insert_bye(round, player.id)?;
    store.upsert_score(player.id, 1, 0)?;
    log::debug!("Round {}: bye for {}", round, player.id);
    Ok(player)
}

/// Split an even-length ranked list into pairs of ids.
pub fn pair_ranked(
    ranked: &[Standing],
    policy: RematchPolicy,
    played: &HashSet<(PlayerId, PlayerId)>,
) -> Vec<(PlayerId, PlayerId)> {
    match policy {
        RematchPolicy::Allow => ranked
            .chunks_exact(2)
            .map(|chunk| (chunk[0].id, chunk[1].id))
            .collect(),
        RematchPolicy::Avoid => {
            let pool: Vec<PlayerId> = ranked.iter().map(|s| s.id).collect();
            let mut pairs = Vec::with_capacity(pool.len() / 2);
            if search_fresh(&pool, played, &mut pairs) {
                pairs
            } else {
                log::warn!("No pairing avoids every rematch, allowing rematches");
                pair_first_fit(pool, played)
            }
        }
    }
}

/// Depth-first search for a pairing with no rematch. The top player tries opponents in
/// ranked order, so the first complete pairing found stays closest to adjacent pairing.
fn search_fresh(
    pool: &[PlayerId],
    played: &HashSet<(PlayerId, PlayerId)>,
    pairs: &mut Vec<(PlayerId, PlayerId)>,
) -> bool {
    let Some((&first, rest)) = pool.split_first() else {
        return true;
    };
    for (idx, &other) in rest.iter().enumerate() {
        if played.contains(&pair_key(first, other)) {
            continue;
        }
        let remaining: Vec<PlayerId> = rest
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != idx)
            .map(|(_, &id)| id)
            .collect();
        pairs.push((first, other));
        if search_fresh(&remaining, played, pairs) {
            return true;
        }
        pairs.pop();
    }
    false
}

/// Top unpaired player takes the first opponent not yet met, else its neighbour.
fn pair_first_fit(
    mut pool: Vec<PlayerId>,
    played: &HashSet<(PlayerId, PlayerId)>,
) -> Vec<(PlayerId, PlayerId)> {
    let mut pairs = Vec::with_capacity(pool.len() / 2);
    while pool.len() >= 2 {
        let first = pool.remove(0);
        let idx = pool
            .iter()
            .position(|&other| !played.contains(&pair_key(first, other)))
            .unwrap_or(0);
        pairs.push((first, pool.remove(idx)));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ids: &[PlayerId]) -> Vec<Standing> {
        ids.iter()
            .map(|&id| Standing {
                id,
                name: format!("P{id}"),
                wins: 0,
                matches: 0,
            })
            .collect()
    }

    fn played(pairs: &[(PlayerId, PlayerId)]) -> HashSet<(PlayerId, PlayerId)> {
        pairs.iter().map(|&(a, b)| pair_key(a, b)).collect()
    }

    #[test]
    fn allow_pairs_neighbours() {
        let pairs = pair_ranked(&ranked(&[5, 2, 7, 1]), RematchPolicy::Allow, &HashSet::new());
        assert_eq!(pairs, vec![(5, 2), (7, 1)]);
    }

    #[test]
    fn allow_ignores_history() {
        let pairs = pair_ranked(&ranked(&[1, 2, 3, 4]), RematchPolicy::Allow, &played(&[(1, 2)]));
        assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn avoid_keeps_neighbours_when_fresh() {
        let pairs = pair_ranked(&ranked(&[1, 2, 3, 4]), RematchPolicy::Avoid, &played(&[(1, 3)]));
        assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn avoid_skips_previous_opponent() {
        let history = played(&[(1, 2), (3, 4)]);
        let pairs = pair_ranked(&ranked(&[1, 2, 3, 4]), RematchPolicy::Avoid, &history);
        assert_eq!(pairs, vec![(1, 3), (2, 4)]);
    }

    #[test]
    fn avoid_rearranges_top_pair_to_spare_a_lower_rematch() {
        let pairs = pair_ranked(&ranked(&[1, 2, 3, 4]), RematchPolicy::Avoid, &played(&[(3, 4)]));
        assert_eq!(pairs, vec![(1, 3), (2, 4)]);
    }

    #[test]
    fn avoid_finds_fresh_pairing_deep_in_the_field() {
        // Greedy would pair 1-2, 3-4 and be left with the rematch 5-6.
        let history = played(&[(5, 6), (3, 5), (4, 6)]);
        let pairs = pair_ranked(&ranked(&[1, 2, 3, 4, 5, 6]), RematchPolicy::Avoid, &history);
        assert!(pairs.iter().all(|&(a, b)| !history.contains(&pair_key(a, b))));
        assert_eq!(pairs, vec![(1, 2), (3, 6), (4, 5)]);
    }

    #[test]
    fn avoid_falls_back_to_neighbour() {
        let history = played(&[(1, 2), (1, 3), (1, 4)]);
        let pairs = pair_ranked(&ranked(&[1, 2, 3, 4]), RematchPolicy::Avoid, &history);
        assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    }
}
