//! In-memory store with snapshot transactions and JSON save/load.

use crate::models::{
    Bye, MatchOutcome, Matchup, Player, PlayerId, Round, ScoreRecord, TournamentId,
    TournamentState,
};
use crate::store::{StoreError, TournamentStore};
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    state: TournamentState,
    /// State as of `begin`, restored on rollback.
    checkpoint: Option<TournamentState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: TournamentState) -> Self {
        Self {
            state,
            checkpoint: None,
        }
    }

    /// Committed view of the data (an open transaction's writes included).
    pub fn state(&self) -> &TournamentState {
        &self.state
    }

    /// Load a store previously written by [`MemoryStore::save_json`].
    pub fn load_json(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        let state: TournamentState = serde_json::from_str(&contents)?;
        log::info!(
            "Loaded {} player(s) and {} matchup(s) from {}",
            state.players.len(),
            state.matchups.len(),
            path.display()
        );
        Ok(Self::from_state(state))
    }

    pub fn save_json(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl TournamentStore for MemoryStore {
    fn tournament_id(&self) -> TournamentId {
        self.state.id
    }

    fn begin(&mut self) -> Result<(), StoreError> {
        if self.checkpoint.is_some() {
            return Err(StoreError::TransactionInProgress);
        }
        self.checkpoint = Some(self.state.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.checkpoint
            .take()
            .map(|_| ())
            .ok_or(StoreError::NoTransaction)
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        let restored = self.checkpoint.take().ok_or(StoreError::NoTransaction)?;
        // The id sequence does not roll back, so ids handed out inside the failed unit stay burnt.
        let last_player_id = self.state.last_player_id;
        self.state = restored;
        self.state.last_player_id = last_player_id;
        Ok(())
    }

    fn insert_player(&mut self, name: &str) -> Result<PlayerId, StoreError> {
        self.state.last_player_id += 1;
        let id = self.state.last_player_id;
        self.state.players.push(Player::new(id, name));
        Ok(id)
    }

    fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.state.players.clone())
    }

    fn score_records(&self) -> Result<HashMap<PlayerId, ScoreRecord>, StoreError> {
        Ok(self.state.scores.iter().map(|(id, s)| (*id, *s)).collect())
    }

    fn upsert_score(
        &mut self,
        id: PlayerId,
        wins_delta: u32,
        losses_delta: u32,
    ) -> Result<(), StoreError> {
        self.state
            .scores
            .entry(id)
            .or_default()
            .apply(wins_delta, losses_delta);
        Ok(())
    }

    fn list_matchups(&self, round: Option<Round>) -> Result<Vec<Matchup>, StoreError> {
        Ok(self
            .state
            .matchups
            .iter()
            .filter(|m| round.map_or(true, |r| m.round == r))
            .cloned()
            .collect())
    }

    fn insert_matchup(
        &mut self,
        round: Round,
        player_1: PlayerId,
        player_2: PlayerId,
    ) -> Result<Matchup, StoreError> {
        let matchup = Matchup::new(round, player_1, player_2);
        self.state.matchups.push(matchup.clone());
        Ok(matchup)
    }

    fn list_byes(&self) -> Result<Vec<Bye>, StoreError> {
        Ok(self.state.byes.clone())
    }

    fn insert_bye(&mut self, round: Round, player: PlayerId) -> Result<Bye, StoreError> {
        let bye = Bye::new(round, player);
        self.state.byes.push(bye.clone());
        Ok(bye)
    }

    fn list_outcomes(&self) -> Result<Vec<MatchOutcome>, StoreError> {
        Ok(self.state.outcomes.clone())
    }

    fn insert_outcome(&mut self, outcome: MatchOutcome) -> Result<(), StoreError> {
        self.state.outcomes.push(outcome);
        Ok(())
    }

    fn truncate_matches(&mut self) -> Result<(), StoreError> {
        self.state.matchups.clear();
        self.state.byes.clear();
        self.state.outcomes.clear();
        for record in self.state.scores.values_mut() {
            record.reset();
        }
        Ok(())
    }

    fn truncate_all(&mut self) -> Result<(), StoreError> {
        self.state.matchups.clear();
        self.state.byes.clear();
        self.state.outcomes.clear();
        self.state.scores.clear();
        self.state.players.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_and_survive_truncate_all() {
        let mut store = MemoryStore::new();
        assert_eq!(store.insert_player("A").unwrap(), 1);
        assert_eq!(store.insert_player("B").unwrap(), 2);
        store.truncate_all().unwrap();
        assert!(store.list_players().unwrap().is_empty());
        assert_eq!(store.insert_player("C").unwrap(), 3);
    }

    #[test]
    fn upsert_creates_missing_record() {
        let mut store = MemoryStore::new();
        store.upsert_score(42, 1, 0).unwrap();
        store.upsert_score(42, 0, 1).unwrap();
        let scores = store.score_records().unwrap();
        assert_eq!(scores[&42], ScoreRecord { wins: 1, losses: 1 });
    }

    #[test]
    fn truncate_matches_keeps_players_and_zeroes_scores() {
        let mut store = MemoryStore::new();
        let a = store.insert_player("A").unwrap();
        let b = store.insert_player("B").unwrap();
        store.upsert_score(a, 1, 0).unwrap();
        store.upsert_score(b, 0, 1).unwrap();
        store.insert_matchup(1, a, b).unwrap();
        store.insert_bye(1, a).unwrap();
        store
            .insert_outcome(MatchOutcome {
                round: Some(1),
                winner: a,
                loser: b,
            })
            .unwrap();

        store.truncate_matches().unwrap();

        assert_eq!(store.list_players().unwrap().len(), 2);
        assert!(store.list_matchups(None).unwrap().is_empty());
        assert!(store.list_byes().unwrap().is_empty());
        assert!(store.list_outcomes().unwrap().is_empty());
        let scores = store.score_records().unwrap();
        assert_eq!(scores[&a], ScoreRecord::default());
        assert_eq!(scores[&b], ScoreRecord::default());
    }

    #[test]
    fn list_matchups_filters_by_round() {
        let mut store = MemoryStore::new();
        store.insert_matchup(1, 1, 2).unwrap();
        store.insert_matchup(2, 1, 3).unwrap();
        store.insert_matchup(2, 2, 4).unwrap();
        assert_eq!(store.list_matchups(Some(2)).unwrap().len(), 2);
        assert_eq!(store.list_matchups(Some(3)).unwrap().len(), 0);
        assert_eq!(store.list_matchups(None).unwrap().len(), 3);
    }

    #[test]
    fn rollback_restores_data_but_not_id_sequence() {
        let mut store = MemoryStore::new();
        store.insert_player("A").unwrap();

        store.begin().unwrap();
        store.insert_player("B").unwrap();
        store.insert_matchup(1, 1, 2).unwrap();
        store.rollback().unwrap();

        assert_eq!(store.list_players().unwrap().len(), 1);
        assert!(store.list_matchups(None).unwrap().is_empty());
        assert_eq!(store.insert_player("C").unwrap(), 3);
    }

    #[test]
    fn transactions_do_not_nest() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.commit(), Err(StoreError::NoTransaction)));
        store.begin().unwrap();
        assert!(matches!(store.begin(), Err(StoreError::TransactionInProgress)));
        store.commit().unwrap();
        assert!(matches!(store.rollback(), Err(StoreError::NoTransaction)));
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let mut store = MemoryStore::new();
        let a = store.insert_player("Ada").unwrap();
        let b = store.insert_player("Grace").unwrap();
        store.upsert_score(a, 1, 0).unwrap();
        store.upsert_score(b, 0, 1).unwrap();
        store.insert_matchup(1, a, b).unwrap();

        let path = std::env::temp_dir()
            .join(format!("swiss-store-{}.json", TournamentId::new_v4()));
        store.save_json(&path).unwrap();
        let loaded = MemoryStore::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.state(), store.state());
        assert_eq!(loaded.tournament_id(), store.tournament_id());
    }

    #[test]
    fn each_new_store_gets_its_own_id() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        assert_ne!(a.tournament_id(), b.tournament_id());
    }
}
