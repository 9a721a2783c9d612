//! Roster management: registration, resets, CSV import and standings export.

use crate::models::{PlayerId, Standing, TournamentError};
use crate::store::TournamentStore;
use serde::Deserialize;

/// Players registered by [`bootstrap_roster`].
pub const DEFAULT_ROSTER: [&str; 8] = [
    "John Wall",
    "Steph Curry",
    "James Johnson",
    "Lebron James",
    "James Harden",
    "James Johnson",
    "Kobe Bryant",
    "Shaq",
];

/// Add a player with a zeroed score record. Names are trimmed and must not be empty.
pub fn register_player<S: TournamentStore + ?Sized>(
    store: &mut S,
    name: &str,
) -> Result<PlayerId, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidArgument("player name is empty".into()));
    }
    let id = store.insert_player(name)?;
    store.upsert_score(id, 0, 0)?;
    Ok(id)
}

pub fn count_players<S: TournamentStore + ?Sized>(store: &S) -> Result<usize, TournamentError> {
    Ok(store.list_players()?.len())
}

/// Register [`DEFAULT_ROSTER`]. The roster must be empty.
pub fn bootstrap_roster<S: TournamentStore + ?Sized>(
    store: &mut S,
) -> Result<Vec<PlayerId>, TournamentError> {
    let existing = count_players(store)?;
    if existing > 0 {
        return Err(TournamentError::InvalidState(format!(
            "roster already has {} player(s)",
            existing
        )));
    }
    DEFAULT_ROSTER
        .iter()
        .map(|name| register_player(store, name))
        .collect()
}

pub fn delete_matches<S: TournamentStore + ?Sized>(store: &mut S) -> Result<(), TournamentError> {
    Ok(store.truncate_matches()?)
}

pub fn delete_players<S: TournamentStore + ?Sized>(store: &mut S) -> Result<(), TournamentError> {
    Ok(store.truncate_all()?)
}

#[derive(Deserialize)]
struct RosterRow {
    name: String,
}

/// Register one player per CSV row, in file order.
/// Needs a `name` header; other columns are ignored.
pub fn import_roster_csv<S: TournamentStore + ?Sized, R: std::io::Read>(
    store: &mut S,
    reader: R,
) -> Result<Vec<PlayerId>, TournamentError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut ids = Vec::new();
    for (i, row) in rdr.deserialize::<RosterRow>().enumerate() {
        // Header is line 1.
        let row = row.map_err(|e| {
            TournamentError::InvalidArgument(format!("roster line {}: {}", i + 2, e))
        })?;
        ids.push(register_player(store, &row.name)?);
    }
    Ok(ids)
}

/// Write standings as CSV with header `id,name,wins,matches`.
pub fn write_standings_csv<W: std::io::Write>(
    standings: &[Standing],
    writer: W,
) -> Result<(), TournamentError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for standing in standings {
        wtr.serialize(standing)
            .map_err(|e| TournamentError::PersistenceFailure(e.to_string()))?;
    }
    wtr.flush()
        .map_err(|e| TournamentError::PersistenceFailure(e.to_string()))
}
