//! Tournament business logic: standings, pairing, results, roster.

mod pairing;
mod results;
mod roster;
mod simulate;
mod standings;

pub use pairing::{latest_round, pair_ranked, swiss_pairings};
pub use results::report_match;
pub use roster::{
    bootstrap_roster, count_players, delete_matches, delete_players, import_roster_csv,
    register_player, write_standings_csv, DEFAULT_ROSTER,
};
pub use simulate::simulate_round;
pub use standings::{player_standings, rank};
