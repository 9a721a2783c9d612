//! Demonstration entry point: pair the next round(s) and print the pairing list.
//! Run with: cargo run --bin swiss-demo
//!
//! Env: SWISS_STATE_FILE (JSON state to resume from and save to), SWISS_ROSTER_CSV (roster to
//! import into an empty tournament; default roster otherwise), SWISS_ROUNDS (rounds to pair and
//! simulate, default 1), plus the SWISS_* pairing policies read by `EngineConfig::from_env`.

use std::fs::File;
use std::path::PathBuf;
use swiss_tournament::{EngineConfig, MemoryStore, Tournament};

fn default_rounds() -> u32 {
    1
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = EngineConfig::from_env();
    let state_file = std::env::var("SWISS_STATE_FILE").ok().map(PathBuf::from);
    let rounds: u32 = std::env::var("SWISS_ROUNDS")
        .ok()
        .and_then(|r| r.parse().ok())
        .unwrap_or_else(default_rounds);

    let store = match &state_file {
        Some(path) if path.exists() => MemoryStore::load_json(path)?,
        _ => MemoryStore::new(),
    };
    let mut tournament = Tournament::new(store, config);
    log::info!("Tournament {} ({:?})", tournament.id(), tournament.config());

    if tournament.count_players()? == 0 {
        match std::env::var("SWISS_ROSTER_CSV") {
            Ok(path) => {
                tournament.import_roster_csv(File::open(&path)?)?;
            }
            Err(_) => {
                tournament.bootstrap_roster()?;
            }
        }
    }

    let mut rng = rand::thread_rng();
    for _ in 0..rounds {
        let round = tournament.swiss_pairings()?;
        println!("Round {}", round.round);
        for p in &round.pairings {
            println!("  {} ({}) vs {} ({})", p.name_1, p.id_1, p.name_2, p.id_2);
        }
        if let Some(bye) = &round.bye {
            println!("  bye: {} ({})", bye.name, bye.id);
        }
        tournament.simulate_round(round.round, &mut rng)?;
    }

    println!();
    tournament.write_standings_csv(std::io::stdout())?;

    if let Some(path) = &state_file {
        tournament.store().save_json(path)?;
        log::info!("Saved state to {}", path.display());
    }
    Ok(())
}
