//! Engine configuration: pairing policies, read from the environment by the demo binary.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when an odd number of players is registered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddPlayerPolicy {
    /// Refuse to pair; nobody is silently left out.
    #[default]
    Reject,
    /// Lowest-ranked player without a previous bye sits out and is credited a win.
    Bye,
}

/// Whether previously matched players may meet again.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RematchPolicy {
    /// Plain adjacent pairing down the standings.
    #[default]
    Allow,
    /// Skip past opponents already met, falling back to the adjacent player when none is left.
    Avoid,
}

impl FromStr for OddPlayerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "bye" => Ok(Self::Bye),
            other => Err(format!("unknown odd player policy '{}'", other)),
        }
    }
}

impl FromStr for RematchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "avoid" => Ok(Self::Avoid),
            other => Err(format!("unknown rematch policy '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub odd_players: OddPlayerPolicy,
    pub rematches: RematchPolicy,
    /// Refuse to start a round while the previous one still has unreported matches.
    pub enforce_round_completion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            odd_players: OddPlayerPolicy::default(),
            rematches: RematchPolicy::default(),
            enforce_round_completion: true,
        }
    }
}

impl EngineConfig {
    /// Read `SWISS_ODD_PLAYERS`, `SWISS_REMATCHES` and `SWISS_ENFORCE_ROUND_COMPLETION`.
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            odd_players: parse_or(lookup("SWISS_ODD_PLAYERS"), defaults.odd_players),
            rematches: parse_or(lookup("SWISS_REMATCHES"), defaults.rematches),
            enforce_round_completion: parse_or(
                lookup("SWISS_ENFORCE_ROUND_COMPLETION"),
                defaults.enforce_round_completion,
            ),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("Ignoring unparsable config value '{}'", raw);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_reject_odd_and_allow_rematches() {
        let config = EngineConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.odd_players, OddPlayerPolicy::Reject);
        assert_eq!(config.rematches, RematchPolicy::Allow);
        assert!(config.enforce_round_completion);
    }

    #[test]
    fn reads_policies_case_insensitively() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SWISS_ODD_PLAYERS", "Bye"),
            ("SWISS_REMATCHES", " AVOID "),
            ("SWISS_ENFORCE_ROUND_COMPLETION", "false"),
        ]));
        assert_eq!(config.odd_players, OddPlayerPolicy::Bye);
        assert_eq!(config.rematches, RematchPolicy::Avoid);
        assert!(!config.enforce_round_completion);
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SWISS_ODD_PLAYERS", "coinflip"),
            ("SWISS_ENFORCE_ROUND_COMPLETION", "maybe"),
        ]));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn deserializes_snake_case_with_missing_fields() {
        let config: EngineConfig = serde_json::from_str(r#"{ "odd_players": "bye" }"#).unwrap();
        assert_eq!(config.odd_players, OddPlayerPolicy::Bye);
        assert_eq!(config.rematches, RematchPolicy::Allow);
        assert!(config.enforce_round_completion);
    }
}
