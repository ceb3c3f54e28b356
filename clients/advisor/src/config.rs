use std::fs;
use std::path::Path;

use blackjack_odds::{DeckComposition, GameRules};
use serde::{Deserialize, Serialize};

use crate::BoxErr;

/// Contents of the optional JSON config file.
///
/// ```json
/// { "rules": { "num_decks": 2, "dealer_hits_soft_17": true } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: GameRules,
    /// Custom shoe; falls back to `rules.num_decks` standard decks.
    pub deck: Option<DeckComposition>,
}

pub fn parse_config(content: &str) -> Result<Config, BoxErr> {
    let config: Config = serde_json::from_str(content)?;
    config.rules.validate()?;
    if let Some(deck) = &config.deck {
        deck.validate()?;
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, BoxErr> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {e}", path.display()))?;
    parse_config(&content)
}

pub fn preset(name: &str) -> Result<GameRules, BoxErr> {
    match name {
        "single_deck" => Ok(GameRules::single_deck()),
        "single_deck_h17" => Ok(GameRules::single_deck_h17()),
        "six_deck" => Ok(GameRules::six_deck()),
        _ => Err(format!(
            "Unknown preset '{name}'. Available: single_deck, single_deck_h17, six_deck"
        )
        .into()),
    }
}
