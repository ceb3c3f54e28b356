use serde::{Deserialize, Serialize};

use crate::{DeckComposition, Error};

/// Lowest stand threshold accepted by `GameRules::validate`.
pub const MIN_STAND_THRESHOLD: u8 = 12;

/// Configurable dealer rules for the odds engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Number of decks in the shoe
    pub num_decks: u8,

    /// Dealer stands once the hand reaches this total
    pub dealer_stands_on: u8,

    /// Dealer hits a soft total equal to `dealer_stands_on`
    pub dealer_hits_soft_17: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self::single_deck()
    }
}

impl GameRules {
    /// Single deck, dealer stands on all 17s
    pub fn single_deck() -> Self {
        Self {
            num_decks: 1,
            dealer_stands_on: 17,
            dealer_hits_soft_17: false,
        }
    }

    /// Single deck, dealer hits soft 17
    pub fn single_deck_h17() -> Self {
        Self {
            dealer_hits_soft_17: true,
            ..Self::single_deck()
        }
    }

    /// Six deck shoe, dealer stands on all 17s
    pub fn six_deck() -> Self {
        Self {
            num_decks: 6,
            ..Self::single_deck()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.num_decks == 0 {
            return Err(Error::InvalidRules("num_decks must be at least 1".to_string()));
        }
        if !(MIN_STAND_THRESHOLD..=21).contains(&self.dealer_stands_on) {
            return Err(Error::InvalidRules(format!(
                "dealer_stands_on must be within {}..=21, got {}",
                MIN_STAND_THRESHOLD, self.dealer_stands_on
            )));
        }
        Ok(())
    }

    /// Standard composition for `num_decks` full decks.
    pub fn deck(&self) -> DeckComposition {
        DeckComposition::standard(self.num_decks)
    }

    /// Whether a dealer holding `total` (soft or hard) draws another card.
    pub fn dealer_must_hit(&self, total: u8, is_soft: bool) -> bool {
        if total < self.dealer_stands_on {
            true
        } else if total == self.dealer_stands_on {
            is_soft && self.dealer_hits_soft_17
        } else {
            false
        }
    }
}
