use std::collections::HashSet;

use serde::Serialize;

use crate::hand::{can_split_ranks, hand_value};
use crate::shoe::remaining;
use crate::strategy::{recommend, Action};
use crate::{Card, DeckComposition, Error, GameRules, OddsCalculator, OutcomeProbabilities, Rank};

/// Immutable input for one engine call: the deck the cards came from, the
/// player's hand and the dealer's up-card, as ranks only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Situation {
    pub deck: DeckComposition,
    pub player: Vec<Rank>,
    pub dealer_up: Option<Rank>,
}

impl Situation {
    pub fn new(deck: DeckComposition, player: Vec<Rank>, dealer_up: Option<Rank>) -> Self {
        Self {
            deck,
            player,
            dealer_up,
        }
    }

    /// Build a situation from picked cards, dropping their identities.
    /// The same card may not appear twice.
    pub fn from_cards(
        deck: DeckComposition,
        player: &[Card],
        dealer_up: Option<&Card>,
    ) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for card in player.iter().chain(dealer_up) {
            if !seen.insert(card.id()) {
                return Err(Error::DuplicateCard(card.id()));
            }
        }
        Ok(Self {
            deck,
            player: player.iter().map(Card::rank).collect(),
            dealer_up: dealer_up.map(Card::rank),
        })
    }

    /// Every rank known to be out of the population.
    pub fn revealed(&self) -> Vec<Rank> {
        self.player.iter().copied().chain(self.dealer_up).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Advice {
    pub probabilities: OutcomeProbabilities,
    pub action: Action,
    pub player_total: u16,
    pub can_split: bool,
}

/// Result of one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Evaluation {
    Advice(Advice),
    /// Not at the two-card decision point yet (or past it).
    NotComputable {
        player_cards: usize,
        dealer_cards: usize,
    },
    /// No unseen cards remain; every probability is reported as zero.
    InsufficientPopulation(OutcomeProbabilities),
}

impl Evaluation {
    pub fn advice(&self) -> Option<&Advice> {
        match self {
            Evaluation::Advice(advice) => Some(advice),
            _ => None,
        }
    }
}

/// Run the whole pipeline: revealed cards, remaining population, outcome
/// probabilities, recommended action.
pub fn evaluate(rules: &GameRules, situation: &Situation) -> Result<Evaluation, Error> {
    rules.validate()?;
    situation.deck.validate()?;

    let population = remaining(&situation.deck, &situation.revealed())?;

    let dealer_up = match situation.dealer_up {
        Some(up) if situation.player.len() == 2 => up,
        _ => {
            log::debug!(
                "Decision point not reached: {} player cards, dealer up-card {}",
                situation.player.len(),
                if situation.dealer_up.is_some() { "known" } else { "missing" }
            );
            return Ok(Evaluation::NotComputable {
                player_cards: situation.player.len(),
                dealer_cards: usize::from(situation.dealer_up.is_some()),
            });
        }
    };

    if population.is_empty() {
        log::debug!("No unseen cards remain, reporting zero probabilities");
        return Ok(Evaluation::InsufficientPopulation(OutcomeProbabilities::default()));
    }

    let probabilities =
        OddsCalculator::new(*rules).calculate(&situation.player, dealer_up, &population);
    let can_split = can_split_ranks(&situation.player);
    let action = recommend(&probabilities, can_split);

    log::debug!(
        "{}{} vs {}: {} ({} unseen cards)",
        situation.player[0],
        situation.player[1],
        dealer_up,
        action,
        population.total()
    );

    Ok(Evaluation::Advice(Advice {
        probabilities,
        action,
        player_total: hand_value(&situation.player),
        can_split,
    }))
}
