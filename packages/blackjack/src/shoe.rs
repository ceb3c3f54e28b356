use serde::{Deserialize, Serialize};

use crate::{Error, Rank};

/// Card counts by blackjack value class.
/// Index 0=Ace, 1=Two, 2=Three, ..., 8=Nine, 9=Ten/J/Q/K.
/// Single deck: [4,4,4,4,4,4,4,4,4,16].
pub type Shoe = [u16; 10];

/// Multiplicity of every rank in a full shoe, indexed by `Rank::index()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    counts: [u16; 13],
}

impl DeckComposition {
    pub fn standard(num_decks: u8) -> Self {
        Self {
            counts: [4 * num_decks as u16; 13],
        }
    }

    pub fn from_counts(counts: [u16; 13]) -> Self {
        Self { counts }
    }

    pub fn count(&self, rank: Rank) -> u16 {
        self.counts[rank.index()]
    }

    /// Number of cards in the shoe, saturating at `u16::MAX`. Only
    /// meaningful for a composition that passes `validate`.
    pub fn total(&self) -> u16 {
        u16::try_from(self.card_count()).unwrap_or(u16::MAX)
    }

    fn card_count(&self) -> u32 {
        self.counts.iter().map(|&n| u32::from(n)).sum()
    }

    /// Rejects a shoe too large to count in `u16`.
    pub fn validate(&self) -> Result<(), Error> {
        let cards = self.card_count();
        if cards > u32::from(u16::MAX) {
            return Err(Error::InvalidRules(format!(
                "deck holds {cards} cards, at most {} supported",
                u16::MAX
            )));
        }
        Ok(())
    }
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self::standard(1)
    }
}

/// The unseen cards: deck composition minus everything revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Population {
    counts: [u16; 13],
    total: u16,
}

/// Derive the remaining population from a deck and the revealed ranks.
///
/// Fails with `Error::InvalidRules` for an oversized deck and with
/// `Error::InvalidState` when more cards of a rank are revealed than the deck
/// holds.
pub fn remaining(deck: &DeckComposition, revealed: &[Rank]) -> Result<Population, Error> {
    deck.validate()?;

    let mut seen = [0u16; 13];
    for rank in revealed {
        seen[rank.index()] = seen[rank.index()].saturating_add(1);
    }

    let mut counts = [0u16; 13];
    for rank in Rank::ALL {
        let i = rank.index();
        let available = deck.counts[i];
        counts[i] = available
            .checked_sub(seen[i])
            .ok_or(Error::InvalidState {
                rank,
                revealed: seen[i],
                available,
            })?;
    }

    let population = Population::from_counts(counts);
    debug_assert_eq!(
        population.total as usize,
        deck.total() as usize - revealed.len()
    );
    Ok(population)
}

impl Population {
    /// Counts summing past `u16::MAX` saturate the total.
    pub fn from_counts(counts: [u16; 13]) -> Self {
        let total: u32 = counts.iter().map(|&n| u32::from(n)).sum();
        Self {
            counts,
            total: u16::try_from(total).unwrap_or(u16::MAX),
        }
    }

    pub fn count(&self, rank: Rank) -> u16 {
        self.counts[rank.index()]
    }

    pub fn total(&self) -> u16 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Probability that the next card drawn has this rank.
    pub fn probability(&self, rank: Rank) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(rank) as f64 / self.total as f64
    }

    /// The population after one card of `rank` is drawn.
    pub fn without(&self, rank: Rank) -> Option<Population> {
        let i = rank.index();
        if self.counts[i] == 0 {
            return None;
        }
        let mut next = *self;
        next.counts[i] -= 1;
        next.total -= 1;
        Some(next)
    }

    /// Ranks with at least one card left, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, u16)> + '_ {
        Rank::ALL
            .into_iter()
            .map(|rank| (rank, self.count(rank)))
            .filter(|&(_, n)| n > 0)
    }

    /// Counts folded into value classes; ten-value ranks share one slot.
    pub fn by_value(&self) -> Shoe {
        let mut shoe = [0u16; 10];
        for rank in Rank::ALL {
            shoe[rank.value_index()] += self.count(rank);
        }
        shoe
    }
}
