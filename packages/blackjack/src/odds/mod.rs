mod dealer;

use serde::{Deserialize, Serialize};

use crate::hand::{can_split_ranks, hand_value, is_natural};
use crate::strategy::{recommend, Action};
use crate::{GameRules, Population, Rank};

pub use dealer::{DealerOutcomes, StandResult};
use dealer::DealerSimulator;

/// Outcome probabilities for each action branch at the two-card decision point.
///
/// Branches are independent and need not sum to one across actions. Within
/// the hit branch, `hit_bust + hit_win + hit_blackjack <= 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub hit_bust: f64,
    pub hit_win: f64,
    pub hit_blackjack: f64,
    pub stand_win: f64,
    pub stand_lose: f64,
    pub split_win: f64,
    pub split_bust: f64,
}

impl OutcomeProbabilities {
    pub fn hit_success(&self) -> f64 {
        self.hit_win + self.hit_blackjack
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HitOutcome {
    bust: f64,
    win: f64,
    blackjack: f64,
}

/// Exact combinatorial outcome calculator.
///
/// Every probability is (weight of favourable draws) / (cards remaining),
/// with the dealer's play enumerated over the shrinking population rather
/// than sampled.
pub struct OddsCalculator {
    rules: GameRules,
    dealer: DealerSimulator,
}

impl OddsCalculator {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            dealer: DealerSimulator::new(rules),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Outcome probabilities for `player` against `dealer_up`, drawing from
    /// `population`. The caller guarantees a two-card hand and a non-empty
    /// population; memo tables are reset on every call.
    pub fn calculate(
        &mut self,
        player: &[Rank],
        dealer_up: Rank,
        population: &Population,
    ) -> OutcomeProbabilities {
        self.dealer.clear();

        let stand = self.stand_result(player, dealer_up, population, true);
        let hit = self.hit_outcome(player, dealer_up, population);
        let (split_win, split_bust) = if can_split_ranks(player) {
            self.split_outcome(player, dealer_up, population)
        } else {
            (0.0, 0.0)
        };

        log::trace!("dealer memo entries: {}", self.dealer.cache_len());

        OutcomeProbabilities {
            hit_bust: hit.bust,
            hit_win: hit.win,
            hit_blackjack: hit.blackjack,
            stand_win: stand.win,
            stand_lose: stand.lose,
            split_win,
            split_bust,
        }
    }

    /// Distribution of the dealer's final hand from the up-card.
    pub fn dealer_outcomes(&mut self, dealer_up: Rank, population: &Population) -> DealerOutcomes {
        self.dealer.from_upcard(population.by_value(), dealer_up)
    }

    // ── Stand ──

    fn stand_result(
        &mut self,
        hand: &[Rank],
        dealer_up: Rank,
        population: &Population,
        natural_counts: bool,
    ) -> StandResult {
        let total = hand_value(hand);
        if total > 21 {
            return StandResult {
                lose: 1.0,
                ..Default::default()
            };
        }
        let natural = natural_counts && is_natural(hand);
        self.dealer_outcomes(dealer_up, population)
            .stand_result(total as u8, natural)
    }

    // ── Hit once, then stand ──

    fn hit_outcome(&mut self, hand: &[Rank], dealer_up: Rank, population: &Population) -> HitOutcome {
        let mut outcome = HitOutcome::default();
        if population.is_empty() {
            return outcome;
        }

        let before = hand_value(hand);
        let total = population.total() as f64;
        let mut drawn = hand.to_vec();

        for (rank, count) in population.iter() {
            let p = count as f64 / total;
            drawn.push(rank);
            let value = hand_value(&drawn);
            drawn.pop();

            if value > 21 {
                outcome.bust += p;
            } else if completes_blackjack(before, rank) {
                outcome.blackjack += p;
            } else if let Some(rest) = population.without(rank) {
                let dealer = self.dealer_outcomes(dealer_up, &rest);
                outcome.win += p * dealer.stand_result(value as u8, false).win;
            }
        }

        outcome
    }

    // ── Split ──

    /// Average of the two post-split hands.
    fn split_outcome(&mut self, pair: &[Rank], dealer_up: Rank, population: &Population) -> (f64, f64) {
        let mut win = 0.0;
        let mut bust = 0.0;
        for &card in pair {
            let (w, b) = self.split_hand(card, dealer_up, population);
            win += w;
            bust += b;
        }
        let n = pair.len() as f64;
        (win / n, bust / n)
    }

    /// One post-split hand: draw its second card, then hit once or stand,
    /// whichever the decision policy prefers for that two-card hand.
    fn split_hand(&mut self, card: Rank, dealer_up: Rank, population: &Population) -> (f64, f64) {
        if population.is_empty() {
            let stand = self.stand_result(&[card], dealer_up, population, false);
            return (stand.win, 0.0);
        }

        let total = population.total() as f64;
        let mut win = 0.0;
        let mut bust = 0.0;

        for (rank, count) in population.iter() {
            let Some(rest) = population.without(rank) else {
                continue;
            };
            let p = count as f64 / total;
            let hand = [card, rank];

            // A post-split 21 is not a natural.
            let stand = self.stand_result(&hand, dealer_up, &rest, false);
            let hit = self.hit_outcome(&hand, dealer_up, &rest);
            let sub = OutcomeProbabilities {
                hit_bust: hit.bust,
                hit_win: hit.win,
                hit_blackjack: hit.blackjack,
                stand_win: stand.win,
                stand_lose: stand.lose,
                ..Default::default()
            };

            match recommend(&sub, false) {
                Action::Hit => {
                    win += p * sub.hit_success();
                    bust += p * sub.hit_bust;
                }
                _ => win += p * sub.stand_win,
            }
        }

        (win, bust)
    }
}

/// A draw that turns a ten-equivalent hand plus an Ace, or an
/// Ace-equivalent (11) hand plus a ten-value card, into 21.
fn completes_blackjack(total_before: u16, drawn: Rank) -> bool {
    (total_before == 10 && drawn == Rank::Ace) || (total_before == 11 && drawn.is_ten_value())
}

#[cfg(test)]
mod tests;
