use std::collections::HashMap;

use serde::Serialize;

use crate::hand::add_to_total;
use crate::shoe::Shoe;
use crate::{GameRules, Rank};

/// Terminal distribution of the dealer's hand.
///
/// `totals[t]` is the probability the dealer stands on `t`. Totals under the
/// stand threshold only appear when the population runs dry mid-draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DealerOutcomes {
    pub bust: f64,
    pub natural: f64,
    totals: [f64; 22],
}

/// Probabilities of a fixed player total against a dealer distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StandResult {
    pub win: f64,
    pub push: f64,
    pub lose: f64,
}

impl DealerOutcomes {
    fn busted() -> Self {
        Self {
            bust: 1.0,
            ..Default::default()
        }
    }

    fn stood_on(total: u8) -> Self {
        let mut outcomes = Self::default();
        outcomes.totals[total as usize] = 1.0;
        outcomes
    }

    fn add_scaled(&mut self, rhs: &Self, p: f64) {
        self.bust += rhs.bust * p;
        self.natural += rhs.natural * p;
        for (t, q) in self.totals.iter_mut().zip(rhs.totals.iter()) {
            *t += q * p;
        }
    }

    /// Probability the dealer stands on exactly `total` without a natural.
    pub fn total(&self, total: u8) -> f64 {
        self.totals.get(total as usize).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.bust + self.natural + self.totals.iter().sum::<f64>()
    }

    /// Compare a player standing on `player_total` against this distribution.
    /// A player natural never loses; it pushes against a dealer natural.
    pub fn stand_result(&self, player_total: u8, player_natural: bool) -> StandResult {
        if player_total > 21 {
            return StandResult {
                lose: 1.0,
                ..Default::default()
            };
        }
        if player_natural {
            return StandResult {
                win: 1.0 - self.natural,
                push: self.natural,
                lose: 0.0,
            };
        }

        let p = player_total as usize;
        StandResult {
            win: self.bust + self.totals[..p].iter().sum::<f64>(),
            push: self.totals[p],
            lose: self.natural + self.totals[p + 1..].iter().sum::<f64>(),
        }
    }
}

/// Points of each value class, Ace counted low.
const CLASS_POINTS: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

fn is_exhausted(shoe: &Shoe) -> bool {
    shoe.iter().all(|&n| n == 0)
}

/// Every possible next card: its points, its probability and the shoe left
/// behind once it is drawn.
fn draws(shoe: &Shoe) -> impl Iterator<Item = (u8, f64, Shoe)> + '_ {
    let total: u32 = shoe.iter().map(|&n| u32::from(n)).sum();
    shoe.iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(move |(class, &n)| {
            let mut rest = *shoe;
            rest[class] -= 1;
            (CLASS_POINTS[class], f64::from(n) / f64::from(total), rest)
        })
}

/// Exact enumeration of the dealer's draws without replacement, memoized on
/// (population, dealer total, softness).
pub(crate) struct DealerSimulator {
    rules: GameRules,
    cache: HashMap<(Shoe, u8, bool), DealerOutcomes>,
    upcard_cache: HashMap<(Shoe, usize), DealerOutcomes>,
}

impl DealerSimulator {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            cache: HashMap::new(),
            upcard_cache: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.upcard_cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len() + self.upcard_cache.len()
    }

    /// Dealer outcomes starting from the up-card alone; the hole card is the
    /// first draw from `shoe`. A two-card 21 is recorded as a natural.
    pub fn from_upcard(&mut self, shoe: Shoe, upcard: Rank) -> DealerOutcomes {
        let key = (shoe, upcard.value_index());
        if let Some(&cached) = self.upcard_cache.get(&key) {
            return cached;
        }

        let (value, soft) = add_to_total(0, false, CLASS_POINTS[upcard.value_index()]);
        let mut result = DealerOutcomes::default();
        if is_exhausted(&shoe) {
            result = DealerOutcomes::stood_on(value);
        }
        for (points, p, rest) in draws(&shoe) {
            let (next, next_soft) = add_to_total(value, soft, points);
            if next == 21 {
                result.natural += p;
            } else {
                let sub = self.from_total(rest, next, next_soft);
                result.add_scaled(&sub, p);
            }
        }

        self.upcard_cache.insert(key, result);
        result
    }

    /// Recursive dealer outcomes from a given hand state.
    fn from_total(&mut self, shoe: Shoe, value: u8, is_soft: bool) -> DealerOutcomes {
        if value > 21 {
            return DealerOutcomes::busted();
        }
        if !self.rules.dealer_must_hit(value, is_soft) || is_exhausted(&shoe) {
            return DealerOutcomes::stood_on(value);
        }
        if let Some(&cached) = self.cache.get(&(shoe, value, is_soft)) {
            return cached;
        }

        let mut result = DealerOutcomes::default();
        for (points, p, rest) in draws(&shoe) {
            let (next, next_soft) = add_to_total(value, is_soft, points);
            let sub = self.from_total(rest, next, next_soft);
            result.add_scaled(&sub, p);
        }

        self.cache.insert((shoe, value, is_soft), result);
        result
    }
}
