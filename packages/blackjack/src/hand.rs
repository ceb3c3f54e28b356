use crate::Rank;

/// Calculate the value of a blackjack hand.
///
/// Every Ace starts at 11 and is knocked down to 1, one at a time, while the
/// total is over 21. The result may still be over 21.
/// Saturates at `u16::MAX` for absurdly long slices.
pub fn hand_value(ranks: &[Rank]) -> u16 {
    let mut total: u32 = 0;
    let mut aces: u32 = 0;

    for rank in ranks {
        if *rank == Rank::Ace {
            aces += 1;
        }
        total += u32::from(rank.point_value());
    }

    // Adjust for aces
    while total > 21 && aces > 0 {
        total -= 10; // Count ace as 1 instead of 11
        aces -= 1;
    }

    u16::try_from(total).unwrap_or(u16::MAX)
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(ranks: &[Rank]) -> bool {
    if !ranks.contains(&Rank::Ace) {
        return false;
    }
    let hard: u32 = ranks
        .iter()
        .map(|r| if *r == Rank::Ace { 1 } else { u32::from(r.point_value()) })
        .sum();
    hard + 10 == u32::from(hand_value(ranks))
}

pub fn is_busted(ranks: &[Rank]) -> bool {
    hand_value(ranks) > 21
}

/// Check if a hand is a natural (21 with 2 cards)
pub fn is_natural(ranks: &[Rank]) -> bool {
    ranks.len() == 2 && hand_value(ranks) == 21
}

/// Check if a hand is a splittable pair (two cards of the same rank)
pub fn can_split_ranks(ranks: &[Rank]) -> bool {
    ranks.len() == 2 && ranks[0] == ranks[1]
}

/// Add a card to a running total, returning the new (total, is_soft).
///
/// Aces are passed as 1 and counted as 11 when that does not bust. A soft
/// total that goes over 21 drops its high Ace to 1, whatever card was drawn.
pub fn add_to_total(total: u8, is_soft: bool, card: u8) -> (u8, bool) {
    let mut total = total.saturating_add(card);
    let mut soft = is_soft;

    if card == 1 && total + 10 <= 21 {
        total += 10;
        soft = true;
    }
    if total > 21 && soft {
        total -= 10;
        soft = false;
    }

    (total, soft)
}
