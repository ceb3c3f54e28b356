use super::*;
use crate::{remaining, DeckComposition};
use Rank::*;

const EPS: f64 = 1e-9;

fn single_deck_population(revealed: &[Rank]) -> Population {
    remaining(&DeckComposition::standard(1), revealed).unwrap()
}

fn calc(player: [Rank; 2], up: Rank) -> OutcomeProbabilities {
    let mut revealed = player.to_vec();
    revealed.push(up);
    let population = single_deck_population(&revealed);
    OddsCalculator::new(GameRules::single_deck()).calculate(&player, up, &population)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

// ── Dealer ──

#[test]
fn test_dealer_outcomes_sum_to_one() {
    let mut calc = OddsCalculator::new(GameRules::single_deck());
    for up in Rank::ALL {
        let population = single_deck_population(&[Ten, Six, up]);
        let outcomes = calc.dealer_outcomes(up, &population);
        assert!((outcomes.sum() - 1.0).abs() < EPS, "up {up}: sum = {}", outcomes.sum());
    }
}

#[test]
fn test_dealer_six_up_distribution() {
    let mut calc = OddsCalculator::new(GameRules::single_deck());
    let population = single_deck_population(&[Ten, Six, Six]);
    let outcomes = calc.dealer_outcomes(Six, &population);
    assert_close(outcomes.bust, 0.41048855059901224);
    assert_close(outcomes.natural, 0.0);
    assert_close(outcomes.total(17), 0.17196712378468534);
    assert_close(outcomes.total(21), 0.09800631026064768);
    for total in 0..17 {
        assert_eq!(outcomes.total(total), 0.0);
    }
}

#[test]
fn test_dealer_ace_up_natural() {
    let mut calc = OddsCalculator::new(GameRules::single_deck());
    let population = single_deck_population(&[Ten, Six, Ace]);
    let outcomes = calc.dealer_outcomes(Ace, &population);
    // 15 ten-value cards left out of 49.
    assert_close(outcomes.natural, 15.0 / 49.0);
    assert_close(outcomes.bust, 0.12041933612417796);
}

#[test]
fn test_h17_changes_soft_17() {
    let population = single_deck_population(&[Ten, Six, Ace]);
    let s17 = OddsCalculator::new(GameRules::single_deck()).dealer_outcomes(Ace, &population);
    let h17 = OddsCalculator::new(GameRules::single_deck_h17()).dealer_outcomes(Ace, &population);
    assert!(h17.total(17) < s17.total(17));
    assert!((h17.sum() - 1.0).abs() < EPS);
}

#[test]
fn test_dealer_stands_on_upcard_when_population_empty() {
    let mut calc = OddsCalculator::new(GameRules::single_deck());
    let empty = Population::from_counts([0; 13]);
    let outcomes = calc.dealer_outcomes(Nine, &empty);
    assert_eq!(outcomes.total(9), 1.0);
}

fn stand_on_21_h17() -> GameRules {
    GameRules {
        dealer_stands_on: 21,
        dealer_hits_soft_17: true,
        ..GameRules::single_deck()
    }
}

#[test]
fn test_dealer_hitting_soft_21_drops_ace_instead_of_busting() {
    let mut counts = [0u16; 13];
    counts[Five.index()] = 2;
    counts[Ace.index()] = 1;
    let population = Population::from_counts(counts);

    // Every path through A,5,5,A (in any order) ends on a hard 12 with the shoe empty.
    let outcomes = OddsCalculator::new(stand_on_21_h17()).dealer_outcomes(Ace, &population);
    assert_close(outcomes.bust, 0.0);
    assert_close(outcomes.total(12), 1.0);
}

#[test]
fn test_other_stand_thresholds_stay_normalized() {
    for rules in [
        stand_on_21_h17(),
        GameRules {
            dealer_stands_on: 12,
            ..GameRules::single_deck()
        },
    ] {
        let mut calc = OddsCalculator::new(rules);
        for up in [Ace, Six, Ten] {
            let population = single_deck_population(&[Ten, Six, up]);
            let outcomes = calc.dealer_outcomes(up, &population);
            assert!((outcomes.sum() - 1.0).abs() < EPS, "{rules:?} up {up}");
            for total in 0..rules.dealer_stands_on {
                assert_eq!(outcomes.total(total), 0.0, "{rules:?} up {up} total {total}");
            }
        }
    }
}

#[test]
fn test_stand_result_vs_dealer_bust() {
    let mut calc = OddsCalculator::new(GameRules::single_deck());
    let population = single_deck_population(&[Ten, Six, Six]);
    let outcomes = calc.dealer_outcomes(Six, &population);
    // Anything under 17 only wins when the dealer busts.
    let result = outcomes.stand_result(16, false);
    assert_close(result.win, outcomes.bust);
    assert_close(result.push, 0.0);
    assert_close(result.win + result.push + result.lose, 1.0);
}

#[test]
fn test_stand_result_player_natural_pushes_dealer_natural() {
    let mut calc = OddsCalculator::new(GameRules::single_deck());
    let population = single_deck_population(&[Ace, King, Ten]);
    let outcomes = calc.dealer_outcomes(Ten, &population);
    let result = outcomes.stand_result(21, true);
    assert_close(result.push, 3.0 / 49.0);
    assert_close(result.lose, 0.0);
}

// ── Hit ──

#[test]
fn test_hit_bust_on_20() {
    // Only the four Aces keep a hard 20 alive.
    let probs = calc([King, Queen], Five);
    assert_close(probs.hit_bust, 45.0 / 49.0);
}

#[test]
fn test_hit_bust_matches_enumeration() {
    for (player, up) in [([Ten, Six], Ten), ([Nine, Three], Two), ([Ace, Five], Seven)] {
        let mut revealed = player.to_vec();
        revealed.push(up);
        let population = single_deck_population(&revealed);
        let busting: u16 = Rank::ALL
            .iter()
            .filter(|r| hand_value(&[player[0], player[1], **r]) > 21)
            .map(|r| population.count(*r))
            .sum();
        let probs = calc(player, up);
        assert_close(probs.hit_bust, busting as f64 / population.total() as f64);
    }
}

#[test]
fn test_soft_hand_never_busts_on_one_hit() {
    let probs = calc([Ace, Six], Nine);
    assert_eq!(probs.hit_bust, 0.0);
}

#[test]
fn test_hit_blackjack_from_eleven() {
    // 5 + 6: every ten-value card makes 21; 16 of them remain.
    let probs = calc([Five, Six], Six);
    assert_close(probs.hit_blackjack, 16.0 / 49.0);
    assert_close(probs.hit_win, 0.36152555250357177);
}

#[test]
fn test_hit_blackjack_from_ten() {
    let probs = calc([Four, Six], Nine);
    assert_close(probs.hit_blackjack, 4.0 / 49.0);
}

#[test]
fn test_hit_blackjack_zero_for_other_totals() {
    assert_eq!(calc([Ten, Six], Ten).hit_blackjack, 0.0);
    assert_eq!(calc([Ace, Nine], Ten).hit_blackjack, 0.0);
}

#[test]
fn test_hit_branch_partitions() {
    for a in Rank::ALL {
        for b in [Two, Seven, Ace, King] {
            let probs = calc([a, b], Seven);
            let sum = probs.hit_bust + probs.hit_win + probs.hit_blackjack;
            assert!(sum <= 1.0 + EPS, "{a}{b}: {sum}");
            assert!(probs.hit_bust >= 0.0 && probs.hit_win >= 0.0);
        }
    }
}

// ── Stand ──

#[test]
fn test_stand_natural() {
    let probs = calc([Ace, King], Six);
    assert_close(probs.stand_win, 1.0);
    assert_close(probs.stand_lose, 0.0);

    let probs = calc([Ace, King], Ten);
    assert_close(probs.stand_win, 1.0 - 3.0 / 49.0);
}

#[test]
fn test_stand_twenty_vs_five() {
    let probs = calc([King, Queen], Five);
    assert_close(probs.stand_win, 0.7824457977445551);
    assert_close(probs.stand_lose, 0.10877049731959162);
}

// ── Split ──

#[test]
fn test_split_zero_when_ranks_differ() {
    for a in Rank::ALL {
        for b in Rank::ALL {
            if a == b {
                continue;
            }
            let probs = calc([a, b], Eight);
            assert_eq!(probs.split_win, 0.0);
            assert_eq!(probs.split_bust, 0.0);
        }
    }
}

#[test]
fn test_split_ten_and_king_are_not_a_pair() {
    let probs = calc([Ten, King], Six);
    assert_eq!(probs.split_win, 0.0);
}

#[test]
fn test_split_eights_vs_ten() {
    let probs = calc([Eight, Eight], Ten);
    assert_close(probs.split_win, 0.31696878708276766);
    assert_close(probs.split_bust, 0.06122448979591835);
}

#[test]
fn test_split_aces_vs_six() {
    let probs = calc([Ace, Ace], Six);
    assert_close(probs.split_win, 0.6922723579446246);
    assert_eq!(probs.split_bust, 0.0);
}

#[test]
fn test_split_nines_vs_nine() {
    let probs = calc([Nine, Nine], Nine);
    assert_close(probs.split_win, 0.38601143915880437);
    assert_close(probs.split_bust, 0.09183673469387754);
}

// ── Whole record ──

#[test]
fn test_sixteen_vs_ten_regression() {
    let probs = calc([Ten, Six], Ten);
    // Six through King: 3 + 4 + 4 + 4 + 2 + 4 + 4 + 4 = 29.
    assert_close(probs.hit_bust, 29.0 / 49.0);
    assert_close(probs.hit_win, 0.1974240291914034);
    assert_close(probs.hit_blackjack, 0.0);
    assert_close(probs.stand_win, 0.20986904671323858);
    assert_close(probs.stand_lose, 0.7901309532867613);
}

#[test]
fn test_six_deck_sixteen_vs_ten() {
    let rules = GameRules::six_deck();
    let population = remaining(&rules.deck(), &[Ten, Six, Ten]).unwrap();
    let probs = OddsCalculator::new(rules).calculate(&[Ten, Six], Ten, &population);
    assert_close(probs.hit_bust, 0.6116504854368932);
    assert_close(probs.hit_win, 0.18699745832472514);
    assert_close(probs.stand_win, 0.2116957684135563);
}

#[test]
fn test_soft_18_vs_ten_h17() {
    let population = single_deck_population(&[Ace, Seven, Ten]);
    let probs = OddsCalculator::new(GameRules::single_deck_h17()).calculate(&[Ace, Seven], Ten, &population);
    assert_close(probs.hit_win, 0.3518474976120013);
    assert_close(probs.stand_win, 0.3227352057073215);
    assert_close(probs.stand_lose, 0.5587477790993054);
}

#[test]
fn test_probabilities_within_unit_interval() {
    for a in Rank::ALL {
        for up in [Two, Six, Ten, Ace] {
            let p = calc([a, a], up);
            for value in [
                p.hit_bust,
                p.hit_win,
                p.hit_blackjack,
                p.stand_win,
                p.stand_lose,
                p.split_win,
                p.split_bust,
            ] {
                assert!((0.0..=1.0 + EPS).contains(&value), "{a}{a} vs {up}: {p:?}");
            }
        }
    }
}

#[test]
fn test_calculation_is_reproducible() {
    let population = single_deck_population(&[Nine, Nine, Nine]);
    let mut calc = OddsCalculator::new(GameRules::single_deck());
    let first = calc.calculate(&[Nine, Nine], Nine, &population);
    let second = calc.calculate(&[Nine, Nine], Nine, &population);
    assert_eq!(first, second);
}

#[test]
fn test_face_cards_share_value_class() {
    // Swapping which ten-value rank was revealed cannot change any outcome.
    let a = calc([Ten, Six], King);
    let b = calc([Jack, Six], Queen);
    assert_close(a.stand_win, b.stand_win);
    assert_close(a.hit_win, b.hit_win);
    assert_close(a.hit_bust, b.hit_bust);
}

#[test]
fn test_completes_blackjack() {
    assert!(completes_blackjack(10, Ace));
    assert!(completes_blackjack(11, Queen));
    assert!(!completes_blackjack(11, Nine));
    assert!(!completes_blackjack(12, Nine));
    assert!(!completes_blackjack(10, King));
}
