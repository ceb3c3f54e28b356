mod advisor;
mod card;
mod error;
mod hand;
mod odds;
mod rules;
mod shoe;
mod strategy;

pub use advisor::{evaluate, Advice, Evaluation, Situation};
pub use card::{Card, CardId, Rank};
pub use error::Error;
pub use hand::{add_to_total, can_split_ranks, hand_value, is_busted, is_natural, is_soft_hand};
pub use odds::{DealerOutcomes, OddsCalculator, OutcomeProbabilities, StandResult};
pub use rules::{GameRules, MIN_STAND_THRESHOLD};
pub use shoe::{remaining, DeckComposition, Population, Shoe};
pub use strategy::{recommend, Action};
