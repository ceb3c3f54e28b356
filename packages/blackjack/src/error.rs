use thiserror::Error;

use crate::{CardId, Rank};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid state: {revealed} x {rank} revealed but the deck holds only {available}")]
    InvalidState {
        rank: Rank,
        revealed: u16,
        available: u16,
    },
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
    #[error("Unknown rank: {0:?}")]
    UnknownRank(String),
    #[error("Duplicate card: {0} revealed more than once")]
    DuplicateCard(CardId),
}
