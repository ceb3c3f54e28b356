use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OutcomeProbabilities;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    Split,
}

impl Action {
    pub fn symbol(&self) -> &'static str {
        match self {
            Action::Hit => "H",
            Action::Stand => "S",
            Action::Split => "P",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
            Action::Split => "Split",
        };
        f.write_str(name)
    }
}

/// Pick the action with the best success probability.
///
/// Split must strictly beat both hit and stand. Between hit and stand a tie
/// goes to Stand.
pub fn recommend(probabilities: &OutcomeProbabilities, can_split: bool) -> Action {
    let hit_success = probabilities.hit_success();
    let stand_success = probabilities.stand_win;

    if can_split
        && probabilities.split_win > hit_success
        && probabilities.split_win > stand_success
    {
        return Action::Split;
    }

    if hit_success > stand_success {
        Action::Hit
    } else {
        Action::Stand
    }
}
