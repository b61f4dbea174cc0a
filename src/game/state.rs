use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Init,
    Dealt,
    PlayerTurn,
    DealerTurn,
    Settled,
}

impl RoundPhase {
    /// Phase reached by the next forward transition.
    /// A settled round starts over at `Init`.
    pub fn next(&self) -> RoundPhase {
        match self {
            RoundPhase::Init => RoundPhase::Dealt,
            RoundPhase::Dealt => RoundPhase::PlayerTurn,
            RoundPhase::PlayerTurn => RoundPhase::DealerTurn,
            RoundPhase::DealerTurn => RoundPhase::Settled,
            RoundPhase::Settled => RoundPhase::Init,
        }
    }
}

/// Result of a settled round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWin,
    DealerWin,
    Draw,
}

impl Outcome {
    /// Compare two totals that are both at or under the bust limit
    pub fn compare(player_total: u32, dealer_total: u32) -> Outcome {
        use std::cmp::Ordering;
        match player_total.cmp(&dealer_total) {
            Ordering::Greater => Outcome::PlayerWin,
            Ordering::Less => Outcome::DealerWin,
            Ordering::Equal => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerWin => write!(f, "Player wins"),
            Outcome::DealerWin => write!(f, "Dealer wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
