use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest point value a card carries
pub const MIN_CARD_VALUE: u32 = 2;
/// Point value of an ace; aces are never counted low
pub const ACE_VALUE: u32 = 11;

/// A playing card reduced to its point value.
///
/// Suits and ranks are irrelevant to scoring, so two cards with the same
/// value are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    value: u32,
}

impl Card {
    pub fn new(value: u32) -> Self {
        Card { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_ace(&self) -> bool {
        self.value == ACE_VALUE
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
