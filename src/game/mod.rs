pub mod state;
pub mod zones;

pub use state::{Outcome, RoundPhase};
pub use zones::{Deck, GameError, Hand, DECK_SIZE};
