pub mod types;

pub use types::{Card, ACE_VALUE, MIN_CARD_VALUE};
