use crate::card::{Card, ACE_VALUE, MIN_CARD_VALUE};
use crate::rng::RandomSource;
use std::fmt;
use thiserror::Error;

/// Number of cards in a freshly built deck
pub const DECK_SIZE: usize = 52;
/// Copies of each value from 2 through 9, and of the ace
const COPIES_PER_VALUE: usize = 4;
/// Ten, jack, queen and king all count as 10
const TEN_VALUE_CARDS: usize = 16;

/// Errors raised by deck and hand operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot deal from an empty deck")]
    EmptyDeck,
    #[error("index {index} out of range for {len} cards")]
    IndexOutOfRange { index: usize, len: usize },
}

fn render_cards(f: &mut fmt::Formatter<'_>, cards: &[Card]) -> fmt::Result {
    let values: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
    let total: u32 = cards.iter().map(|c| c.value()).sum();
    write!(f, "[{}] : {}", values.join(", "), total)
}

/// Deck - ordered stack of cards, dealt from the front
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a deck holding the full, unshuffled composition
    pub fn new() -> Self {
        let mut deck = Deck {
            cards: Vec::with_capacity(DECK_SIZE),
        };
        deck.build();
        deck
    }

    /// Create a deck with an explicit dealing order, front first
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    /// Discard the remaining cards and refill in build order:
    /// four each of 2..=9, sixteen 10s, four aces.
    pub fn build(&mut self) {
        self.cards.clear();
        for value in MIN_CARD_VALUE..=9 {
            for _ in 0..COPIES_PER_VALUE {
                self.cards.push(Card::new(value));
            }
        }
        for _ in 0..TEN_VALUE_CARDS {
            self.cards.push(Card::new(10));
        }
        for _ in 0..COPIES_PER_VALUE {
            self.cards.push(Card::new(ACE_VALUE));
        }
    }

    /// Two-index swap shuffle.
    ///
    /// Step `i` draws two independent indices from the window `[0, size - i)`
    /// and swaps them. The result is not a uniform permutation, and a step
    /// may swap a card with itself. Must not be replaced by Fisher-Yates;
    /// the win rates depend on this exact procedure.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        let size = self.cards.len();
        for i in 0..size {
            let window = size - i;
            let a = rng.random_range(window);
            let b = rng.random_range(window);
            self.cards.swap(a, b);
        }
    }

    /// Remove and return the front card
    pub fn deal(&mut self) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            Err(GameError::EmptyDeck)
        } else {
            Ok(self.cards.remove(0))
        }
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_cards(f, &self.cards)
    }
}

/// Hand - cards held by one party, in draw order
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Empty the hand. Cards are dropped, not returned to any deck.
    pub fn reset(&mut self) {
        self.cards.clear();
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Card, GameError> {
        self.cards.get(index).ok_or(GameError::IndexOutOfRange {
            index,
            len: self.cards.len(),
        })
    }

    /// Hard total: every card counts at face value, aces always 11
    pub fn total_value(&self) -> u32 {
        self.cards.iter().map(|c| c.value()).sum()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_cards(f, &self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ZeroSource};
    use std::collections::HashMap;

    /// Replays a fixed script of indices
    struct ScriptedSource {
        script: Vec<usize>,
        pos: usize,
    }

    impl RandomSource for ScriptedSource {
        fn random_range(&mut self, max: usize) -> usize {
            let v = self.script[self.pos % self.script.len()] % max;
            self.pos += 1;
            v
        }
    }

    fn composition(cards: &[Card]) -> HashMap<u32, usize> {
        let mut counts = HashMap::new();
        for card in cards {
            *counts.entry(card.value()).or_insert(0) += 1;
        }
        counts
    }

    fn assert_standard_composition(cards: &[Card]) {
        assert_eq!(cards.len(), DECK_SIZE);
        let counts = composition(cards);
        for value in 2..=9 {
            assert_eq!(counts[&value], 4, "value {} should appear 4 times", value);
        }
        assert_eq!(counts[&10], 16);
        assert_eq!(counts[&11], 4);
        assert_eq!(counts.len(), 10);
    }

    #[test]
    fn test_new_deck_composition() {
        let deck = Deck::new();
        assert_eq!(deck.size(), 52);
        assert_standard_composition(deck.cards());
    }

    #[test]
    fn test_build_order_is_ascending() {
        let deck = Deck::new();
        let values: Vec<u32> = deck.cards().iter().map(|c| c.value()).collect();
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(values, sorted);
        assert_eq!(values[0], 2);
        assert_eq!(values[51], 11);
    }

    #[test]
    fn test_build_discards_remaining_cards() {
        let mut deck = Deck::new();
        for _ in 0..30 {
            deck.deal().unwrap();
        }
        deck.build();
        assert_standard_composition(deck.cards());
    }

    #[test]
    fn test_unshuffled_deal_order() {
        let mut deck = Deck::new();
        let dealt: Vec<u32> = (0..4).map(|_| deck.deal().unwrap().value()).collect();
        assert_eq!(dealt, vec![2, 2, 2, 2]);
        assert_eq!(deck.deal().unwrap().value(), 3);
    }

    #[test]
    fn test_deal_reduces_size_by_one() {
        let mut deck = Deck::new();
        let mut rng = GameRng::new(Some(3));
        deck.shuffle(&mut rng);
        let before = composition(deck.cards());
        let card = deck.deal().unwrap();
        assert_eq!(deck.size(), 51);
        assert!(before.contains_key(&card.value()));
    }

    #[test]
    fn test_deal_preserves_relative_order() {
        let mut deck = Deck::from_cards(vec![Card::new(5), Card::new(9), Card::new(2)]);
        assert_eq!(deck.deal().unwrap(), Card::new(5));
        assert_eq!(deck.cards(), &[Card::new(9), Card::new(2)]);
    }

    #[test]
    fn test_deal_from_empty_deck_fails() {
        let mut deck = Deck::from_cards(vec![Card::new(4)]);
        assert!(deck.deal().is_ok());
        assert!(deck.is_empty());
        assert_eq!(deck.deal(), Err(GameError::EmptyDeck));
        assert_eq!(deck.size(), 0);
    }

    #[test]
    fn test_shuffle_preserves_composition() {
        for seed in 0..20 {
            let mut deck = Deck::new();
            let mut rng = GameRng::new(Some(seed));
            deck.shuffle(&mut rng);
            assert_standard_composition(deck.cards());
        }
    }

    #[test]
    fn test_shuffle_preserves_partial_deck() {
        let mut deck = Deck::new();
        for _ in 0..20 {
            deck.deal().unwrap();
        }
        let before = composition(deck.cards());
        let mut rng = GameRng::new(Some(11));
        deck.shuffle(&mut rng);
        assert_eq!(deck.size(), 32);
        assert_eq!(composition(deck.cards()), before);
    }

    #[test]
    fn test_shuffle_empty_deck_is_noop() {
        let mut deck = Deck::from_cards(Vec::new());
        let mut rng = GameRng::new(Some(1));
        deck.shuffle(&mut rng);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_shuffle_same_seed_same_order() {
        let mut d1 = Deck::new();
        let mut d2 = Deck::new();
        d1.shuffle(&mut GameRng::new(Some(42)));
        d2.shuffle(&mut GameRng::new(Some(42)));
        assert_eq!(d1.cards(), d2.cards());
        assert_ne!(d1.cards(), Deck::new().cards());
    }

    #[test]
    fn test_shuffle_with_zero_source_keeps_build_order() {
        let mut deck = Deck::new();
        deck.shuffle(&mut ZeroSource);
        assert_eq!(deck.cards(), Deck::new().cards());
    }

    /// Both indices of a step are drawn independently, so a step whose draws
    /// agree leaves the deck untouched. The window shrinks from the back, so
    /// the last position can only move on the first step.
    #[test]
    fn shuffle_is_not_fisher_yates() {
        let mut deck = Deck::from_cards((2..=6).map(Card::new).collect());
        let mut source = ScriptedSource {
            script: vec![1, 1],
            pos: 0,
        };
        deck.shuffle(&mut source);
        let values: Vec<u32> = deck.cards().iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6]);

        let mut deck = Deck::from_cards((2..=6).map(Card::new).collect());
        let mut source = ScriptedSource {
            script: vec![0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
            pos: 0,
        };
        deck.shuffle(&mut source);
        let values: Vec<u32> = deck.cards().iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![6, 3, 4, 5, 2]);
    }

    #[test]
    fn test_deck_display() {
        let deck = Deck::from_cards(vec![Card::new(2), Card::new(3), Card::new(11)]);
        assert_eq!(deck.to_string(), "[2, 3, 11] : 16");
    }

    #[test]
    fn test_hand_add_and_get() {
        let mut hand = Hand::new();
        hand.add(Card::new(7));
        hand.add(Card::new(10));
        assert_eq!(hand.size(), 2);
        assert_eq!(hand.get(0), Ok(&Card::new(7)));
        assert_eq!(hand.get(1), Ok(&Card::new(10)));
    }

    #[test]
    fn test_hand_get_out_of_range() {
        let mut hand = Hand::new();
        assert_eq!(
            hand.get(0),
            Err(GameError::IndexOutOfRange { index: 0, len: 0 })
        );
        hand.add(Card::new(4));
        assert_eq!(
            hand.get(1),
            Err(GameError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_hand_total_value() {
        let mut hand = Hand::new();
        assert_eq!(hand.total_value(), 0);
        hand.add(Card::new(10));
        hand.add(Card::new(11));
        assert_eq!(hand.total_value(), 21);
        hand.add(Card::new(11));
        assert_eq!(hand.total_value(), 32, "aces never count low");
    }

    #[test]
    fn test_hand_reset() {
        let mut hand = Hand::new();
        for v in [2, 9, 10, 11] {
            hand.add(Card::new(v));
        }
        hand.reset();
        assert_eq!(hand.size(), 0);
        assert_eq!(hand.total_value(), 0);
        assert!(hand.is_empty());
    }

    #[test]
    fn test_hand_display() {
        let mut hand = Hand::new();
        assert_eq!(hand.to_string(), "[] : 0");
        for v in [3, 4, 10] {
            hand.add(Card::new(v));
        }
        assert_eq!(hand.to_string(), "[3, 4, 10] : 17");
    }
}
