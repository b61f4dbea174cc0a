use crate::game::{Deck, GameError, Hand, Outcome, RoundPhase};
use crate::rng::{GameRng, RandomSource};
use crate::simulation::config::RuleConfig;
use crate::simulation::interactive::Decision;
use log::{debug, log, Level};
use std::fmt;

/// Owns the deck and both hands for a session and plays rounds on them
#[derive(Clone)]
pub struct GameEngine<R: RandomSource = GameRng> {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    rng: R,
    config: RuleConfig,
    phase: RoundPhase,
}

impl GameEngine<GameRng> {
    /// Engine with house rules; `None` seeds from the thread RNG
    pub fn seeded(seed: Option<u64>) -> Self {
        GameEngine::new(GameRng::new(seed), RuleConfig::default())
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Build and shuffle a fresh deck
    pub fn new(rng: R, config: RuleConfig) -> Self {
        let mut engine = GameEngine::with_deck(Deck::new(), rng, config);
        engine.deck.shuffle(&mut engine.rng);
        engine
    }

    /// Start from a prepared deck, dealt as-is without shuffling
    pub fn with_deck(deck: Deck, rng: R, config: RuleConfig) -> Self {
        GameEngine {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            rng,
            config,
            phase: RoundPhase::Init,
        }
    }

    /// Prepare for a new round: rebuild a depleted deck and clear both hands
    pub fn reset(&mut self) {
        if self.deck.size() < self.config.reshuffle_below {
            debug!(
                "Rebuilding deck ({} cards left, threshold {})",
                self.deck.size(),
                self.config.reshuffle_below
            );
            self.deck.build();
            self.deck.shuffle(&mut self.rng);
        }
        self.player.reset();
        self.dealer.reset();
        self.phase = RoundPhase::Init;
    }

    /// Deal two cards each, alternating player then dealer
    pub fn deal(&mut self) -> Result<(), GameError> {
        for _ in 0..2 {
            let card = self.deck.deal()?;
            self.player.add(card);
            let card = self.deck.deal()?;
            self.dealer.add(card);
        }
        self.phase = RoundPhase::Dealt;
        Ok(())
    }

    /// Fixed player policy: hit while the total is within `player_hits_through`.
    /// Returns false if the player busted.
    pub fn player_turn(&mut self) -> Result<bool, GameError> {
        let limit = self.config.player_hits_through;
        self.player_turn_with(|hand| {
            if hand.total_value() <= limit {
                Decision::Hit
            } else {
                Decision::Stand
            }
        })
    }

    /// Player turn driven by an external decision source.
    ///
    /// `decide` sees the player's hand before every choice. The turn ends on
    /// `Stand` (returns true) or as soon as the hand busts (returns false).
    pub fn player_turn_with<F>(&mut self, mut decide: F) -> Result<bool, GameError>
    where
        F: FnMut(&Hand) -> Decision,
    {
        self.phase = RoundPhase::PlayerTurn;
        while !self.config.is_bust(self.player.total_value()) {
            match decide(&self.player) {
                Decision::Hit => {
                    let card = self.deck.deal()?;
                    self.player.add(card);
                }
                Decision::Stand => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Fixed dealer policy: hit while the total is below `dealer_stands_on`.
    /// Returns false if the dealer busted.
    pub fn dealer_turn(&mut self) -> Result<bool, GameError> {
        self.phase = RoundPhase::DealerTurn;
        while self.dealer.total_value() < self.config.dealer_stands_on {
            let card = self.deck.deal()?;
            self.dealer.add(card);
        }
        Ok(!self.config.is_bust(self.dealer.total_value()))
    }

    /// Play one complete round under the fixed policies.
    /// With `verbose`, the game state is logged at info level after each stage.
    pub fn play_round(&mut self, verbose: bool) -> Result<Outcome, GameError> {
        self.reset();
        self.deal()?;
        self.log_state(verbose, "Initial game state");
        let player_in = self.player_turn()?;
        self.log_state(verbose, "After player's turn");
        self.finish_round(player_in, verbose)
    }

    /// Play one round with the player's choices supplied by `decide`;
    /// the dealer still follows the fixed policy.
    pub fn play_round_with<F>(&mut self, decide: F) -> Result<Outcome, GameError>
    where
        F: FnMut(&Hand) -> Decision,
    {
        self.reset();
        self.deal()?;
        let player_in = self.player_turn_with(decide)?;
        self.finish_round(player_in, false)
    }

    fn finish_round(&mut self, player_in: bool, verbose: bool) -> Result<Outcome, GameError> {
        let outcome = if !player_in {
            Outcome::DealerWin
        } else if !self.dealer_turn()? {
            self.log_state(verbose, "After dealer's turn");
            Outcome::PlayerWin
        } else {
            self.log_state(verbose, "After dealer's turn");
            Outcome::compare(self.player.total_value(), self.dealer.total_value())
        };
        self.phase = RoundPhase::Settled;
        let level = if verbose { Level::Info } else { Level::Trace };
        log!(level, "{}", outcome);
        Ok(outcome)
    }

    fn log_state(&self, verbose: bool, label: &str) {
        let level = if verbose { Level::Info } else { Level::Trace };
        log!(level, "{}:\n{}", label, self);
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }
}

fn write_hand(f: &mut fmt::Formatter<'_>, label: &str, hand: &Hand) -> fmt::Result {
    let values: Vec<String> = hand.cards().iter().map(|c| c.to_string()).collect();
    writeln!(
        f,
        "{}'s Hand: [{}] (Total: {})",
        label,
        values.join(", "),
        hand.total_value()
    )
}

impl<R: RandomSource> fmt::Display for GameEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hand(f, "Player", &self.player)?;
        write_hand(f, "Dealer", &self.dealer)
    }
}
