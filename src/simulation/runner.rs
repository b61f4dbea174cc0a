//! Batch simulation: play many rounds on one engine and tally the outcomes.

use crate::game::{GameError, Outcome};
use crate::rng::{GameRng, RandomSource};
use crate::simulation::config::RuleConfig;
use crate::simulation::engine::GameEngine;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Batch sizes of the standard sweep
pub const SWEEP_SIZES: [usize; 3] = [100, 1000, 10000];

/// Running counts of each outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub player_wins: usize,
    pub dealer_wins: usize,
    pub draws: usize,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => self.player_wins += 1,
            Outcome::DealerWin => self.dealer_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.player_wins + self.dealer_wins + self.draws
    }
}

/// Share of rounds per outcome, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub player_wins: f64,
    pub dealer_wins: f64,
    pub draws: f64,
}

/// `count / rounds * 100`, or 0 when no rounds were played
fn percentage(count: usize, rounds: usize) -> f64 {
    if rounds == 0 {
        0.0
    } else {
        count as f64 / rounds as f64 * 100.0
    }
}

/// Aggregate result of a batch of rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub rounds: usize,
    pub player_wins: usize,
    pub dealer_wins: usize,
    pub draws: usize,
    pub percentages: Percentages,
}

impl SimulationReport {
    pub fn from_tally(rounds: usize, tally: OutcomeTally) -> Self {
        SimulationReport {
            rounds,
            player_wins: tally.player_wins,
            dealer_wins: tally.dealer_wins,
            draws: tally.draws,
            percentages: Percentages {
                player_wins: percentage(tally.player_wins, rounds),
                dealer_wins: percentage(tally.dealer_wins, rounds),
                draws: percentage(tally.draws, rounds),
            },
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation for {} games:", self.rounds)?;
        writeln!(
            f,
            "  Player Wins:  {} ({:.2}%)",
            self.player_wins, self.percentages.player_wins
        )?;
        writeln!(
            f,
            "  Dealer Wins:  {} ({:.2}%)",
            self.dealer_wins, self.percentages.dealer_wins
        )?;
        writeln!(f, "  Draws:        {} ({:.2}%)", self.draws, self.percentages.draws)
    }
}

/// Plays rounds strictly one after another on a single engine
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationRunner {
    verbose: bool,
}

impl SimulationRunner {
    pub fn new() -> Self {
        SimulationRunner { verbose: false }
    }

    /// Log every round's game state at info level
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Play `rounds` rounds and report the outcome counts.
    /// The first failing round aborts the whole batch.
    pub fn run<R: RandomSource>(
        &self,
        engine: &mut GameEngine<R>,
        rounds: usize,
    ) -> Result<SimulationReport, GameError> {
        self.run_with(engine, rounds, |_, _| {})
    }

    /// Like `run`, calling `observer(round_index, outcome)` after each round
    pub fn run_with<R, F>(
        &self,
        engine: &mut GameEngine<R>,
        rounds: usize,
        mut observer: F,
    ) -> Result<SimulationReport, GameError>
    where
        R: RandomSource,
        F: FnMut(usize, Outcome),
    {
        let mut tally = OutcomeTally::default();
        for i in 0..rounds {
            let outcome = engine.play_round(self.verbose)?;
            tally.record(outcome);
            observer(i, outcome);
        }
        debug!(
            "Batch of {} rounds: {} player, {} dealer, {} draws",
            rounds, tally.player_wins, tally.dealer_wins, tally.draws
        );
        Ok(SimulationReport::from_tally(rounds, tally))
    }
}

/// Run one independent batch per entry of `sizes`, each on its own engine.
///
/// With a base seed, batch `i` uses seed `base + i`, so the sweep is
/// reproducible. Batches run in parallel; rounds inside a batch do not.
/// Reports come back in the order of `sizes`.
pub fn sweep(
    config: RuleConfig,
    base_seed: Option<u64>,
    sizes: &[usize],
) -> Result<Vec<SimulationReport>, GameError> {
    info!("Sweeping {} batches", sizes.len());
    sizes
        .par_iter()
        .enumerate()
        .map(|(i, &rounds)| {
            let seed = base_seed.map(|s| s.wrapping_add(i as u64));
            let mut engine = GameEngine::new(GameRng::new(seed), config);
            SimulationRunner::new().run(&mut engine, rounds)
        })
        .collect()
}
