pub mod config;
pub mod engine;
pub mod interactive;
pub mod runner;

pub use config::{ConfigError, RuleConfig};
pub use engine::GameEngine;
pub use interactive::{Decision, ScriptedDecider};
pub use runner::{sweep, OutcomeTally, Percentages, SimulationReport, SimulationRunner, SWEEP_SIZES};
