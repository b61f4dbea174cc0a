use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid rule configuration: {0}")]
    Invalid(String),
}

/// Table rules for a simulation session.
///
/// The defaults are the house rules: the player hits through 16, the dealer
/// stands on 17, anything over 21 busts, and the deck is rebuilt once fewer
/// than half of it remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Rebuild and reshuffle when fewer cards than this remain at reset
    pub reshuffle_below: usize,
    /// Player draws while total <= this
    pub player_hits_through: u32,
    /// Dealer draws while total < this
    pub dealer_stands_on: u32,
    /// A total above this is a bust
    pub bust_above: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            reshuffle_below: 26,
            player_hits_through: 16,
            dealer_stands_on: 17,
            bust_above: 21,
        }
    }
}

impl RuleConfig {
    /// Load rules from a JSON file; absent fields keep their defaults
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: RuleConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dealer_stands_on == 0 {
            return Err(ConfigError::Invalid(
                "dealer_stands_on must be at least 1".to_string(),
            ));
        }
        if self.player_hits_through >= self.bust_above {
            return Err(ConfigError::Invalid(format!(
                "player_hits_through ({}) must be below bust_above ({})",
                self.player_hits_through, self.bust_above
            )));
        }
        Ok(())
    }

    pub fn is_bust(&self, total: u32) -> bool {
        total > self.bust_above
    }
}
