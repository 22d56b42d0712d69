use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;

pub const MIN_WRONG_GUESSES: u8 = 1;
pub const MAX_WRONG_GUESSES: u8 = 7;

/// Settings for one match. Frozen once the match begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub player1_name: String,
    pub player2_name: String,
    pub starter_is_player1: bool,
    pub total_rounds: u32,
    pub max_wrong_guesses: u8,
    pub round_time_limit_secs: u32,
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
            starter_is_player1: true,
            total_rounds: 3,
            max_wrong_guesses: MAX_WRONG_GUESSES,
            round_time_limit_secs: 60,
            sound_enabled: true,
            music_enabled: false,
        }
    }
}

impl MatchConfig {
    /// Reads a JSON config. Missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player1_name.trim().is_empty() || self.player2_name.trim().is_empty() {
            return Err(ConfigError::BlankName);
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if !(MIN_WRONG_GUESSES..=MAX_WRONG_GUESSES).contains(&self.max_wrong_guesses) {
            return Err(ConfigError::WrongGuessLimit {
                got: self.max_wrong_guesses,
                min: MIN_WRONG_GUESSES,
                max: MAX_WRONG_GUESSES,
            });
        }
        if self.round_time_limit_secs == 0 {
            return Err(ConfigError::NoTime);
        }
        Ok(())
    }
}
