//! Session configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shortest word accepted by default.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 4;

/// Configuration for a game session.
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Words with fewer characters than this are rejected as too short.
    pub min_word_length: usize,

    /// Seed for root word selection. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and check a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_min_word_length(mut self, min_word_length: usize) -> Self {
        self.min_word_length = min_word_length;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_word_length == 0 {
            return Err(ConfigError::InvalidMinWordLength(self.min_word_length));
        }
        Ok(())
    }
}

/// Config errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidMinWordLength(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Invalid config: {}", e),
            Self::InvalidMinWordLength(n) => {
                write!(f, "Minimum word length must be at least 1, got {}", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::InvalidMinWordLength(_) => None,
        }
    }
}
