//! State management module for WordScramble.
//!
//! This module provides the core state types and rules:
//!
//! - `round` - Current round and the archive of finished rounds
//! - `validator` - Word acceptance rules and rejection reasons
//! - `manager` - Round lifecycle (pick a root word, archive, restart)
//! - `dictionary` - Dictionary oracle trait, static word sets, root word lists
//! - `rng` - Random source for root word selection
//! - `config` - Session configuration
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          GameSession                              │
//! │                                                                   │
//! │  ┌──────────────┐  ┌───────────────┐  ┌───────────────────────┐  │
//! │  │ RoundManager │  │ WordValidator │  │        GameRng        │  │
//! │  │  WordList    │  │ min length    │  │ seeded root selection │  │
//! │  └──────┬───────┘  └───────┬───────┘  └───────────────────────┘  │
//! │         │ start/end        │ validate(candidate, &dyn Dictionary)│
//! │         ▼                  ▼                                      │
//! │  ┌──────────────────────────────┐    ┌────────────────────────┐  │
//! │  │         RoundState           │───▶│      RoundHistory      │  │
//! │  │ root word, used words, score │end │ (root, score) newest   │  │
//! │  └──────────────────────────────┘    │ first                  │  │
//! │                                      └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use wordscramble_state::{start_round, validate, GameRng, Rejection};
//!
//! let words = vec!["silkworm".to_string()];
//! let mut rng = GameRng::new(42);
//! let mut round = start_round(&words, &mut rng).unwrap();
//!
//! let real = |_: &str| true;
//! let accepted = validate("silk", &round, &real).unwrap();
//! assert_eq!(accepted.score_delta(), 5);
//! round.record(&accepted);
//!
//! assert_eq!(validate("silk", &round, &real), Err(Rejection::AlreadyUsed));
//! ```

pub mod config;
pub mod dictionary;
pub mod manager;
pub mod rng;
pub mod round;
pub mod validator;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, DEFAULT_MIN_WORD_LENGTH};
pub use dictionary::{Dictionary, WordList, WordSet};
pub use manager::{end_round, start_round, RoundError, RoundManager};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use round::{
    word_score, HistoryEntry, RawRoundState, RoundHistory, RoundState, RoundStateError,
};
pub use validator::{is_possible, normalize, validate, Accepted, Rejection, WordValidator};

/// Errors starting a session.
#[derive(Debug)]
pub enum SessionError {
    Config(ConfigError),
    Round(RoundError),
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RoundError> for SessionError {
    fn from(e: RoundError) -> Self {
        Self::Round(e)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Cannot start session: {}", e),
            Self::Round(e) => write!(f, "Cannot start session: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Round(e) => Some(e),
        }
    }
}

/// A single player's game: the current round, past rounds, and the rules
/// and randomness used to run them.
#[derive(Debug, Clone)]
pub struct GameSession {
    manager: RoundManager,
    validator: WordValidator,
    rng: GameRng,
    round: RoundState,
    history: RoundHistory,
}

impl GameSession {
    /// Start a session and its first round.
    pub fn new(word_list: WordList, config: &GameConfig) -> Result<Self, SessionError> {
        let validator = WordValidator::new(config)?;
        let manager = RoundManager::new(word_list)?;
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::debug!("New session with seed {}", rng.seed());

        let round = manager.start_round(&mut rng)?;

        Ok(Self {
            manager,
            validator,
            rng,
            round,
            history: RoundHistory::new(),
        })
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn validator(&self) -> &WordValidator {
        &self.validator
    }

    /// Seed the session was started with.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Validate a candidate and, if accepted, add it to the round.
    pub fn submit<D>(&mut self, candidate: &str, dictionary: &D) -> Result<Accepted, Rejection>
    where
        D: Dictionary + ?Sized,
    {
        match self.validator.validate(candidate, &self.round, dictionary) {
            Ok(accepted) => {
                self.round.record(&accepted);
                log::debug!(
                    "Accepted '{}' (+{}), score now {}",
                    accepted.word(),
                    accepted.score_delta(),
                    self.round.score()
                );
                Ok(accepted)
            }
            Err(rejection) => {
                log::debug!("Rejected '{}': {}", candidate.trim(), rejection);
                Err(rejection)
            }
        }
    }

    /// Archive the current round and start a new one.
    ///
    /// Returns the entry that was archived.
    pub fn new_round(&mut self) -> Result<&HistoryEntry, RoundError> {
        let next = self.manager.start_round(&mut self.rng)?;
        let finished = std::mem::replace(&mut self.round, next);
        let entry = self.history.archive(&finished);
        log::info!("Archived round '{}' with {} points", entry.root_word, entry.score);
        Ok(entry)
    }

    /// Convert to a JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "round": self.round.to_json(),
            "history": self.history.to_json(),
            "min_word_length": self.validator.min_word_length(),
            "seed": self.seed()
        })
    }
}
