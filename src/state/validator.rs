//! Word validation.
//!
//! A candidate is checked against the current round in a fixed order, and the
//! first rule it breaks is reported:
//!
//! 1. long enough (`TooShort`)
//! 2. not accepted before (`AlreadyUsed`)
//! 3. spellable from the root word's letters (`NotPossible`)
//! 4. a real word (`NotReal`)
//! 5. not the root word itself (`SameAsRoot`)
//!
//! Validation never touches the round. Callers apply an [`Accepted`] with
//! [`RoundState::record`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{ConfigError, GameConfig, DEFAULT_MIN_WORD_LENGTH};
use super::dictionary::Dictionary;
use super::round::{word_score, RoundState};

/// Lowercase a candidate and strip surrounding whitespace and line breaks.
pub fn normalize(candidate: &str) -> String {
    candidate.trim().to_lowercase()
}

/// Check if `word` can be spelled from the letters of `root_word`, using
/// each letter at most as often as it appears in the root.
///
/// Letters are compared per `char`; a decomposed accent counts as its own
/// letter.
pub fn is_possible(word: &str, root_word: &str) -> bool {
    let mut available: HashMap<char, usize> = HashMap::new();
    for letter in root_word.chars() {
        *available.entry(letter).or_insert(0) += 1;
    }

    for letter in word.chars() {
        match available.get_mut(&letter) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    true
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    TooShort { min_length: usize },
    AlreadyUsed,
    NotPossible,
    NotReal,
    SameAsRoot,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "too_short",
            Self::AlreadyUsed => "already_used",
            Self::NotPossible => "not_possible",
            Self::NotReal => "not_real",
            Self::SameAsRoot => "same_as_root",
        }
    }

    /// Alert title shown to the player.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "Too short",
            Self::AlreadyUsed => "Word is used already",
            Self::NotPossible => "Word not possible",
            Self::NotReal => "Word not recognized",
            Self::SameAsRoot => "No no",
        }
    }

    /// Alert message shown to the player.
    pub fn message(&self, root_word: &str) -> String {
        match self {
            Self::TooShort { min_length } => {
                format!("Your answer must contain at least {} letters.", min_length)
            }
            Self::AlreadyUsed => "Please try again".to_string(),
            Self::NotPossible => format!("You can't spell that from '{}'!", root_word),
            Self::NotReal => "You can't just make them up, you know?".to_string(),
            Self::SameAsRoot => "You can't use the same word!".to_string(),
        }
    }

    pub fn to_json(&self, root_word: &str) -> serde_json::Value {
        serde_json::json!({
            "reason": self.as_str(),
            "title": self.title(),
            "message": self.message(root_word)
        })
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min_length } => {
                write!(f, "Word is shorter than {} letters", min_length)
            }
            Self::AlreadyUsed => write!(f, "Word has already been used"),
            Self::NotPossible => write!(f, "Word cannot be spelled from the root word"),
            Self::NotReal => write!(f, "Word is not in the dictionary"),
            Self::SameAsRoot => write!(f, "Word is the root word"),
        }
    }
}

impl std::error::Error for Rejection {}

/// A candidate that passed every rule.
///
/// Only [`WordValidator::validate`] creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    word: String,
    score_delta: u32,
}

impl Accepted {
    #[cfg(test)]
    pub(crate) fn forged(word: &str, score_delta: u32) -> Self {
        Self {
            word: word.to_string(),
            score_delta,
        }
    }

    /// The normalized word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Points the word is worth.
    pub fn score_delta(&self) -> u32 {
        self.score_delta
    }
}

/// Applies the acceptance rules to candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordValidator {
    min_word_length: usize,
}

impl Default for WordValidator {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
        }
    }
}

impl WordValidator {
    /// Build a validator from a config, rejecting invalid settings.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            min_word_length: config.min_word_length,
        })
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    /// Validate a raw candidate against the round.
    ///
    /// The dictionary is only consulted once the length, originality and
    /// letter checks pass.
    pub fn validate<D>(
        &self,
        candidate: &str,
        state: &RoundState,
        dictionary: &D,
    ) -> Result<Accepted, Rejection>
    where
        D: Dictionary + ?Sized,
    {
        let word = normalize(candidate);

        if word.chars().count() < self.min_word_length {
            return Err(Rejection::TooShort {
                min_length: self.min_word_length,
            });
        }

        if state.is_used(&word) {
            return Err(Rejection::AlreadyUsed);
        }

        if !is_possible(&word, state.root_word()) {
            return Err(Rejection::NotPossible);
        }

        if !dictionary.is_real_word(&word) {
            return Err(Rejection::NotReal);
        }

        if word == state.root_word() {
            return Err(Rejection::SameAsRoot);
        }

        let score_delta = word_score(&word);
        Ok(Accepted { word, score_delta })
    }
}

/// Validate with the default rules.
pub fn validate<D>(
    candidate: &str,
    state: &RoundState,
    dictionary: &D,
) -> Result<Accepted, Rejection>
where
    D: Dictionary + ?Sized,
{
    WordValidator::default().validate(candidate, state, dictionary)
}
