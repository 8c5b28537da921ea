//! Round state management.
//!
//! Tracks the current root word, the words accepted against it, the running
//! score, and the archive of finished rounds.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validator::{is_possible, normalize, Accepted};

/// Points awarded for an accepted word: one for the word plus one per letter.
pub fn word_score(word: &str) -> u32 {
    1 + word.chars().count() as u32
}

/// State of the round currently being played.
///
/// Deserializing goes through [`RawRoundState`] and is refused unless the
/// round invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoundState")]
pub struct RoundState {
    /// Word all answers must be spelled from
    root_word: String,

    /// Accepted words, most recent first
    used_words: Vec<String>,

    /// Sum of `word_score` over `used_words`
    score: u32,

    /// When the round started
    started_at: DateTime<Utc>,
}

impl RoundState {
    /// Create a fresh round for a root word.
    ///
    /// The root word is normalized the same way candidates are, so a word list
    /// entry like `"Silkworm\r"` still compares equal to `"silkworm"`.
    pub fn new(root_word: &str) -> Self {
        Self {
            root_word: normalize(root_word),
            used_words: Vec::new(),
            score: 0,
            started_at: Utc::now(),
        }
    }

    pub fn root_word(&self) -> &str {
        &self.root_word
    }

    /// Accepted words, most recent first.
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Number of accepted words.
    pub fn word_count(&self) -> usize {
        self.used_words.len()
    }

    /// Check if a (normalized) word was already accepted this round.
    pub fn is_used(&self, word: &str) -> bool {
        self.used_words.iter().any(|w| w == word)
    }

    /// Apply an acceptance: insert the word at the front and add its score.
    ///
    /// Returns `false` without changing anything if the word is empty, already
    /// used, the root word, not spellable from the root word, or carries a
    /// score other than `word_score(word)`. That only happens when an
    /// acceptance from another round, or one recorded twice, is replayed.
    pub fn record(&mut self, accepted: &Accepted) -> bool {
        let word = accepted.word();
        if word.is_empty()
            || self.is_used(word)
            || word == self.root_word
            || !is_possible(word, &self.root_word)
            || accepted.score_delta() != word_score(word)
        {
            log::warn!(
                "Refusing stale acceptance of '{}' in round '{}'",
                word,
                self.root_word
            );
            return false;
        }

        self.used_words.insert(0, word.to_string());
        self.score += accepted.score_delta();
        true
    }

    /// Convert to a JSON snapshot for display.
    pub fn to_json(&self) -> serde_json::Value {
        let words: Vec<serde_json::Value> = self
            .used_words
            .iter()
            .map(|w| serde_json::json!({"word": w, "letters": w.chars().count()}))
            .collect();

        serde_json::json!({
            "root_word": self.root_word,
            "used_words": words,
            "score": self.score,
            "started_at": self.started_at.to_rfc3339()
        })
    }
}

/// Serialized form of [`RoundState`], checked on the way in.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoundState {
    pub root_word: String,
    pub used_words: Vec<String>,
    pub score: u32,
    pub started_at: DateTime<Utc>,
}

/// Why a serialized round was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundStateError {
    EmptyRootWord,
    /// Word is blank or not in normalized form
    InvalidWord(String),
    DuplicateWord(String),
    ContainsRootWord,
    NotPossible(String),
    ScoreMismatch { expected: u32, found: u32 },
}

impl fmt::Display for RoundStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRootWord => write!(f, "Root word is empty"),
            Self::InvalidWord(w) => write!(f, "Used word '{}' is not normalized", w),
            Self::DuplicateWord(w) => write!(f, "Used word '{}' appears twice", w),
            Self::ContainsRootWord => write!(f, "Used words contain the root word"),
            Self::NotPossible(w) => {
                write!(f, "Used word '{}' cannot be spelled from the root", w)
            }
            Self::ScoreMismatch { expected, found } => {
                write!(f, "Score is {} but used words are worth {}", found, expected)
            }
        }
    }
}

impl std::error::Error for RoundStateError {}

impl TryFrom<RawRoundState> for RoundState {
    type Error = RoundStateError;

    fn try_from(raw: RawRoundState) -> Result<Self, Self::Error> {
        let root_word = normalize(&raw.root_word);
        if root_word.is_empty() {
            return Err(RoundStateError::EmptyRootWord);
        }

        let mut seen = HashSet::new();
        for word in &raw.used_words {
            if word.is_empty() || normalize(word) != *word {
                return Err(RoundStateError::InvalidWord(word.clone()));
            }
            if *word == root_word {
                return Err(RoundStateError::ContainsRootWord);
            }
            if !is_possible(word, &root_word) {
                return Err(RoundStateError::NotPossible(word.clone()));
            }
            if !seen.insert(word.as_str()) {
                return Err(RoundStateError::DuplicateWord(word.clone()));
            }
        }

        let expected: u32 = raw.used_words.iter().map(|w| word_score(w)).sum();
        if expected != raw.score {
            return Err(RoundStateError::ScoreMismatch {
                expected,
                found: raw.score,
            });
        }

        Ok(Self {
            root_word,
            used_words: raw.used_words,
            score: raw.score,
            started_at: raw.started_at,
        })
    }
}

/// One archived round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub root_word: String,
    pub score: u32,
    pub ended_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "root_word": self.root_word,
            "score": self.score,
            "ended_at": self.ended_at.to_rfc3339()
        })
    }
}

/// Archive of finished rounds, newest first.
///
/// Root words and scores are stored together per entry, so `past_roots` and
/// `past_scores` always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundHistory {
    entries: Vec<HistoryEntry>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive a round at the front of the history.
    pub fn archive(&mut self, state: &RoundState) -> &HistoryEntry {
        self.entries.insert(
            0,
            HistoryEntry {
                root_word: state.root_word.clone(),
                score: state.score,
                ended_at: Utc::now(),
            },
        );
        &self.entries[0]
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Most recently archived round.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn past_roots(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.root_word.as_str())
    }

    pub fn past_scores(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to JSON rows for the results table.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.entries.iter().map(|e| e.to_json()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::validator::{Rejection, WordValidator};
    use pretty_assertions::assert_eq;

    fn accept(state: &RoundState, word: &str) -> Accepted {
        WordValidator::default()
            .validate(word, state, &|_: &str| true)
            .unwrap()
    }

    #[test]
    fn test_round_new() {
        let state = RoundState::new("silkworm");
        assert_eq!(state.root_word(), "silkworm");
        assert!(state.used_words().is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_round_new_normalizes_root() {
        let state = RoundState::new(" SilkWorm\r\n");
        assert_eq!(state.root_word(), "silkworm");
    }

    #[test]
    fn test_record_inserts_front_and_scores() {
        let mut state = RoundState::new("silkworm");

        let silk = accept(&state, "silk");
        assert!(state.record(&silk));
        let worm = accept(&state, "worm");
        assert!(state.record(&worm));

        assert_eq!(state.used_words(), &["worm".to_string(), "silk".to_string()]);
        assert_eq!(state.score(), 10);
        assert_eq!(state.word_count(), 2);
    }

    #[test]
    fn test_record_refuses_replay() {
        let mut state = RoundState::new("silkworm");
        let silk = accept(&state, "silk");

        assert!(state.record(&silk));
        assert!(!state.record(&silk));

        assert_eq!(state.word_count(), 1);
        assert_eq!(state.score(), 5);
    }

    #[test]
    fn test_record_refuses_other_root() {
        let other = RoundState::new("absolute");
        let blue = accept(&other, "blue");

        let mut state = RoundState::new("silkworm");
        assert!(!state.record(&blue));
        assert!(state.used_words().is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_record_refuses_wrong_score() {
        let mut state = RoundState::new("silkworm");
        assert!(!state.record(&Accepted::forged("silk", 1000)));
        assert!(!state.record(&Accepted::forged("", 1)));
        assert_eq!(state.score(), 0);

        assert!(state.record(&Accepted::forged("silk", 5)));
        assert_eq!(state.score(), 5);
    }

    #[test]
    fn test_deserialize_normalizes_root() {
        let json = r#"{"root_word":" SilkWorm","used_words":["silk"],"score":5,
            "started_at":"2026-01-01T00:00:00Z"}"#;
        let state: RoundState = serde_json::from_str(json).unwrap();

        assert_eq!(state.root_word(), "silkworm");
        assert_eq!(state.used_words(), &["silk"]);
        let result = WordValidator::default().validate("silkworm", &state, &|_: &str| true);
        assert_eq!(result, Err(Rejection::SameAsRoot));
    }

    #[test]
    fn test_deserialize_refuses_broken_rounds() {
        let parse = |used: &[&str], score: u32| {
            serde_json::from_value::<RoundState>(serde_json::json!({
                "root_word": "silkworm",
                "used_words": used,
                "score": score,
                "started_at": "2026-01-01T00:00:00Z"
            }))
        };

        assert!(parse(&["silk", "worm"], 10).is_ok());
        assert!(parse(&["silk", "silk"], 10).is_err());
        assert!(parse(&["silk"], 3).is_err());
        assert!(parse(&["silkworm"], 9).is_err());
        assert!(parse(&["zzzz"], 5).is_err());
        assert!(parse(&["Silk"], 5).is_err());

        let raw = RawRoundState {
            root_word: "silkworm".to_string(),
            used_words: vec!["silk".to_string()],
            score: 3,
            started_at: Utc::now(),
        };
        assert_eq!(
            RoundState::try_from(raw).unwrap_err(),
            RoundStateError::ScoreMismatch {
                expected: 5,
                found: 3
            }
        );
    }

    #[test]
    fn test_word_score() {
        assert_eq!(word_score("silk"), 5);
        assert_eq!(word_score("worms"), 6);
    }

    #[test]
    fn test_history_prepends() {
        let mut history = RoundHistory::new();
        let mut first = RoundState::new("silkworm");
        let silk = accept(&first, "silk");
        first.record(&silk);
        let second = RoundState::new("absolute");

        history.archive(&first);
        history.archive(&second);

        assert_eq!(history.len(), 2);
        assert_eq!(history.past_roots().collect::<Vec<_>>(), ["absolute", "silkworm"]);
        assert_eq!(history.past_scores().collect::<Vec<_>>(), [0, 5]);
        assert_eq!(history.latest().unwrap().root_word, "absolute");
    }

    #[test]
    fn test_round_to_json() {
        let mut state = RoundState::new("silkworm");
        let silk = accept(&state, "silk");
        state.record(&silk);

        let json = state.to_json();
        assert_eq!(json["root_word"], "silkworm");
        assert_eq!(json["score"], 5);
        assert_eq!(json["used_words"][0]["word"], "silk");
        assert_eq!(json["used_words"][0]["letters"], 4);
    }

    #[test]
    fn test_history_serde_roundtrip_keeps_order() {
        let mut history = RoundHistory::new();
        history.archive(&RoundState::new("silkworm"));
        history.archive(&RoundState::new("absolute"));

        let text = serde_json::to_string(&history).unwrap();
        let restored: RoundHistory = serde_json::from_str(&text).unwrap();

        assert_eq!(restored, history);
    }
}
