//! WordScramble State Library
//!
//! This crate provides the word validation and round bookkeeping behind the
//! WordScramble game.
//!
//! # Overview
//!
//! The player is shown a random root word and submits words spelled from its
//! letters. The state module provides:
//!
//! - **Word Validation** - Five ordered rules (length, originality, letters,
//!   dictionary, not the root word) with a distinct rejection for each.
//!
//! - **Round State** - Root word, accepted words (most recent first) and score,
//!   where every accepted word is worth one point plus one per letter.
//!
//! - **Round Lifecycle** - Random root word selection and an archive of past
//!   rounds, newest first.
//!
//! - **Sessions** - `GameSession` bundles the above with a seeded RNG.
//!
//! # Design Principles
//!
//! 1. **Validation is pure** - Validating never changes the round; accepted
//!    words are applied explicitly.
//!
//! 2. **The dictionary is injected** - Anything implementing `Dictionary`,
//!    including a plain closure, answers "is this a real word?".
//!
//! 3. **No UI** - This crate is pure state; alerts, lists and navigation
//!    belong to the caller.
//!
//! 4. **Serialization-ready** - State types convert to JSON for clients.
//!
//! # Example
//!
//! ```rust
//! use wordscramble_state::{GameConfig, GameSession, Rejection, WordList, WordSet};
//!
//! let words = WordList::parse("silkworm\n");
//! let dictionary = WordSet::parse("silk\nworm\nmilk\n");
//! let mut session = GameSession::new(words, &GameConfig::default().with_seed(42)).unwrap();
//!
//! let accepted = session.submit("Silk", &dictionary).unwrap();
//! assert_eq!(accepted.score_delta(), 5);
//!
//! let rejection = session.submit("silly", &dictionary).unwrap_err();
//! assert_eq!(rejection, Rejection::NotPossible);
//! assert_eq!(rejection.title(), "Word not possible");
//!
//! let archived = session.new_round().unwrap();
//! assert_eq!(archived.score, 5);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
