//! Round lifecycle.
//!
//! Starting a round picks a root word; ending one archives the outgoing root
//! word and score, newest first, and starts the next.

use std::fmt;

use super::dictionary::WordList;
use super::rng::RandomSource;
use super::round::{RoundHistory, RoundState};

/// Round errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    /// No root words to choose from, so no round can start.
    EmptyWordList,
    /// The random source returned an index outside the word list.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWordList => write!(f, "Word list is empty, cannot pick a root word"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Random index {} out of range for {} root words", index, len)
            }
        }
    }
}

impl std::error::Error for RoundError {}

/// Start a round with a root word chosen uniformly from `word_list`.
pub fn start_round<R>(word_list: &[String], rng: &mut R) -> Result<RoundState, RoundError>
where
    R: RandomSource + ?Sized,
{
    if word_list.is_empty() {
        log::error!("Cannot start round: word list is empty");
        return Err(RoundError::EmptyWordList);
    }

    let len = word_list.len();
    let index = rng.pick_index(len);
    let root_word = word_list
        .get(index)
        .ok_or(RoundError::IndexOutOfRange { index, len })?;
    log::info!("Starting round with root word '{}'", root_word);
    Ok(RoundState::new(root_word))
}

/// Archive `state` at the front of `history` and start the next round.
///
/// The next root word is picked before anything is archived.
pub fn end_round<R>(
    state: RoundState,
    mut history: RoundHistory,
    word_list: &[String],
    rng: &mut R,
) -> Result<(RoundHistory, RoundState), RoundError>
where
    R: RandomSource + ?Sized,
{
    let next = start_round(word_list, rng)?;

    let entry = history.archive(&state);
    log::info!(
        "Ended round '{}' with {} points ({} words)",
        entry.root_word,
        entry.score,
        state.word_count()
    );

    Ok((history, next))
}

/// Owns the root word list and runs rounds from it.
#[derive(Debug, Clone)]
pub struct RoundManager {
    word_list: WordList,
}

impl RoundManager {
    /// Create a manager, rejecting an empty word list up front.
    pub fn new(word_list: WordList) -> Result<Self, RoundError> {
        if word_list.is_empty() {
            return Err(RoundError::EmptyWordList);
        }
        Ok(Self { word_list })
    }

    pub fn word_list(&self) -> &WordList {
        &self.word_list
    }

    pub fn start_round<R>(&self, rng: &mut R) -> Result<RoundState, RoundError>
    where
        R: RandomSource + ?Sized,
    {
        start_round(&self.word_list, rng)
    }

    pub fn end_round<R>(
        &self,
        state: RoundState,
        history: RoundHistory,
        rng: &mut R,
    ) -> Result<(RoundHistory, RoundState), RoundError>
    where
        R: RandomSource + ?Sized,
    {
        end_round(state, history, &self.word_list, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::rng::GameRng;
    use crate::state::validator::validate;

    /// Ignores its contract and always points past the end.
    struct PastTheEnd;

    impl RandomSource for PastTheEnd {
        fn pick_index(&mut self, len: usize) -> usize {
            len
        }
    }

    fn words() -> Vec<String> {
        vec!["silkworm".to_string(), "absolute".to_string(), "swordfish".to_string()]
    }

    #[test]
    fn test_start_round_picks_from_list() {
        let list = words();
        let mut rng = GameRng::new(42);

        for _ in 0..20 {
            let state = start_round(&list, &mut rng).unwrap();
            assert!(list.iter().any(|w| w == state.root_word()));
            assert_eq!(state.score(), 0);
        }
    }

    #[test]
    fn test_start_round_empty_list() {
        let mut rng = GameRng::new(42);
        assert_eq!(start_round(&[], &mut rng), Err(RoundError::EmptyWordList));
    }

    #[test]
    fn test_start_round_bad_index() {
        assert_eq!(
            start_round(&words(), &mut PastTheEnd),
            Err(RoundError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_end_round_archives_front() {
        let list = words();
        let mut rng = GameRng::new(1);
        let mut state = start_round(&list, &mut rng).unwrap();
        let root = state.root_word().to_string();

        let word = match root.as_str() {
            "silkworm" => "silk",
            "absolute" => "blue",
            _ => "word",
        };
        let accepted = validate(word, &state, &|_: &str| true).unwrap();
        state.record(&accepted);

        let (history, next) = end_round(state, RoundHistory::new(), &list, &mut rng).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().root_word, root);
        assert_eq!(history.latest().unwrap().score, 5);
        assert!(next.used_words().is_empty());
        assert_eq!(next.score(), 0);
    }

    #[test]
    fn test_manager_rejects_empty_list() {
        let err = RoundManager::new(WordList::parse("\n\n")).unwrap_err();
        assert_eq!(err, RoundError::EmptyWordList);
    }

    #[test]
    fn test_manager_rounds() {
        let manager = RoundManager::new(WordList::from_words(words())).unwrap();
        let mut rng = GameRng::new(9);

        let first = manager.start_round(&mut rng).unwrap();
        let (history, second) = manager
            .end_round(first.clone(), RoundHistory::new(), &mut rng)
            .unwrap();
        let (history, _third) = manager.end_round(second.clone(), history, &mut rng).unwrap();

        assert_eq!(
            history.past_roots().collect::<Vec<_>>(),
            [second.root_word(), first.root_word()]
        );
    }
}
