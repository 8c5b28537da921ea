//! Dictionary oracle and word lists.
//!
//! The validator only needs to ask "is this a real word?". Where the answer
//! comes from (a spell-checker, a static file, a remote service) is up to the
//! caller, so it sits behind the [`Dictionary`] trait.

use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::validator::normalize;

/// Answers whether a normalized word is a real dictionary word.
pub trait Dictionary {
    fn is_real_word(&self, word: &str) -> bool;
}

impl<F> Dictionary for F
where
    F: Fn(&str) -> bool,
{
    fn is_real_word(&self, word: &str) -> bool {
        self(word)
    }
}

/// Normalize words, dropping the ones that end up blank.
fn normalized_words<I, S>(words: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| normalize(w.as_ref()))
        .filter(|w| !w.is_empty())
}

/// Static dictionary backed by a set of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from newline-delimited text, one word per line.
    pub fn parse(text: &str) -> Self {
        Self {
            words: normalized_words(text.lines()).collect(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: normalized_words(words).collect(),
        }
    }

    pub fn insert(&mut self, word: &str) -> bool {
        let word = normalize(word);
        !word.is_empty() && self.words.insert(word)
    }

    /// Case-insensitive membership check.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordSet {
    fn is_real_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Ordered list of candidate root words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Build from the newline-delimited start-word resource.
    ///
    /// Lines are trimmed and lowercased. Blank lines (including the one a
    /// trailing newline produces) are skipped rather than turned into empty
    /// root words.
    pub fn parse(text: &str) -> Self {
        let words: Vec<String> = normalized_words(text.lines()).collect();
        log::debug!("Parsed word list with {} root words", words.len());
        Self { words }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: normalized_words(words).collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

impl From<Vec<String>> for WordList {
    fn from(words: Vec<String>) -> Self {
        Self::from_words(words)
    }
}

impl From<WordList> for Vec<String> {
    fn from(list: WordList) -> Self {
        list.words
    }
}

impl Deref for WordList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.words
    }
}
