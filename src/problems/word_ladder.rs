//! Word ladders: turn one word into another changing a letter at a time,
//! every intermediate word being in the dictionary.

use std::io::BufRead;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::puzzle::Puzzle;

/// Letters a position can be changed to.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("I/O error when loading '{p}': {e}")]
    IOError { p: PathBuf, e: std::io::Error },
}

/// A read-only set of words, shared by every state of a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: FxHashSet<String>,
}

impl Dictionary {
    /// Loads a newline-delimited word list, ignoring blank lines.
    pub fn load(p: &Path) -> Result<Self, DictionaryError> {
        let io_error = |e| DictionaryError::IOError {
            p: p.to_path_buf(),
            e,
        };
        let file = std::fs::File::open(p).map_err(io_error)?;

        let mut words = FxHashSet::default();
        for line in std::io::BufReader::new(file).lines() {
            let line = line.map_err(io_error)?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }
        log::debug!("Loaded {} words from {p:?}", words.len());

        Ok(Self { words })
    }

    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WordLadderState {
    word: String,
    goal: String,
    dictionary: Arc<Dictionary>,
}

impl WordLadderState {
    pub fn new(
        word: impl Into<String>,
        goal: impl Into<String>,
        dictionary: Arc<Dictionary>,
    ) -> Self {
        Self {
            word: word.into(),
            goal: goal.into(),
            dictionary,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn step(&self, word: String) -> Self {
        Self {
            word,
            goal: self.goal.clone(),
            dictionary: Arc::clone(&self.dictionary),
        }
    }
}

impl PartialEq for WordLadderState {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
            && self.goal == other.goal
            && (Arc::ptr_eq(&self.dictionary, &other.dictionary)
                || self.dictionary == other.dictionary)
    }
}
impl Eq for WordLadderState {}

impl Puzzle for WordLadderState {
    type Key = String;

    /// Dictionary words differing from this one in exactly one position.
    fn extensions(&self) -> Vec<Self> {
        let mut letters: Vec<char> = self.word.chars().collect();
        let mut extensions = vec![];

        for i in 0..letters.len() {
            let original = letters[i];
            for ch in ALPHABET.chars() {
                if ch == original {
                    continue;
                }
                letters[i] = ch;
                let candidate: String = letters.iter().collect();
                if self.dictionary.contains(&candidate) {
                    extensions.push(self.step(candidate));
                }
            }
            letters[i] = original;
        }

        extensions
    }

    fn is_solved(&self) -> bool {
        self.word == self.goal
    }

    fn key(&self) -> Self::Key {
        self.word.clone()
    }
}

impl std::fmt::Display for WordLadderState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.word)
    }
}
