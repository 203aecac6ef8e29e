use super::role::WordType;
use serde::{Deserialize, Serialize};

/// The two secret words of a game, supplied by the caller.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct WordPair {
    /// The word dealt to the civil team.
    pub main: String,
    /// The related word dealt to the undercover players.
    pub similar: String,
}

impl WordPair {
    pub fn new(main: impl Into<String>, similar: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            similar: similar.into(),
        }
    }

    /// Gets the word dealt for the given word type, if any.
    pub fn word_for(&self, word_type: WordType) -> Option<&str> {
        match word_type {
            WordType::Main => Some(&self.main),
            WordType::Similar => Some(&self.similar),
            WordType::None => None,
        }
    }

    /// Returns whether a guess names the main word, ignoring case and surrounding whitespace.
    pub fn matches_main(&self, guess: &str) -> bool {
        guess.trim().to_lowercase() == self.main.trim().to_lowercase()
    }
}
