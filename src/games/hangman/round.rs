//! Round engine: one secret word, one guesser, until the word is found,
//! the lives run out or the clock hits zero.

use std::collections::BTreeSet;

use super::config::{MAX_WRONG_GUESSES, MIN_WRONG_GUESSES};
use super::error::ValidationError;

/// Stands in for a letter that has not been guessed yet
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    InProgress,
    Won,
    LostByLives,
    LostByTimeout,
}

impl RoundOutcome {
    pub fn is_over(self) -> bool {
        self != RoundOutcome::InProgress
    }
}

/// What a single guess did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    /// Repeated letter, not a letter, or the round is already over
    Ignored,
    /// Letter present; number of positions revealed
    Hit(usize),
    Miss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    secret_word: String,
    hint: String,
    masked: Vec<char>,
    tried: BTreeSet<char>,
    wrong_guesses: u8,
    max_wrong_guesses: u8,
    time_remaining: f32,
    outcome: RoundOutcome,
}

impl Round {
    /// Validates the setter's input and the limits, then opens a round with
    /// every letter masked.
    pub fn start(
        secret_word: &str,
        hint: &str,
        max_wrong_guesses: u8,
        time_limit_secs: u32,
    ) -> Result<Self, ValidationError> {
        validate_word(secret_word)?;
        if hint.trim().is_empty() {
            return Err(ValidationError::EmptyHint);
        }
        if !(MIN_WRONG_GUESSES..=MAX_WRONG_GUESSES).contains(&max_wrong_guesses) {
            return Err(ValidationError::WrongGuessLimit {
                got: max_wrong_guesses,
                min: MIN_WRONG_GUESSES,
                max: MAX_WRONG_GUESSES,
            });
        }
        if time_limit_secs == 0 {
            return Err(ValidationError::NoTime);
        }

        let masked = secret_word
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { PLACEHOLDER } else { c })
            .collect();

        Ok(Self {
            secret_word: secret_word.to_string(),
            hint: hint.to_string(),
            masked,
            tried: BTreeSet::new(),
            wrong_guesses: 0,
            max_wrong_guesses,
            time_remaining: time_limit_secs as f32,
            outcome: RoundOutcome::InProgress,
        })
    }

    /// Runs the clock down. Returns true if this tick ended the round.
    pub fn tick(&mut self, elapsed_secs: f32) -> bool {
        // also rejects NaN
        if self.is_over() || !(elapsed_secs > 0.0) {
            return false;
        }
        self.time_remaining -= elapsed_secs;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.outcome = RoundOutcome::LostByTimeout;
            return true;
        }
        false
    }

    /// Applies one letter. Case-insensitive; revealed letters keep the
    /// casing the setter typed.
    pub fn guess(&mut self, letter: char) -> Guess {
        if self.is_over() || !letter.is_ascii_alphabetic() {
            return Guess::Ignored;
        }
        let letter = letter.to_ascii_uppercase();
        if !self.tried.insert(letter) {
            return Guess::Ignored;
        }

        let mut revealed = 0;
        for (slot, c) in self.masked.iter_mut().zip(self.secret_word.chars()) {
            if c.to_ascii_uppercase() == letter {
                *slot = c;
                revealed += 1;
            }
        }

        if revealed == 0 {
            self.wrong_guesses += 1;
            if self.wrong_guesses >= self.max_wrong_guesses {
                self.outcome = RoundOutcome::LostByLives;
            }
            Guess::Miss
        } else {
            if !self.masked.contains(&PLACEHOLDER) {
                self.outcome = RoundOutcome::Won;
            }
            Guess::Hit(revealed)
        }
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn masked_word(&self) -> String {
        self.masked.iter().collect()
    }

    /// Uppercase letters tried so far, alphabetical
    pub fn tried_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.tried.iter().copied()
    }

    pub fn has_tried(&self, letter: char) -> bool {
        self.tried.contains(&letter.to_ascii_uppercase())
    }

    pub fn wrong_guesses(&self) -> u8 {
        self.wrong_guesses
    }

    pub fn max_wrong_guesses(&self) -> u8 {
        self.max_wrong_guesses
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }
}

/// Letters and spaces only, with at least one letter.
pub fn validate_word(word: &str) -> Result<(), ValidationError> {
    if let Some(bad) = word.chars().find(|c| !c.is_ascii_alphabetic() && *c != ' ') {
        return Err(ValidationError::InvalidCharacter(bad));
    }
    if !word.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::NoLetters);
    }
    Ok(())
}
