//! Guess-evaluation state machine.
//!
//! Holds the secret word, per-letter reveal state, the wrong-guess set, and
//! the remaining wrong-guess budget. Everything the interface displays is
//! derived from this state; the engine itself performs no rendering.

use crate::{debug_log, info_log};

/// Extra wrong guesses granted on top of the word length each round.
pub const BUDGET_BONUS: u32 = 2;

/// Budget reported before any round has started.
pub const DEFAULT_BUDGET: u32 = 6;

/// Glyph shown for a letter that has not been revealed yet.
pub const PLACEHOLDER: char = '\u{2022}';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoundResult {
    InProgress,
    Won,
    Lost,
}

/// Result of a single [`GameEngine::submit_guess`] call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GuessOutcome {
    /// The letter occurs in the word; every matching slot is now revealed.
    Correct,
    /// The letter does not occur in the word; the budget dropped by one.
    Incorrect,
    /// The guess was redundant: already a known miss, or every matching
    /// slot was revealed before this call. No state changed.
    AlreadyGuessed,
    /// A correct guess that completed the word.
    Won,
    /// An incorrect guess that exhausted the budget.
    Lost,
    /// The round was already over (or never started). No state changed.
    AlreadyOver,
}

#[derive(Debug, Clone)]
struct LetterSlot {
    character: char,
    position: usize,
    revealed: bool,
}

/// One cell of the masked-word projection handed to the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MaskCell {
    pub character: char,
    pub revealed: bool,
}

impl MaskCell {
    /// The glyph to display: the letter itself once revealed, a bullet before.
    #[must_use]
    pub fn display(self) -> char {
        if self.revealed {
            self.character
        } else {
            PLACEHOLDER
        }
    }
}

#[derive(Debug)]
pub struct GameEngine {
    secret: String,
    slots: Vec<LetterSlot>,
    wrong_guesses: Vec<char>,
    remaining: u32,
}

impl GameEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            secret: String::new(),
            slots: Vec::new(),
            wrong_guesses: Vec::new(),
            remaining: DEFAULT_BUDGET,
        }
    }

    /// Begin a new round with `word` as the secret. All previous round state
    /// is discarded. Calling with an empty word is a no-op; callers are
    /// expected to validate words before starting a round.
    pub fn start_round(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let word = word.to_lowercase();
        self.slots = word
            .chars()
            .enumerate()
            .map(|(position, character)| LetterSlot {
                character,
                position,
                revealed: false,
            })
            .collect();
        self.remaining = self.slots.len() as u32 + BUDGET_BONUS;
        self.wrong_guesses.clear();
        self.secret = word;
        info_log!(
            "start_round() - {} letters, budget {}",
            self.slots.len(),
            self.remaining
        );
    }

    /// Evaluate a single guessed letter. Comparison is case-insensitive.
    ///
    /// A matching letter reveals every unrevealed slot holding it in this one
    /// call, not just the first occurrence. A miss records the letter and
    /// costs one unit of budget. Redundant guesses change nothing.
    pub fn submit_guess(&mut self, letter: char) -> GuessOutcome {
        if self.slots.is_empty() || self.result() != RoundResult::InProgress {
            debug_log!("submit_guess('{}') - round not in progress", letter);
            return GuessOutcome::AlreadyOver;
        }

        let letter = letter.to_ascii_lowercase();
        let occurrences = self
            .slots
            .iter()
            .filter(|slot| slot.character == letter)
            .count();
        let unrevealed = self
            .slots
            .iter()
            .filter(|slot| slot.character == letter && !slot.revealed)
            .count();

        if self.wrong_guesses.contains(&letter) || (occurrences > 0 && unrevealed == 0) {
            debug_log!("submit_guess('{}') - already guessed", letter);
            return GuessOutcome::AlreadyGuessed;
        }

        if occurrences > 0 {
            for slot in self
                .slots
                .iter_mut()
                .filter(|slot| slot.character == letter)
            {
                slot.revealed = true;
                debug_log!("revealed position {}", slot.position);
            }
            if self.result() == RoundResult::Won {
                GuessOutcome::Won
            } else {
                GuessOutcome::Correct
            }
        } else {
            self.wrong_guesses.push(letter);
            self.remaining -= 1;
            info_log!(
                "submit_guess('{}') - miss, {} remaining",
                letter,
                self.remaining
            );
            if self.remaining == 0 {
                GuessOutcome::Lost
            } else {
                GuessOutcome::Incorrect
            }
        }
    }

    /// Read-only projection of the word mask for rendering.
    #[must_use]
    pub fn current_mask(&self) -> Vec<MaskCell> {
        self.slots
            .iter()
            .map(|slot| MaskCell {
                character: slot.character,
                revealed: slot.revealed,
            })
            .collect()
    }

    #[must_use]
    pub fn result(&self) -> RoundResult {
        if self.slots.is_empty() {
            RoundResult::InProgress
        } else if self.slots.iter().all(|slot| slot.revealed) {
            RoundResult::Won
        } else if self.remaining == 0 {
            RoundResult::Lost
        } else {
            RoundResult::InProgress
        }
    }

    /// Wrong guesses so far, in the order they were made.
    #[must_use]
    pub fn wrong_guesses(&self) -> &[char] {
        &self.wrong_guesses
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
