//! Eco word builder: reveal a hidden word one letter at a time.
//!
//! Letters come from a shuffled board that always contains every letter of
//! the word. Each letter can be guessed once. A hit reveals all its occurrences;
//! a miss counts towards [`WORD_MAX_WRONG_GUESSES`].

use serde::Serialize;

use super::{GameModule, ModuleContext, Step};
use crate::catalog::Catalog;
use crate::generators;
use crate::types::{
    ConfigError, GameAction, GameKind, WORD_LETTER_POINTS, WORD_MAX_WRONG_GUESSES,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordGuessGame {
    word: String,
    clue: String,
    emoji: String,
    revealed: Vec<bool>,
    board: Vec<char>,
    guessed: Vec<char>,
    wrong_guesses: u8,
    max_wrong_guesses: u8,
}

impl WordGuessGame {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn clue(&self) -> &str {
        &self.clue
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// Letters the player can choose from
    pub fn board(&self) -> &[char] {
        &self.board
    }

    pub fn guessed(&self) -> &[char] {
        &self.guessed
    }

    pub fn wrong_guesses(&self) -> u8 {
        self.wrong_guesses
    }

    pub fn max_wrong_guesses(&self) -> u8 {
        self.max_wrong_guesses
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.iter().all(|&r| r)
    }

    /// The word with unrevealed letters as `_`, e.g. `S _ N`
    pub fn masked(&self) -> String {
        self.word
            .chars()
            .zip(&self.revealed)
            .map(|(c, &shown)| if shown { c.to_string() } else { "_".to_string() })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_over(&self) -> bool {
        self.is_revealed() || self.wrong_guesses >= self.max_wrong_guesses
    }
}

impl GameModule for WordGuessGame {
    const KIND: GameKind = GameKind::WordGuess;

    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        let entry = generators::pick_word(catalog, ctx.rng()).ok_or(ConfigError::EmptyContent {
            kind: Self::KIND,
            section: "words",
        })?;
        let board = generators::letter_board(&entry.word, ctx.rng());
        Ok(Self {
            revealed: vec![false; entry.word.chars().count()],
            word: entry.word,
            clue: entry.clue,
            emoji: entry.emoji,
            board,
            guessed: Vec::new(),
            wrong_guesses: 0,
            max_wrong_guesses: WORD_MAX_WRONG_GUESSES,
        })
    }

    fn handle(&mut self, action: &GameAction, _ctx: &mut ModuleContext<'_>) -> Step {
        let GameAction::GuessLetter { letter } = *action else {
            return Step::IGNORED;
        };
        let letter = letter.to_ascii_uppercase();
        if self.is_over() || !self.board.contains(&letter) || self.guessed.contains(&letter) {
            return Step::IGNORED;
        }
        self.guessed.push(letter);

        let mut hit = false;
        for (c, shown) in self.word.chars().zip(self.revealed.iter_mut()) {
            if c == letter {
                *shown = true;
                hit = true;
            }
        }

        if hit {
            if self.is_revealed() {
                Step::win(WORD_LETTER_POINTS)
            } else {
                Step::applied(WORD_LETTER_POINTS)
            }
        } else {
            self.wrong_guesses += 1;
            if self.wrong_guesses >= self.max_wrong_guesses {
                Step::lose(0)
            } else {
                Step::applied(0)
            }
        }
    }
}
