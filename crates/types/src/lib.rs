//! Core types module - shared data structures and constants
//!
//! This crate defines the vocabulary shared by the engine, its hosts and the
//! input layer. Everything here is plain data: no clocks, no randomness, no I/O.
//!
//! # Game Kinds
//!
//! | Kind | Host alias | Completes on |
//! |------|------------|--------------|
//! | `sorting` | - | every item placed in a bin |
//! | `memory-match` | `memory` | every pair matched |
//! | `quiz` | - | last question revealed |
//! | `choice-match` | `matching` | last pair revealed |
//! | `puzzle` | - | every slot filled |
//! | `snake` | - | collision (lose) or time expiry |
//! | `connect-dots` | `connect` | last pattern drawn |
//! | `word-guess` | `word` | word revealed (win) or 6 misses (lose) |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `COUNTDOWN_TICK_MS` | 1000 | Session countdown resolution |
//! | `SNAKE_STEP_MS` | 300 | Snake movement cadence |
//! | `MEMORY_FLIP_BACK_MS` | 1000 | Mismatched cards stay visible this long |
//! | `QUIZ_REVEAL_MS` | 2000 | Answer + explanation shown before advancing |
//! | `CHOICE_REVEAL_MS` | 1500 | Choice feedback shown before advancing |
//! | `PATTERN_ADVANCE_MS` | 500 | Pause between connect-dots patterns |
//!
//! # Examples
//!
//! ```
//! use eco_games_types::{Cell, Direction, GameAction, GameKind};
//!
//! // Host names and engine names both resolve
//! assert_eq!(GameKind::from_str("memory"), Some(GameKind::MemoryMatch));
//! assert_eq!(GameKind::from_str("word-guess"), Some(GameKind::WordGuess));
//!
//! // Actions know which module they belong to
//! let action = GameAction::GuessLetter { letter: 'S' };
//! assert_eq!(action.kind(), GameKind::WordGuess);
//!
//! // Grid movement
//! assert_eq!(Cell::new(5, 5).step(Direction::Right), Cell::new(6, 5));
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! ```

pub mod config;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, GameConfig};

/// Countdown resolution for time-limited sessions (1 second)
pub const COUNTDOWN_TICK_MS: u32 = 1000;

/// Snake advances one cell per step
pub const SNAKE_STEP_MS: u32 = 300;

/// Delay before a mismatched pair of memory cards turns face down again
pub const MEMORY_FLIP_BACK_MS: u32 = 1000;

/// Delay between answering a quiz question and moving on
pub const QUIZ_REVEAL_MS: u32 = 2000;

/// Delay between a sustainable-choice answer and the next pair
pub const CHOICE_REVEAL_MS: u32 = 1500;

/// Delay between finishing a dot pattern and showing the next one
pub const PATTERN_ADVANCE_MS: u32 = 500;

/// Points for dropping an item into its bin
pub const SORT_CORRECT_POINTS: i32 = 10;

/// Points for dropping an item into the wrong bin
pub const SORT_WRONG_POINTS: i32 = -5;

/// Points for a matched memory pair
pub const MEMORY_MATCH_POINTS: i32 = 20;

/// Points for a correct quiz answer
pub const QUIZ_CORRECT_POINTS: i32 = 20;

/// Points for picking the sustainable alternative
pub const CHOICE_CORRECT_POINTS: i32 = 15;

/// Points for a puzzle piece landing in its own slot
pub const PUZZLE_CORRECT_POINTS: i32 = 20;

/// Points for completing one dot connection
pub const DOT_CONNECTION_POINTS: i32 = 10;

/// Points for a letter that occurs in the hidden word
pub const WORD_LETTER_POINTS: i32 = 10;

/// Wrong guesses allowed before the word game is lost
pub const WORD_MAX_WRONG_GUESSES: u8 = 6;

/// Letters offered on the word-guess board
pub const WORD_LETTER_BOARD_SIZE: usize = 18;

/// Snake playfield is `SNAKE_GRID_SIZE` x `SNAKE_GRID_SIZE`
pub const SNAKE_GRID_SIZE: i16 = 10;

/// Snake spawn cell
pub const SNAKE_START: Cell = Cell { x: 5, y: 5 };

/// Number of slots on the puzzle board
pub const PUZZLE_SLOTS: usize = 6;

/// Score points per awarded eco point
pub const ECO_POINTS_DIVISOR: u32 = 10;


/// The eight game modules the engine knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Sorting,
    #[serde(alias = "memory")]
    MemoryMatch,
    Quiz,
    #[serde(alias = "matching")]
    ChoiceMatch,
    Puzzle,
    Snake,
    #[serde(alias = "connect")]
    ConnectDots,
    #[serde(alias = "word")]
    WordGuess,
}

impl GameKind {
    pub const ALL: [GameKind; 8] = [
        GameKind::Sorting,
        GameKind::MemoryMatch,
        GameKind::Quiz,
        GameKind::ChoiceMatch,
        GameKind::Puzzle,
        GameKind::Snake,
        GameKind::ConnectDots,
        GameKind::WordGuess,
    ];

    /// Parse a kind from its engine name or host alias (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use eco_games_types::GameKind;
    ///
    /// assert_eq!(GameKind::from_str("Sorting"), Some(GameKind::Sorting));
    /// assert_eq!(GameKind::from_str("memory-match"), Some(GameKind::MemoryMatch));
    /// assert_eq!(GameKind::from_str("memory"), Some(GameKind::MemoryMatch));
    /// assert_eq!(GameKind::from_str("chess"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sorting" => Some(GameKind::Sorting),
            "memory-match" | "memory" => Some(GameKind::MemoryMatch),
            "quiz" => Some(GameKind::Quiz),
            "choice-match" | "matching" => Some(GameKind::ChoiceMatch),
            "puzzle" => Some(GameKind::Puzzle),
            "snake" => Some(GameKind::Snake),
            "connect-dots" | "connect" => Some(GameKind::ConnectDots),
            "word-guess" | "word" => Some(GameKind::WordGuess),
            _ => None,
        }
    }

    /// Engine name, as written in configs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Sorting => "sorting",
            GameKind::MemoryMatch => "memory-match",
            GameKind::Quiz => "quiz",
            GameKind::ChoiceMatch => "choice-match",
            GameKind::Puzzle => "puzzle",
            GameKind::Snake => "snake",
            GameKind::ConnectDots => "connect-dots",
            GameKind::WordGuess => "word-guess",
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid offset for one step; y grows downwards
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse direction from string
    ///
    /// Accepts full names or WASD keys (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "w" => Some(Direction::Up),
            "down" | "s" => Some(Direction::Down),
            "left" | "a" => Some(Direction::Left),
            "right" | "d" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A cell on a square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction` (may be off the grid)
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(self, size: i16) -> bool {
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }
}

/// Player commands forwarded to the active game module
///
/// Every action belongs to exactly one [`GameKind`]; the engine ignores an
/// action whose kind differs from the running module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameAction {
    /// Drop the item at `item` (index into the item list) into bin `bin`
    AssignItemToBin { item: usize, bin: usize },
    /// Turn the memory card at `index` face up
    FlipCard { index: usize },
    /// Answer the current quiz question with option `index`
    SelectOption { index: usize },
    /// Pick the sustainable alternative for the current pair
    ChooseSustainable,
    /// Stay with the unsustainable item for the current pair
    KeepUnsustainable,
    /// Put piece `piece` (index into the piece tray) into the next free slot
    PlacePiece { piece: usize },
    /// Steer the snake
    SetDirection { direction: Direction },
    /// Touch dot `index` of the current pattern
    SelectDot { index: usize },
    /// Guess a letter of the hidden word
    GuessLetter { letter: char },
}

impl GameAction {
    /// The module this action is addressed to
    pub fn kind(&self) -> GameKind {
        match self {
            GameAction::AssignItemToBin { .. } => GameKind::Sorting,
            GameAction::FlipCard { .. } => GameKind::MemoryMatch,
            GameAction::SelectOption { .. } => GameKind::Quiz,
            GameAction::ChooseSustainable | GameAction::KeepUnsustainable => {
                GameKind::ChoiceMatch
            }
            GameAction::PlacePiece { .. } => GameKind::Puzzle,
            GameAction::SetDirection { .. } => GameKind::Snake,
            GameAction::SelectDot { .. } => GameKind::ConnectDots,
            GameAction::GuessLetter { .. } => GameKind::WordGuess,
        }
    }

    /// camelCase name, matching the serialized `type` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::AssignItemToBin { .. } => "assignItemToBin",
            GameAction::FlipCard { .. } => "flipCard",
            GameAction::SelectOption { .. } => "selectOption",
            GameAction::ChooseSustainable => "chooseSustainable",
            GameAction::KeepUnsustainable => "keepUnsustainable",
            GameAction::PlacePiece { .. } => "placePiece",
            GameAction::SetDirection { .. } => "setDirection",
            GameAction::SelectDot { .. } => "selectDot",
            GameAction::GuessLetter { .. } => "guessLetter",
        }
    }
}

/// Per-step result reported by a game module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Continue,
    Win,
    Lose,
}

/// Session lifecycle
///
/// - **NotStarted**: screen opened, no content generated yet
/// - **Running**: content generated, actions and timers accepted
/// - **Completed**: terminal until the session is reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    #[default]
    NotStarted,
    Running,
    Completed,
}

/// Why a session completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionReason {
    Win,
    Lose,
    TimeExpired,
}

impl CompletionReason {
    /// Map a module outcome; `Continue` does not complete anything
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Continue => None,
            Outcome::Win => Some(CompletionReason::Win),
            Outcome::Lose => Some(CompletionReason::Lose),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionReason::Win => "win",
            CompletionReason::Lose => "lose",
            CompletionReason::TimeExpired => "timeExpired",
        }
    }
}

/// Delivered to the host exactly once per completed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub game_id: String,
    pub kind: GameKind,
    pub score: u32,
    pub time_spent_secs: u32,
    pub reason: CompletionReason,
    /// `score / ECO_POINTS_DIVISOR`
    pub eco_points: u32,
    /// `Some(score >= min_score)` when the config sets a pass mark
    pub passed: Option<bool>,
}
