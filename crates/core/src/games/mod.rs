//! Game modules - the eight mini-games behind one contract
//!
//! Every module implements [`GameModule`]: it builds its initial content from the
//! [`Catalog`], reacts to actions addressed to its kind and to its own deferred
//! timers, and reports a [`Step`] (accepted or ignored, score delta, outcome).
//! Modules never see the session score or status; the controller owns those.
//!
//! [`ModuleState`] is the tagged union the session holds. It routes an action to
//! the active module only when the action's kind matches, so a module can never
//! observe another module's commands.

pub mod choice;
pub mod connect_dots;
pub mod memory;
pub mod puzzle;
pub mod quiz;
pub mod snake;
pub mod sorting;
pub mod word_guess;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::clock::{Clock, TimerHandle};
use crate::rng::SimpleRng;
use crate::types::{ConfigError, GameAction, GameKind, Outcome};

pub use choice::ChoiceGame;
pub use connect_dots::ConnectDotsGame;
pub use memory::MemoryGame;
pub use puzzle::PuzzleGame;
pub use quiz::QuizGame;
pub use snake::SnakeGame;
pub use sorting::SortingGame;
pub use word_guess::WordGuessGame;

/// Deferred transitions owned by a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleTimer {
    /// Mismatched memory cards turn face down
    FlipBack,
    /// Quiz / choice answer has been shown long enough
    RevealAdvance,
    /// Next connect-dots pattern
    PatternAdvance,
    /// Snake movement tick
    SnakeStep,
}

/// Everything that can be queued on the session clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionTimer {
    Countdown,
    Module(ModuleTimer),
}

/// What a module may touch while handling an action or a timer
pub struct ModuleContext<'a> {
    rng: &'a mut SimpleRng,
    clock: &'a mut Clock<SessionTimer>,
}

impl<'a> ModuleContext<'a> {
    pub fn new(rng: &'a mut SimpleRng, clock: &'a mut Clock<SessionTimer>) -> Self {
        Self { rng, clock }
    }

    pub fn rng(&mut self) -> &mut SimpleRng {
        self.rng
    }

    /// One-shot deferred transition
    pub fn schedule(&mut self, delay_ms: u32, timer: ModuleTimer) -> TimerHandle {
        self.clock.schedule(delay_ms, SessionTimer::Module(timer))
    }

    /// Repeating module timer
    pub fn start_interval(&mut self, interval_ms: u32, timer: ModuleTimer) -> TimerHandle {
        self.clock.start(interval_ms, SessionTimer::Module(timer))
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.clock.cancel(handle)
    }
}

/// Result of one action or timer inside a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// False when the input was not applicable and nothing changed
    pub accepted: bool,
    pub score_delta: i32,
    pub outcome: Outcome,
}

impl Step {
    pub const IGNORED: Step = Step {
        accepted: false,
        score_delta: 0,
        outcome: Outcome::Continue,
    };

    pub fn applied(score_delta: i32) -> Self {
        Self {
            accepted: true,
            score_delta,
            outcome: Outcome::Continue,
        }
    }

    pub fn win(score_delta: i32) -> Self {
        Self {
            outcome: Outcome::Win,
            ..Self::applied(score_delta)
        }
    }

    pub fn lose(score_delta: i32) -> Self {
        Self {
            outcome: Outcome::Lose,
            ..Self::applied(score_delta)
        }
    }
}

/// Contract shared by all game modules
pub trait GameModule: Sized {
    const KIND: GameKind;

    /// Build the initial content. May start module timers.
    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError>;

    /// React to an action of this module's kind
    fn handle(&mut self, action: &GameAction, ctx: &mut ModuleContext<'_>) -> Step;

    /// React to one of this module's deferred timers
    fn on_timer(&mut self, _timer: ModuleTimer, _ctx: &mut ModuleContext<'_>) -> Step {
        Step::IGNORED
    }
}

/// Per-kind module state, owned by the session
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModuleState {
    Sorting(SortingGame),
    MemoryMatch(MemoryGame),
    Quiz(QuizGame),
    ChoiceMatch(ChoiceGame),
    Puzzle(PuzzleGame),
    Snake(SnakeGame),
    ConnectDots(ConnectDotsGame),
    WordGuess(WordGuessGame),
}

impl ModuleState {
    /// Generate fresh content for `kind`
    pub fn generate(
        kind: GameKind,
        catalog: &Catalog,
        ctx: &mut ModuleContext<'_>,
    ) -> Result<Self, ConfigError> {
        Ok(match kind {
            GameKind::Sorting => ModuleState::Sorting(SortingGame::generate(catalog, ctx)?),
            GameKind::MemoryMatch => ModuleState::MemoryMatch(MemoryGame::generate(catalog, ctx)?),
            GameKind::Quiz => ModuleState::Quiz(QuizGame::generate(catalog, ctx)?),
            GameKind::ChoiceMatch => ModuleState::ChoiceMatch(ChoiceGame::generate(catalog, ctx)?),
            GameKind::Puzzle => ModuleState::Puzzle(PuzzleGame::generate(catalog, ctx)?),
            GameKind::Snake => ModuleState::Snake(SnakeGame::generate(catalog, ctx)?),
            GameKind::ConnectDots => {
                ModuleState::ConnectDots(ConnectDotsGame::generate(catalog, ctx)?)
            }
            GameKind::WordGuess => ModuleState::WordGuess(WordGuessGame::generate(catalog, ctx)?),
        })
    }

    pub fn kind(&self) -> GameKind {
        match self {
            ModuleState::Sorting(_) => SortingGame::KIND,
            ModuleState::MemoryMatch(_) => MemoryGame::KIND,
            ModuleState::Quiz(_) => QuizGame::KIND,
            ModuleState::ChoiceMatch(_) => ChoiceGame::KIND,
            ModuleState::Puzzle(_) => PuzzleGame::KIND,
            ModuleState::Snake(_) => SnakeGame::KIND,
            ModuleState::ConnectDots(_) => ConnectDotsGame::KIND,
            ModuleState::WordGuess(_) => WordGuessGame::KIND,
        }
    }

    /// Route an action; actions of another kind are ignored
    pub fn handle(&mut self, action: &GameAction, ctx: &mut ModuleContext<'_>) -> Step {
        if action.kind() != self.kind() {
            return Step::IGNORED;
        }
        match self {
            ModuleState::Sorting(game) => game.handle(action, ctx),
            ModuleState::MemoryMatch(game) => game.handle(action, ctx),
            ModuleState::Quiz(game) => game.handle(action, ctx),
            ModuleState::ChoiceMatch(game) => game.handle(action, ctx),
            ModuleState::Puzzle(game) => game.handle(action, ctx),
            ModuleState::Snake(game) => game.handle(action, ctx),
            ModuleState::ConnectDots(game) => game.handle(action, ctx),
            ModuleState::WordGuess(game) => game.handle(action, ctx),
        }
    }

    pub fn on_timer(&mut self, timer: ModuleTimer, ctx: &mut ModuleContext<'_>) -> Step {
        match self {
            ModuleState::Sorting(game) => game.on_timer(timer, ctx),
            ModuleState::MemoryMatch(game) => game.on_timer(timer, ctx),
            ModuleState::Quiz(game) => game.on_timer(timer, ctx),
            ModuleState::ChoiceMatch(game) => game.on_timer(timer, ctx),
            ModuleState::Puzzle(game) => game.on_timer(timer, ctx),
            ModuleState::Snake(game) => game.on_timer(timer, ctx),
            ModuleState::ConnectDots(game) => game.on_timer(timer, ctx),
            ModuleState::WordGuess(game) => game.on_timer(timer, ctx),
        }
    }
}
