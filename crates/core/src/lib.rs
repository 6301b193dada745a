//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the eco mini-game engine: the session controller, the
//! eight game modules and the content they are dealt. It has **no I/O**: time is
//! virtual and randomness is seeded, making it:
//!
//! - **Deterministic**: Same seed and same inputs produce the same game
//! - **Testable**: Deferred transitions run on a virtual clock, no sleeping
//! - **Portable**: The same session runs in a terminal host, a tokio task or a test
//!
//! # Module Structure
//!
//! - [`clock`]: Virtual timer queue with idempotent cancellation
//! - [`rng`]: Seeded LCG used for every shuffle and spawn
//! - [`catalog`]: Static content (items, cards, questions, foods, words) and its validation
//! - [`generators`]: Shuffled initial content per module
//! - [`presets`]: The built-in challenges
//! - [`games`]: The [`GameModule`] contract and the eight modules
//! - [`session`]: Lifecycle, score, countdown and completion
//! - [`snapshot`]: Serializable session view
//!
//! # Example
//!
//! ```
//! use eco_games_core::{Catalog, Dispatch, GameSession, ModuleState};
//! use eco_games_types::{GameAction, GameConfig, GameKind};
//!
//! let config = GameConfig::new("w", "Words", GameKind::WordGuess).with_points(90);
//! let mut catalog = Catalog::builtin();
//! catalog.words.retain(|w| w.word == "SUN");
//!
//! let mut session = GameSession::with_catalog(config, catalog, 1).unwrap();
//! session.start().unwrap();
//!
//! for letter in ['S', 'U'] {
//!     session.dispatch(GameAction::GuessLetter { letter });
//! }
//! let Dispatch::Completed(report) = session.dispatch(GameAction::GuessLetter { letter: 'N' }) else {
//!     panic!("word should be revealed");
//! };
//! assert_eq!(report.score, 30);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::advance`] with elapsed milliseconds. The countdown ticks
//! every second; the snake steps every 300 ms; memory, quiz, choice and
//! connect-dots use one-shot deferred transitions.

pub mod catalog;
pub mod clock;
pub mod games;
pub mod generators;
pub mod presets;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use eco_games_types as types;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use clock::{Clock, TimerHandle};
pub use games::{GameModule, ModuleContext, ModuleState, ModuleTimer, SessionTimer, Step};
pub use presets::{challenge_presets, find_preset};
pub use rng::SimpleRng;
pub use session::{Dispatch, GameSession, NoopObserver, SessionObserver};
pub use snapshot::SessionSnapshot;
