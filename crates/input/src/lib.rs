//! Text input module (engine-facing).
//!
//! Maps one line of host input to a [`HostCommand`]: either a session command
//! (start, reset, abort, ...) or a [`crate::types::GameAction`] for the running
//! game kind. The same word can mean different things per kind (`s` steers the
//! snake down but guesses an `S` in the word game), so parsing always takes the
//! active [`crate::types::GameKind`].

pub mod map;

pub use eco_games_types as types;

pub use map::{parse_command, usage, HostCommand};
