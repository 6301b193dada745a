//! Eco mini-games (workspace facade crate).
//!
//! This package exposes the `eco_games::{core,input,runtime,types}` public API while the
//! implementation lives in dedicated crates under `crates/`. The only code kept here is the
//! plain-text [`view`] used by the terminal host.

pub use eco_games_core as core;
pub use eco_games_input as input;
pub use eco_games_runtime as runtime;
pub use eco_games_types as types;

pub mod view;
