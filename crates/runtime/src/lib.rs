//! Real-time runtime for eco game sessions.
//!
//! The core engine never reads the clock. This crate runs a session inside a
//! tokio task, feeds it wall-clock time every frame and exposes it to hosts
//! through a channel-based [`SessionHandle`].
//!
//! # Environment Variables
//!
//! - `ECO_GAMES_SEED`: fixed RNG seed (default: random per session)
//! - `ECO_GAMES_FRAME_MS`: wall-clock polling period (default: 50)
//! - `ECO_GAMES_MAX_CATCH_UP_MS`: most time fed per wake-up (default: 1000)
//! - `ECO_GAMES_MAX_PENDING`: command channel capacity (default: 32)
//!
//! # Timer Drift
//!
//! When the host is suspended (laptop lid closed, process stopped), the next
//! wake-up feeds at most `ECO_GAMES_MAX_CATCH_UP_MS` into the session. The
//! countdown and the snake resume where they paused instead of replaying every
//! missed tick at once.

pub mod config;
pub mod runner;

pub use eco_games_core as core;
pub use eco_games_types as types;

pub use config::RuntimeConfig;
pub use runner::{spawn_session, ChannelObserver, SessionCommand, SessionEvent, SessionHandle};

use anyhow::Context;

use crate::core::{Catalog, GameSession};
use crate::types::GameConfig;

/// Build a session with the configured (or a random) seed
pub fn new_session(
    game: GameConfig,
    catalog: Option<Catalog>,
    config: &RuntimeConfig,
) -> anyhow::Result<GameSession> {
    let seed = config.seed_or_random();
    let id = game.id.clone();
    let session = GameSession::with_catalog(game, catalog.unwrap_or_default(), seed)
        .with_context(|| format!("invalid game '{id}'"))?;
    tracing::debug!(game_id = %id, seed, "session created");
    Ok(session)
}
