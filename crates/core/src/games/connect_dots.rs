//! Connect eco dots: draw each pattern's connections in order.
//!
//! Only the two endpoints of the next required connection respond to a
//! selection. Once both are connected the connection is drawn and the next one
//! becomes active. Finishing a pattern shows the next after
//! [`PATTERN_ADVANCE_MS`]; finishing the last pattern wins.

use serde::Serialize;

use super::{GameModule, ModuleContext, ModuleTimer, Step};
use crate::catalog::Catalog;
use crate::clock::TimerHandle;
use crate::generators;
use crate::types::{
    ConfigError, GameAction, GameKind, DOT_CONNECTION_POINTS, PATTERN_ADVANCE_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub x: i16,
    pub y: i16,
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DotPattern {
    pub name: String,
    pub emoji: String,
    pub dots: Vec<Dot>,
    pub connections: Vec<(usize, usize)>,
    pub next_connection: usize,
}

impl DotPattern {
    pub fn is_complete(&self) -> bool {
        self.next_connection >= self.connections.len()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectDotsGame {
    patterns: Vec<DotPattern>,
    current: usize,
    /// Between a finished pattern and the next one
    advancing: bool,
    #[serde(skip)]
    advance_timer: Option<TimerHandle>,
}

impl ConnectDotsGame {
    pub fn patterns(&self) -> &[DotPattern] {
        &self.patterns
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_pattern(&self) -> Option<&DotPattern> {
        self.patterns.get(self.current)
    }

    /// Endpoints of the connection waiting to be drawn
    pub fn next_connection(&self) -> Option<(usize, usize)> {
        let pattern = self.current_pattern()?;
        pattern.connections.get(pattern.next_connection).copied()
    }

    pub fn is_advancing(&self) -> bool {
        self.advancing
    }
}

impl GameModule for ConnectDotsGame {
    const KIND: GameKind = GameKind::ConnectDots;

    fn generate(catalog: &Catalog, _ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        let patterns = generators::dot_patterns(catalog)
            .into_iter()
            .map(|spec| DotPattern {
                name: spec.name,
                emoji: spec.emoji,
                dots: spec
                    .dots
                    .into_iter()
                    .map(|(x, y)| Dot {
                        x,
                        y,
                        connected: false,
                    })
                    .collect(),
                connections: spec.connections,
                next_connection: 0,
            })
            .collect();
        Ok(Self {
            patterns,
            current: 0,
            advancing: false,
            advance_timer: None,
        })
    }

    fn handle(&mut self, action: &GameAction, ctx: &mut ModuleContext<'_>) -> Step {
        let GameAction::SelectDot { index } = *action else {
            return Step::IGNORED;
        };
        if self.advancing {
            return Step::IGNORED;
        }
        let Some((a, b)) = self.next_connection() else {
            return Step::IGNORED;
        };
        if index != a && index != b {
            return Step::IGNORED;
        }
        let last_pattern = self.current + 1 >= self.patterns.len();
        let Some(pattern) = self.patterns.get_mut(self.current) else {
            return Step::IGNORED;
        };

        let was_connected = pattern.dots[index].connected;
        pattern.dots[index].connected = true;
        if !(pattern.dots[a].connected && pattern.dots[b].connected) {
            return if was_connected {
                Step::IGNORED
            } else {
                Step::applied(0)
            };
        }

        pattern.next_connection += 1;
        if !pattern.is_complete() {
            return Step::applied(DOT_CONNECTION_POINTS);
        }
        tracing::debug!(pattern = %pattern.name, "dot pattern complete");
        if last_pattern {
            return Step::win(DOT_CONNECTION_POINTS);
        }
        self.advancing = true;
        self.advance_timer = Some(ctx.schedule(PATTERN_ADVANCE_MS, ModuleTimer::PatternAdvance));
        Step::applied(DOT_CONNECTION_POINTS)
    }

    fn on_timer(&mut self, timer: ModuleTimer, _ctx: &mut ModuleContext<'_>) -> Step {
        if timer != ModuleTimer::PatternAdvance || self.advance_timer.take().is_none() {
            return Step::IGNORED;
        }
        self.current += 1;
        self.advancing = false;
        Step::applied(0)
    }
}
