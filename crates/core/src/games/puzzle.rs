//! Earth puzzle: pieces fill the board left to right.

use serde::Serialize;

use super::{GameModule, ModuleContext, Step};
use crate::catalog::Catalog;
use crate::generators;
use crate::types::{ConfigError, GameAction, GameKind, PUZZLE_CORRECT_POINTS, PUZZLE_SLOTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzlePiece {
    pub name: String,
    pub emoji: String,
    pub correct_slot: usize,
    pub placed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleGame {
    /// Tray, in shuffled order
    pieces: Vec<PuzzlePiece>,
    /// Piece index per board slot
    slots: Vec<Option<usize>>,
    correct_placements: u32,
}

impl PuzzleGame {
    pub fn pieces(&self) -> &[PuzzlePiece] {
        &self.pieces
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    pub fn correct_placements(&self) -> u32 {
        self.correct_placements
    }

    pub fn placed(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl GameModule for PuzzleGame {
    const KIND: GameKind = GameKind::Puzzle;

    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        let pieces = generators::puzzle_tray(catalog, ctx.rng())
            .into_iter()
            .map(|spec| PuzzlePiece {
                name: spec.name,
                emoji: spec.emoji,
                correct_slot: spec.correct_slot,
                placed: false,
            })
            .collect();
        Ok(Self {
            pieces,
            slots: vec![None; PUZZLE_SLOTS],
            correct_placements: 0,
        })
    }

    fn handle(&mut self, action: &GameAction, _ctx: &mut ModuleContext<'_>) -> Step {
        let GameAction::PlacePiece { piece } = *action else {
            return Step::IGNORED;
        };
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            return Step::IGNORED;
        };
        let correct = match self.pieces.get_mut(piece) {
            Some(p) if !p.placed => {
                p.placed = true;
                p.correct_slot == slot
            }
            _ => return Step::IGNORED,
        };
        self.slots[slot] = Some(piece);

        let delta = if correct {
            self.correct_placements += 1;
            PUZZLE_CORRECT_POINTS
        } else {
            0
        };
        if self.placed() == self.pieces.len() {
            Step::win(delta)
        } else {
            Step::applied(delta)
        }
    }
}
