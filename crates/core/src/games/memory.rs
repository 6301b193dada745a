//! Carbon memory: find the low-carbon partner of every card.
//!
//! The deck holds every catalog card twice. Two cards match when one names the
//! other as its partner. A mismatched pair stays visible for
//! [`MEMORY_FLIP_BACK_MS`] and no card can be flipped until it turns back.

use arrayvec::ArrayVec;
use serde::Serialize;

use super::{GameModule, ModuleContext, ModuleTimer, Step};
use crate::catalog::Catalog;
use crate::clock::TimerHandle;
use crate::generators;
use crate::types::{ConfigError, GameAction, GameKind, MEMORY_FLIP_BACK_MS, MEMORY_MATCH_POINTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCard {
    pub id: u32,
    pub pair: u32,
    pub emoji: String,
    pub text: String,
    pub face_up: bool,
    pub matched: bool,
}

impl MemoryCard {
    fn matches(&self, other: &MemoryCard) -> bool {
        self.pair == other.id || other.pair == self.id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryGame {
    cards: Vec<MemoryCard>,
    /// Indices of unmatched face-up cards
    face_up: ArrayVec<usize, 2>,
    matched_pairs: u32,
    moves: u32,
    #[serde(skip)]
    flip_back: Option<TimerHandle>,
}

impl MemoryGame {
    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn face_up(&self) -> &[usize] {
        &self.face_up
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    /// Accepted flips so far
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// True while a mismatched pair waits to turn back
    pub fn is_flip_back_pending(&self) -> bool {
        self.flip_back.is_some()
    }
}

impl GameModule for MemoryGame {
    const KIND: GameKind = GameKind::MemoryMatch;

    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        let cards = generators::memory_deck(catalog, ctx.rng())
            .into_iter()
            .map(|spec| MemoryCard {
                id: spec.id,
                pair: spec.pair,
                emoji: spec.emoji,
                text: spec.text,
                face_up: false,
                matched: false,
            })
            .collect();
        Ok(Self {
            cards,
            face_up: ArrayVec::new(),
            matched_pairs: 0,
            moves: 0,
            flip_back: None,
        })
    }

    fn handle(&mut self, action: &GameAction, ctx: &mut ModuleContext<'_>) -> Step {
        let GameAction::FlipCard { index } = *action else {
            return Step::IGNORED;
        };
        if self.face_up.is_full() {
            return Step::IGNORED;
        }
        match self.cards.get_mut(index) {
            Some(card) if !card.face_up && !card.matched => card.face_up = true,
            _ => return Step::IGNORED,
        }
        self.face_up.push(index);
        self.moves += 1;

        let [first, second] = match self.face_up.as_slice() {
            &[first, second] => [first, second],
            _ => return Step::applied(0),
        };

        if self.cards[first].matches(&self.cards[second]) {
            for i in [first, second] {
                self.cards[i].matched = true;
            }
            self.face_up.clear();
            self.matched_pairs += 1;
            tracing::debug!(matched = self.matched_pairs, "memory pair matched");
            if self.matched_pairs == self.total_pairs() {
                Step::win(MEMORY_MATCH_POINTS)
            } else {
                Step::applied(MEMORY_MATCH_POINTS)
            }
        } else {
            self.flip_back = Some(ctx.schedule(MEMORY_FLIP_BACK_MS, ModuleTimer::FlipBack));
            Step::applied(0)
        }
    }

    fn on_timer(&mut self, timer: ModuleTimer, _ctx: &mut ModuleContext<'_>) -> Step {
        if timer != ModuleTimer::FlipBack || self.flip_back.take().is_none() {
            return Step::IGNORED;
        }
        for i in self.face_up.drain(..) {
            if let Some(card) = self.cards.get_mut(i) {
                card.face_up = false;
            }
        }
        Step::applied(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::harness::Harness;
    use crate::types::Outcome;

    fn flip(game: &mut MemoryGame, h: &mut Harness, index: usize) -> Step {
        game.handle(&GameAction::FlipCard { index }, &mut h.ctx())
    }

    /// (a, b) with a matching b, and c not matching a
    fn find_indices(game: &MemoryGame) -> (usize, usize, usize) {
        let cards = game.cards();
        let a = 0;
        let b = (1..cards.len()).find(|&i| cards[a].matches(&cards[i])).unwrap();
        let c = (1..cards.len()).find(|&i| !cards[a].matches(&cards[i])).unwrap();
        (a, b, c)
    }

    #[test]
    fn test_deck_is_doubled() {
        let mut h = Harness::new(4);
        let game: MemoryGame = h.generate(&Catalog::builtin());
        assert_eq!(game.cards().len(), 16);
        assert_eq!(game.total_pairs(), 8);
    }

    #[test]
    fn test_match_scores_immediately() {
        let mut h = Harness::new(4);
        let mut game: MemoryGame = h.generate(&Catalog::builtin());
        let (a, b, _) = find_indices(&game);

        assert_eq!(flip(&mut game, &mut h, a), Step::applied(0));
        assert_eq!(flip(&mut game, &mut h, b), Step::applied(MEMORY_MATCH_POINTS));
        assert!(game.cards()[a].matched && game.cards()[b].matched);
        assert!(game.face_up().is_empty());
        assert_eq!(game.moves(), 2);
        assert_eq!(h.clock.pending(), 0);

        // Matched cards cannot be flipped again
        assert_eq!(flip(&mut game, &mut h, a), Step::IGNORED);
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let mut h = Harness::new(4);
        let mut game: MemoryGame = h.generate(&Catalog::builtin());
        let (a, _, c) = find_indices(&game);
        let other = (0..16).find(|&i| i != a && i != c).unwrap();

        flip(&mut game, &mut h, a);
        assert_eq!(flip(&mut game, &mut h, c), Step::applied(0));
        assert!(game.is_flip_back_pending());

        // Locked while the pair is visible
        assert_eq!(flip(&mut game, &mut h, other), Step::IGNORED);

        assert!(h.advance(&mut game, u64::from(MEMORY_FLIP_BACK_MS) - 1).is_empty());
        assert_eq!(h.advance(&mut game, 1), vec![Step::applied(0)]);
        assert!(!game.cards()[a].face_up && !game.cards()[c].face_up);
        assert!(game.face_up().is_empty());

        // Both can be flipped again
        assert_eq!(flip(&mut game, &mut h, a), Step::applied(0));
    }

    #[test]
    fn test_same_card_twice_is_ignored() {
        let mut h = Harness::new(4);
        let mut game: MemoryGame = h.generate(&Catalog::builtin());
        flip(&mut game, &mut h, 3);
        assert_eq!(flip(&mut game, &mut h, 3), Step::IGNORED);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_win_after_all_pairs() {
        let mut h = Harness::new(21);
        let mut game: MemoryGame = h.generate(&Catalog::builtin());

        let mut last = Step::IGNORED;
        while game.matched_pairs() < game.total_pairs() {
            let cards = game.cards();
            let a = cards.iter().position(|c| !c.matched).unwrap();
            let b = (0..cards.len())
                .find(|&i| i != a && !cards[i].matched && cards[a].matches(&cards[i]))
                .unwrap();
            flip(&mut game, &mut h, a);
            last = flip(&mut game, &mut h, b);
        }
        assert_eq!(last, Step::win(MEMORY_MATCH_POINTS));
        assert_eq!(last.outcome, Outcome::Win);
    }
}
