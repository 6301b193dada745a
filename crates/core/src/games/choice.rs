//! Sustainable living match: for each everyday item, pick its sustainable
//! alternative or keep the item.
//!
//! Follows the quiz rhythm: the choice is shown for [`CHOICE_REVEAL_MS`] before
//! the next pair, and the game wins after the last pair.

use serde::Serialize;

use super::{GameModule, ModuleContext, ModuleTimer, Step};
use crate::catalog::{Catalog, ChoicePair};
use crate::clock::TimerHandle;
use crate::generators;
use crate::types::{
    ConfigError, GameAction, GameKind, CHOICE_CORRECT_POINTS, CHOICE_REVEAL_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Choice {
    Sustainable,
    Unsustainable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceGame {
    pairs: Vec<ChoicePair>,
    current: usize,
    selection: Option<Choice>,
    sustainable_choices: u32,
    #[serde(skip)]
    reveal: Option<TimerHandle>,
}

impl ChoiceGame {
    pub fn pairs(&self) -> &[ChoicePair] {
        &self.pairs
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_pair(&self) -> Option<&ChoicePair> {
        self.pairs.get(self.current)
    }

    pub fn selection(&self) -> Option<Choice> {
        self.selection
    }

    pub fn sustainable_choices(&self) -> u32 {
        self.sustainable_choices
    }
}

impl GameModule for ChoiceGame {
    const KIND: GameKind = GameKind::ChoiceMatch;

    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        Ok(Self {
            pairs: generators::choice_order(catalog, ctx.rng()),
            current: 0,
            selection: None,
            sustainable_choices: 0,
            reveal: None,
        })
    }

    fn handle(&mut self, action: &GameAction, ctx: &mut ModuleContext<'_>) -> Step {
        let choice = match action {
            GameAction::ChooseSustainable => Choice::Sustainable,
            GameAction::KeepUnsustainable => Choice::Unsustainable,
            _ => return Step::IGNORED,
        };
        if self.selection.is_some() || self.current >= self.pairs.len() {
            return Step::IGNORED;
        }

        self.selection = Some(choice);
        self.reveal = Some(ctx.schedule(CHOICE_REVEAL_MS, ModuleTimer::RevealAdvance));

        match choice {
            Choice::Sustainable => {
                self.sustainable_choices += 1;
                Step::applied(CHOICE_CORRECT_POINTS)
            }
            Choice::Unsustainable => Step::applied(0),
        }
    }

    fn on_timer(&mut self, timer: ModuleTimer, _ctx: &mut ModuleContext<'_>) -> Step {
        if timer != ModuleTimer::RevealAdvance || self.reveal.take().is_none() {
            return Step::IGNORED;
        }
        if self.current + 1 >= self.pairs.len() {
            return Step::win(0);
        }
        self.current += 1;
        self.selection = None;
        Step::applied(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::harness::Harness;

    #[test]
    fn test_choices_score_and_advance() {
        let mut h = Harness::new(6);
        let mut game: ChoiceGame = h.generate(&Catalog::builtin());

        let step = game.handle(&GameAction::ChooseSustainable, &mut h.ctx());
        assert_eq!(step, Step::applied(CHOICE_CORRECT_POINTS));
        // Locked until the reveal ends
        assert_eq!(
            game.handle(&GameAction::KeepUnsustainable, &mut h.ctx()),
            Step::IGNORED
        );
        assert_eq!(
            h.advance(&mut game, u64::from(CHOICE_REVEAL_MS)),
            vec![Step::applied(0)]
        );
        assert_eq!(game.current_index(), 1);

        let step = game.handle(&GameAction::KeepUnsustainable, &mut h.ctx());
        assert_eq!(step, Step::applied(0));
        assert_eq!(game.selection(), Some(Choice::Unsustainable));
        assert_eq!(game.sustainable_choices(), 1);
    }

    #[test]
    fn test_win_after_last_pair() {
        let mut h = Harness::new(6);
        let mut game: ChoiceGame = h.generate(&Catalog::builtin());
        let total = game.pairs().len();

        let mut steps = Vec::new();
        for _ in 0..total {
            game.handle(&GameAction::ChooseSustainable, &mut h.ctx());
            steps = h.advance(&mut game, u64::from(CHOICE_REVEAL_MS));
        }
        assert_eq!(steps, vec![Step::win(0)]);
        assert_eq!(game.sustainable_choices(), total as u32);
    }
}
