//! Renewable energy quiz.
//!
//! Selecting an option locks the answer for the current question. The answer and
//! its explanation stay revealed for [`QUIZ_REVEAL_MS`], then the quiz moves to the
//! next question, or wins after the last one.

use serde::Serialize;

use super::{GameModule, ModuleContext, ModuleTimer, Step};
use crate::catalog::{Catalog, QuizQuestion};
use crate::clock::TimerHandle;
use crate::generators;
use crate::types::{ConfigError, GameAction, GameKind, QUIZ_CORRECT_POINTS, QUIZ_REVEAL_MS};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGame {
    questions: Vec<QuizQuestion>,
    current: usize,
    selection: Option<usize>,
    correct_answers: u32,
    #[serde(skip)]
    reveal: Option<TimerHandle>,
}

impl QuizGame {
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    /// Locked answer for the current question
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    /// Explanation of the current question, once it has been answered
    pub fn explanation(&self) -> Option<&str> {
        self.selection?;
        self.current_question().map(|q| q.explanation.as_str())
    }
}

impl GameModule for QuizGame {
    const KIND: GameKind = GameKind::Quiz;

    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        Ok(Self {
            questions: generators::quiz_order(catalog, ctx.rng()),
            current: 0,
            selection: None,
            correct_answers: 0,
            reveal: None,
        })
    }

    fn handle(&mut self, action: &GameAction, ctx: &mut ModuleContext<'_>) -> Step {
        let GameAction::SelectOption { index } = *action else {
            return Step::IGNORED;
        };
        if self.selection.is_some() {
            return Step::IGNORED;
        }
        let Some(question) = self.questions.get(self.current) else {
            return Step::IGNORED;
        };
        if index >= question.options.len() {
            return Step::IGNORED;
        }

        let correct = index == question.correct;
        self.selection = Some(index);
        self.reveal = Some(ctx.schedule(QUIZ_REVEAL_MS, ModuleTimer::RevealAdvance));

        if correct {
            self.correct_answers += 1;
            Step::applied(QUIZ_CORRECT_POINTS)
        } else {
            Step::applied(0)
        }
    }

    fn on_timer(&mut self, timer: ModuleTimer, _ctx: &mut ModuleContext<'_>) -> Step {
        if timer != ModuleTimer::RevealAdvance || self.reveal.take().is_none() {
            return Step::IGNORED;
        }
        if self.current + 1 >= self.questions.len() {
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

    fn answer(game: &mut QuizGame, h: &mut Harness, index: usize) -> Step {
        game.handle(&GameAction::SelectOption { index }, &mut h.ctx())
    }

    #[test]
    fn test_answer_locks_until_reveal_ends() {
        let mut h = Harness::new(2);
        let mut game: QuizGame = h.generate(&Catalog::builtin());
        let correct = game.current_question().unwrap().correct;
        let wrong = (correct + 1) % 4;

        assert_eq!(game.explanation(), None);
        assert_eq!(answer(&mut game, &mut h, correct), Step::applied(QUIZ_CORRECT_POINTS));
        assert_eq!(answer(&mut game, &mut h, wrong), Step::IGNORED);
        assert!(game.explanation().is_some());

        assert!(h.advance(&mut game, u64::from(QUIZ_REVEAL_MS) - 1).is_empty());
        assert_eq!(game.current_index(), 0);
        assert_eq!(h.advance(&mut game, 1), vec![Step::applied(0)]);
        assert_eq!(game.current_index(), 1);
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_wrong_answer_scores_nothing() {
        let mut h = Harness::new(2);
        let mut game: QuizGame = h.generate(&Catalog::builtin());
        let correct = game.current_question().unwrap().correct;
        assert_eq!(answer(&mut game, &mut h, (correct + 1) % 4), Step::applied(0));
        assert_eq!(game.correct_answers(), 0);
    }

    #[test]
    fn test_option_out_of_range() {
        let mut h = Harness::new(2);
        let mut game: QuizGame = h.generate(&Catalog::builtin());
        assert_eq!(answer(&mut game, &mut h, 4), Step::IGNORED);
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_win_after_last_reveal() {
        let mut h = Harness::new(9);
        let mut game: QuizGame = h.generate(&Catalog::builtin());
        let total = game.questions().len();

        for i in 0..total {
            let correct = game.current_question().unwrap().correct;
            answer(&mut game, &mut h, correct);
            let steps = h.advance(&mut game, u64::from(QUIZ_REVEAL_MS));
            if i + 1 < total {
                assert_eq!(steps, vec![Step::applied(0)]);
            } else {
                assert_eq!(steps, vec![Step::win(0)]);
            }
        }
        assert_eq!(game.correct_answers(), total as u32);
    }

    #[test]
    fn test_stray_timer_is_ignored() {
        let mut h = Harness::new(2);
        let mut game: QuizGame = h.generate(&Catalog::builtin());
        assert_eq!(
            game.on_timer(ModuleTimer::RevealAdvance, &mut h.ctx()),
            Step::IGNORED
        );
        assert_eq!(game.current_index(), 0);
    }
}
