//! Green snake: an endurance game on a 10x10 grid.
//!
//! The snake moves one cell every [`SNAKE_STEP_MS`] on its own interval timer,
//! independent from the session countdown. Leaving the grid or running into the
//! body loses on that very step. There is no win condition; the session ends it
//! by time expiry.
//!
//! Eating grows the snake by one cell. Good food adds its points, bad food
//! subtracts them. One of each is on the grid at all times while a free cell
//! exists.

use std::collections::VecDeque;

use serde::Serialize;

use super::{GameModule, ModuleContext, ModuleTimer, Step};
use crate::catalog::{Catalog, FoodSpec};
use crate::clock::TimerHandle;
use crate::generators::{self, Food};
use crate::rng::SimpleRng;
use crate::types::{
    Cell, ConfigError, Direction, GameAction, GameKind, SNAKE_GRID_SIZE, SNAKE_START,
    SNAKE_STEP_MS,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeGame {
    /// Tail first, head last
    body: VecDeque<Cell>,
    /// Direction used by the next step
    direction: Direction,
    /// Direction of the last step taken
    heading: Direction,
    good_food: Option<Food>,
    bad_food: Option<Food>,
    grid_size: i16,
    alive: bool,
    steps: u32,
    #[serde(skip)]
    good_menu: Vec<FoodSpec>,
    #[serde(skip)]
    bad_menu: Vec<FoodSpec>,
    #[serde(skip)]
    step_timer: Option<TimerHandle>,
}

fn spawn(
    menu: &[FoodSpec],
    grid_size: i16,
    body: &VecDeque<Cell>,
    other: Option<Cell>,
    rng: &mut SimpleRng,
) -> Option<Food> {
    generators::spawn_food(
        menu,
        grid_size,
        |cell| body.contains(&cell) || other == Some(cell),
        rng,
    )
}

impl SnakeGame {
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn good_food(&self) -> Option<&Food> {
        self.good_food.as_ref()
    }

    pub fn bad_food(&self) -> Option<&Food> {
        self.bad_food.as_ref()
    }

    pub fn grid_size(&self) -> i16 {
        self.grid_size
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Movement steps taken
    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn step(&mut self, ctx: &mut ModuleContext<'_>) -> Step {
        let Some(head) = self.head() else {
            return Step::IGNORED;
        };
        let next = head.step(self.direction);
        self.steps += 1;

        if !next.in_bounds(self.grid_size) || self.body.contains(&next) {
            self.alive = false;
            if let Some(handle) = self.step_timer.take() {
                ctx.cancel(handle);
            }
            tracing::debug!(x = next.x, y = next.y, steps = self.steps, "snake crashed");
            return Step::lose(0);
        }

        self.body.push_back(next);
        self.heading = self.direction;

        if self.good_food.as_ref().is_some_and(|f| f.cell == next) {
            let points = self.good_food.as_ref().map_or(0, |f| f.points);
            let other = self.bad_food.as_ref().map(|f| f.cell);
            self.good_food = spawn(&self.good_menu, self.grid_size, &self.body, other, ctx.rng());
            return Step::applied(points);
        }

        if self.bad_food.as_ref().is_some_and(|f| f.cell == next) {
            let points = self.bad_food.as_ref().map_or(0, |f| f.points);
            let other = self.good_food.as_ref().map(|f| f.cell);
            self.bad_food = spawn(&self.bad_menu, self.grid_size, &self.body, other, ctx.rng());
            return Step::applied(points);
        }

        self.body.pop_front();
        Step::applied(0)
    }
}

impl GameModule for SnakeGame {
    const KIND: GameKind = GameKind::Snake;

    fn generate(catalog: &Catalog, ctx: &mut ModuleContext<'_>) -> Result<Self, ConfigError> {
        catalog.validate_for(Self::KIND)?;
        let grid_size = SNAKE_GRID_SIZE;
        let body = VecDeque::from([SNAKE_START]);

        let good_food = spawn(&catalog.good_foods, grid_size, &body, None, ctx.rng());
        let bad_food = spawn(
            &catalog.bad_foods,
            grid_size,
            &body,
            good_food.as_ref().map(|f| f.cell),
            ctx.rng(),
        );
        let step_timer = ctx.start_interval(SNAKE_STEP_MS, ModuleTimer::SnakeStep);

        Ok(Self {
            body,
            direction: Direction::Right,
            heading: Direction::Right,
            good_food,
            bad_food,
            grid_size,
            alive: true,
            steps: 0,
            good_menu: catalog.good_foods.clone(),
            bad_menu: catalog.bad_foods.clone(),
            step_timer: Some(step_timer),
        })
    }

    fn handle(&mut self, action: &GameAction, _ctx: &mut ModuleContext<'_>) -> Step {
        let GameAction::SetDirection { direction } = *action else {
            return Step::IGNORED;
        };
        // Reversal is judged against the last step taken, so two quick turns
        // between steps cannot fold the snake onto itself.
        if !self.alive || direction == self.direction || direction == self.heading.opposite() {
            return Step::IGNORED;
        }
        self.direction = direction;
        Step::applied(0)
    }

    fn on_timer(&mut self, timer: ModuleTimer, ctx: &mut ModuleContext<'_>) -> Step {
        if timer != ModuleTimer::SnakeStep || !self.alive {
            return Step::IGNORED;
        }
        self.step(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::harness::Harness;
    use crate::types::Outcome;

    fn steer(game: &mut SnakeGame, h: &mut Harness, direction: Direction) -> Step {
        game.handle(&GameAction::SetDirection { direction }, &mut h.ctx())
    }

    /// Snake without food, for deterministic movement
    fn bare_snake(h: &mut Harness) -> SnakeGame {
        let mut game: SnakeGame = h.generate(&Catalog::builtin());
        game.good_food = None;
        game.bad_food = None;
        game.good_menu.clear();
        game.bad_menu.clear();
        game
    }

    fn food(cell: Cell, points: i32) -> Food {
        Food {
            cell,
            name: "test".to_string(),
            emoji: "x".to_string(),
            points,
        }
    }

    #[test]
    fn test_initial_state() {
        let mut h = Harness::new(5);
        let game: SnakeGame = h.generate(&Catalog::builtin());
        assert_eq!(game.head(), Some(SNAKE_START));
        assert_eq!(game.direction(), Direction::Right);
        let good = game.good_food().unwrap().cell;
        let bad = game.bad_food().unwrap().cell;
        assert_ne!(good, SNAKE_START);
        assert_ne!(bad, SNAKE_START);
        assert_ne!(good, bad);
        assert_eq!(h.clock.pending(), 1, "movement interval started");
    }

    #[test]
    fn test_moves_every_step() {
        let mut h = Harness::new(5);
        let mut game = bare_snake(&mut h);

        assert!(h.advance(&mut game, u64::from(SNAKE_STEP_MS) - 1).is_empty());
        assert_eq!(h.advance(&mut game, 1), vec![Step::applied(0)]);
        assert_eq!(game.head(), Some(Cell::new(6, 5)));
        assert_eq!(game.body().len(), 1);
    }

    #[test]
    fn test_reverse_is_ignored() {
        let mut h = Harness::new(5);
        let mut game = bare_snake(&mut h);

        assert_eq!(steer(&mut game, &mut h, Direction::Left), Step::IGNORED);
        assert_eq!(steer(&mut game, &mut h, Direction::Right), Step::IGNORED);
        h.advance(&mut game, u64::from(SNAKE_STEP_MS));
        assert_eq!(game.head(), Some(Cell::new(6, 5)));
    }

    #[test]
    fn test_two_quick_turns_cannot_reverse() {
        let mut h = Harness::new(5);
        let mut game = bare_snake(&mut h);

        assert_eq!(steer(&mut game, &mut h, Direction::Up), Step::applied(0));
        // Still heading right until the next step
        assert_eq!(steer(&mut game, &mut h, Direction::Left), Step::IGNORED);
        h.advance(&mut game, u64::from(SNAKE_STEP_MS));
        assert_eq!(game.head(), Some(Cell::new(5, 4)));
        assert_eq!(steer(&mut game, &mut h, Direction::Left), Step::applied(0));
    }

    #[test]
    fn test_wall_loses_on_the_crossing_step() {
        let mut h = Harness::new(5);
        let mut game = bare_snake(&mut h);

        // x = 6, 7, 8, 9 are fine; the fifth step leaves the grid.
        for _ in 0..4 {
            assert_eq!(h.advance(&mut game, u64::from(SNAKE_STEP_MS)), vec![Step::applied(0)]);
        }
        assert_eq!(h.advance(&mut game, u64::from(SNAKE_STEP_MS)), vec![Step::lose(0)]);
        assert!(!game.is_alive());
        assert_eq!(h.clock.pending(), 0, "movement stops after a crash");
        assert_eq!(steer(&mut game, &mut h, Direction::Up), Step::IGNORED);
    }

    #[test]
    fn test_self_collision_loses() {
        let mut h = Harness::new(5);
        let mut game = bare_snake(&mut h);
        game.body = VecDeque::from([
            Cell::new(5, 4),
            Cell::new(4, 4),
            Cell::new(4, 5),
            Cell::new(5, 5),
        ]);
        game.heading = Direction::Right;
        game.direction = Direction::Up;

        let steps = h.advance(&mut game, u64::from(SNAKE_STEP_MS));
        assert_eq!(steps, vec![Step::lose(0)]);
        assert_eq!(steps[0].outcome, Outcome::Lose);
    }

    #[test]
    fn test_good_food_grows_and_respawns() {
        let mut h = Harness::new(5);
        let mut game: SnakeGame = h.generate(&Catalog::builtin());
        game.good_food = Some(food(Cell::new(6, 5), 15));
        game.bad_food = Some(food(Cell::new(0, 0), -5));

        assert_eq!(h.advance(&mut game, u64::from(SNAKE_STEP_MS)), vec![Step::applied(15)]);
        assert_eq!(game.body().len(), 2);
        let respawned = game.good_food().unwrap().cell;
        assert!(!game.body().contains(&respawned));
        assert_ne!(respawned, Cell::new(0, 0));
    }

    #[test]
    fn test_bad_food_costs_points() {
        let mut h = Harness::new(5);
        let mut game: SnakeGame = h.generate(&Catalog::builtin());
        game.good_food = Some(food(Cell::new(0, 0), 10));
        game.bad_food = Some(food(Cell::new(6, 5), -10));

        assert_eq!(h.advance(&mut game, u64::from(SNAKE_STEP_MS)), vec![Step::applied(-10)]);
        assert_eq!(game.body().len(), 2);
        assert!(game.bad_food().is_some());
    }
}
