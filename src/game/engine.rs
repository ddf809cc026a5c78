use super::{
    action::{Direction, SteerAction},
    config::{GameConfig, Mode},
    state::{Cell, EndReason, GameState, Snake},
};
use log::warn;
use rand::Rng;

/// What a single tick did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The round was already over; nothing changed
    Idle,
    /// The snake moved (and possibly grew)
    Advanced { ate_food: bool },
    /// This tick ended the round
    Ended(EndReason),
}

/// The step function: advances a [`GameState`] by one grid tick.
///
/// Never fails; every anomaly is a terminal [`StepOutcome::Ended`]
/// transition, not an error.
pub struct GameEngine {
    config: GameConfig,
    mode: Mode,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig, mode: Mode) -> Self {
        Self {
            config,
            mode,
            rng: rand::thread_rng(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Build the initial state for a round: one segment at the origin,
    /// heading east, food somewhere off the snake
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            Cell::new(0, 0),
            Direction::East,
            self.config.initial_length,
        );
        // The initial snake cannot fill the grid, so a free cell exists
        let food = self.spawn_food(&snake).unwrap_or_else(|| snake.head());

        GameState::new(
            snake,
            food,
            self.mode,
            self.config.boundary,
            self.config.base_interval(self.mode),
        )
    }

    /// Execute one tick
    pub fn step(&mut self, state: &mut GameState, action: SteerAction) -> StepOutcome {
        if state.is_over() {
            return StepOutcome::Idle;
        }

        // Adopt the pending direction unless the turn lock rejects it
        if let SteerAction::Turn(requested) = action {
            if !state.snake.direction.blocks(requested) {
                state.snake.direction = requested;
            }
        }

        let mut candidate = state.snake.head().neighbor(state.snake.direction);

        // Boundary policy is the defining difference between the modes
        match state.mode {
            Mode::Classic => {
                if !state.in_bounds(candidate) {
                    return self.end(state, EndReason::OffScreen);
                }
            }
            Mode::Modern => {
                candidate = state.wrap(candidate);
            }
        }

        // Checked against the pre-move body, tail included: moving into the
        // cell the tail vacates this tick still loses. See DESIGN.md.
        if state.snake.occupies(candidate) {
            return self.end(state, EndReason::SelfCollision);
        }

        let vacated = state.snake.tail();
        state.snake.advance(candidate);

        let ate_food = candidate == state.food;
        if ate_food {
            state.score += self.config.food_reward;
            state.foods_eaten += 1;
            state.snake.grow_tail(vacated);

            match self.spawn_food(&state.snake) {
                Some(food) => state.food = food,
                None => warn!("no free cell left for food; leaving it in place"),
            }

            if state.mode == Mode::Modern && state.foods_eaten % self.config.speedup_every == 0 {
                state.step_interval = state
                    .step_interval
                    .saturating_sub(self.config.modern_speedup)
                    .max(self.config.modern_step_floor);
            }
        }

        StepOutcome::Advanced { ate_food }
    }

    fn end(&self, state: &mut GameState, reason: EndReason) -> StepOutcome {
        state.over = Some(reason);
        StepOutcome::Ended(reason)
    }

    /// Pick a food cell uniformly from the cells the snake does not occupy
    fn spawn_food(&mut self, snake: &Snake) -> Option<Cell> {
        let b = self.config.boundary;
        let mut free = Vec::with_capacity((b * b * 4) as usize - snake.len());
        for z in -b..b {
            for x in -b..b {
                let cell = Cell::new(x, z);
                if !snake.occupies(cell) {
                    free.push(cell);
                }
            }
        }

        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn engine(mode: Mode) -> GameEngine {
        GameEngine::new(GameConfig::small(), mode)
    }

    #[test]
    fn test_reset_initial_conditions() {
        let mut engine = engine(Mode::Classic);
        let state = engine.reset();

        assert!(!state.is_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.foods_eaten, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Cell::new(0, 0));
        assert_eq!(state.snake.direction, Direction::East);
        assert!(!state.snake.occupies(state.food));
        assert_eq!(state.step_interval, GameConfig::small().classic_step);
    }

    #[test]
    fn test_step_preserves_length_without_food() {
        let mut engine = engine(Mode::Classic);
        let mut state = engine.reset();
        // Park the food out of the snake's path
        state.food = Cell::new(0, 2);

        let before = state.snake.len();
        let outcome = engine.step(&mut state, SteerAction::Continue);

        assert_eq!(outcome, StepOutcome::Advanced { ate_food: false });
        assert_eq!(state.snake.len(), before);
        assert_eq!(state.snake.head(), Cell::new(1, 0));
    }

    #[test]
    fn test_food_grows_scores_and_relocates() {
        let mut engine = engine(Mode::Classic);
        let mut state = engine.reset();
        state.food = state.snake.head().neighbor(state.snake.direction);
        let before = state.snake.len();

        let outcome = engine.step(&mut state, SteerAction::Continue);

        assert_eq!(outcome, StepOutcome::Advanced { ate_food: true });
        assert_eq!(state.score, 10);
        assert_eq!(state.foods_eaten, 1);
        assert_eq!(state.snake.len(), before + 1);
        // Respawned food never lands on a segment
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_classic_wall_ends_round_off_screen() {
        let mut engine = engine(Mode::Classic);
        let snake = Snake::new(Cell::new(2, 0), Direction::East, 1);
        let mut state = GameState::new(
            snake,
            Cell::new(0, 2),
            Mode::Classic,
            3,
            Duration::from_millis(120),
        );

        let outcome = engine.step(&mut state, SteerAction::Continue);

        assert_eq!(outcome, StepOutcome::Ended(EndReason::OffScreen));
        assert_eq!(state.over, Some(EndReason::OffScreen));
        // Terminal transition freezes the snake in place
        assert_eq!(state.snake.head(), Cell::new(2, 0));
    }

    #[test]
    fn test_modern_wraps_instead_of_ending() {
        let mut engine = engine(Mode::Modern);
        let snake = Snake::new(Cell::new(2, 0), Direction::East, 1);
        let mut state = GameState::new(
            snake,
            Cell::new(0, 2),
            Mode::Modern,
            3,
            Duration::from_millis(150),
        );

        let outcome = engine.step(&mut state, SteerAction::Continue);

        assert_eq!(outcome, StepOutcome::Advanced { ate_food: false });
        assert_eq!(state.snake.head(), Cell::new(-3, 0));
        assert!(!state.is_over());
    }

    #[test]
    fn test_modern_head_stays_in_bounds_forever() {
        let mut engine = engine(Mode::Modern);
        let mut state = engine.reset();
        state.food = Cell::new(-3, -3);

        for _ in 0..50 {
            engine.step(&mut state, SteerAction::Continue);
            assert!(!state.is_over());
            assert!(state.in_bounds(state.snake.head()));
        }
    }

    #[test]
    fn test_self_collision_on_loop_back() {
        let mut engine = engine(Mode::Classic);
        let snake = Snake::new(Cell::new(0, 0), Direction::East, 4);
        let mut state = GameState::new(
            snake,
            Cell::new(2, 2),
            Mode::Classic,
            3,
            Duration::from_millis(120),
        );

        // East, south, west, then north back into the old head cell,
        // which is still occupied by the body
        engine.step(&mut state, SteerAction::Continue);
        engine.step(&mut state, Direction::South.into());
        engine.step(&mut state, Direction::West.into());
        let outcome = engine.step(&mut state, Direction::North.into());

        assert_eq!(outcome, StepOutcome::Ended(EndReason::SelfCollision));
        assert_eq!(state.over, Some(EndReason::SelfCollision));
    }

    #[test]
    fn test_tail_cell_counts_as_collision() {
        // Square of four segments; the candidate head equals the tail cell
        // the tail is about to vacate. The pre-move check still loses.
        let snake = Snake::from_segments(
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(1, 0),
            ],
            Direction::East,
        );
        let mut engine = engine(Mode::Classic);
        let mut state = GameState::new(
            snake,
            Cell::new(-2, -2),
            Mode::Classic,
            3,
            Duration::from_millis(120),
        );

        let outcome = engine.step(&mut state, SteerAction::Continue);

        assert_eq!(outcome, StepOutcome::Ended(EndReason::SelfCollision));
    }

    #[test]
    fn test_turn_lock_ignores_same_axis_input() {
        let mut engine = engine(Mode::Classic);
        let mut state = engine.reset();
        state.food = Cell::new(0, 2);
        assert_eq!(state.snake.direction, Direction::East);

        // Reversal while moving east is ignored
        engine.step(&mut state, Direction::West.into());
        assert_eq!(state.snake.direction, Direction::East);

        // A perpendicular turn is adopted
        engine.step(&mut state, Direction::North.into());
        assert_eq!(state.snake.direction, Direction::North);
    }

    #[test]
    fn test_modern_speed_ramp_every_fifth_food() {
        let mut engine = engine(Mode::Modern);
        let mut state = engine.reset();
        let base = state.step_interval;

        for i in 1..=5 {
            state.food = state.snake.head().neighbor(state.snake.direction);
            engine.step(&mut state, SteerAction::Continue);
            assert_eq!(state.foods_eaten, i);
            if i < 5 {
                assert_eq!(state.step_interval, base);
            }
        }

        assert_eq!(
            state.step_interval,
            base - GameConfig::small().modern_speedup
        );
    }

    #[test]
    fn test_modern_speed_ramp_floors() {
        let config = GameConfig::small();
        let mut engine = GameEngine::new(config, Mode::Modern);
        let mut state = engine.reset();
        state.step_interval = config.modern_step_floor + Duration::from_millis(2);
        state.foods_eaten = 4;

        state.food = state.snake.head().neighbor(state.snake.direction);
        engine.step(&mut state, SteerAction::Continue);

        assert_eq!(state.step_interval, config.modern_step_floor);
    }

    #[test]
    fn test_classic_interval_never_changes() {
        let mut engine = engine(Mode::Classic);
        let mut state = engine.reset();
        let base = state.step_interval;

        // A fifth food would trigger the ramp in Modern mode
        state.foods_eaten = 4;
        state.food = state.snake.head().neighbor(state.snake.direction);
        engine.step(&mut state, SteerAction::Continue);

        assert_eq!(state.foods_eaten, 5);
        assert_eq!(state.step_interval, base);
    }

    #[test]
    fn test_ended_round_is_idle() {
        let mut engine = engine(Mode::Classic);
        let mut state = engine.reset();
        state.over = Some(EndReason::SelfCollision);
        let snapshot = state.clone();

        let outcome = engine.step(&mut state, SteerAction::Continue);

        assert_eq!(outcome, StepOutcome::Idle);
        assert_eq!(state, snapshot);
    }
}
