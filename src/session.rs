//! Session state machine: ModeSelect -> Playing -> GameOver -> ModeSelect.
//!
//! The session owns the engine, the round state, the step clock and the
//! input queue. Steering events accumulate between ticks and are drained
//! once per tick, last accepted event wins.

use std::collections::VecDeque;
use std::time::Instant;

use log::{info, warn};

use crate::game::{
    Direction, GameConfig, GameEngine, GameState, Mode, StepClock, StepOutcome, SteerAction,
};
use crate::score::{HighScoreStore, HighScores};

/// Where the session currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a mode choice; no simulation runs
    ModeSelect,
    /// Scheduler and input active
    Playing,
    /// Simulation frozen; restart discards the run entirely
    GameOver,
}

/// One round in flight (or frozen at game over, for display)
struct Run {
    mode: Mode,
    engine: GameEngine,
    state: GameState,
    clock: StepClock,
    queued: VecDeque<Direction>,
}

pub struct Session {
    config: GameConfig,
    store: HighScoreStore,
    highs: HighScores,
    phase: Phase,
    cursor: Mode,
    run: Option<Run>,
}

impl Session {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Self {
        let highs = store.load();
        Self {
            config,
            store,
            highs,
            phase: Phase::ModeSelect,
            cursor: Mode::Classic,
            run: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mode currently highlighted in the select menu
    pub fn cursor(&self) -> Mode {
        self.cursor
    }

    pub fn highs(&self) -> HighScores {
        self.highs
    }

    /// Round state, present while Playing or frozen at GameOver
    pub fn state(&self) -> Option<&GameState> {
        self.run.as_ref().map(|run| &run.state)
    }

    pub fn mode(&self) -> Option<Mode> {
        self.run.as_ref().map(|run| run.mode)
    }

    /// Move the menu highlight; with two entries both directions toggle
    pub fn select_prev(&mut self) {
        self.toggle_cursor();
    }

    pub fn select_next(&mut self) {
        self.toggle_cursor();
    }

    fn toggle_cursor(&mut self) {
        if self.phase == Phase::ModeSelect {
            self.cursor = match self.cursor {
                Mode::Classic => Mode::Modern,
                Mode::Modern => Mode::Classic,
            };
        }
    }

    /// Lock in the highlighted mode and start a round
    pub fn confirm_mode(&mut self) {
        if self.phase != Phase::ModeSelect {
            return;
        }

        let mode = self.cursor;
        let mut engine = GameEngine::new(self.config, mode);
        let state = engine.reset();
        let clock = StepClock::new(state.step_interval);

        info!("starting {} round", mode.key());
        self.run = Some(Run {
            mode,
            engine,
            state,
            clock,
            queued: VecDeque::new(),
        });
        self.phase = Phase::Playing;
    }

    /// Queue a steering event; it takes effect at the next tick
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.phase != Phase::Playing {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            run.queued.push_back(direction);
        }
    }

    /// Advance the simulation if a tick is due. Safe to call every frame;
    /// non-due polls are render-only and return [`StepOutcome::Idle`].
    pub fn poll(&mut self, now: Instant) -> StepOutcome {
        if self.phase != Phase::Playing {
            return StepOutcome::Idle;
        }
        let Some(run) = self.run.as_mut() else {
            return StepOutcome::Idle;
        };
        if !run.clock.due(now) {
            return StepOutcome::Idle;
        }
        run.clock.fire(now);

        let action = Self::drain_queue(run);
        let outcome = run.engine.step(&mut run.state, action);
        run.clock.set_interval(run.state.step_interval);

        if let StepOutcome::Ended(reason) = outcome {
            let mode = run.mode;
            let score = run.state.score;
            self.phase = Phase::GameOver;
            info!(
                "game over ({}): {} round, score {}",
                reason.label(),
                mode.key(),
                score
            );
            if self.highs.record(mode, score) {
                info!("new {} high score: {}", mode.key(), score);
                if let Err(err) = self.store.save(&self.highs) {
                    warn!("failed to persist high scores: {err:#}");
                }
            }
        }

        outcome
    }

    /// Drain all steering queued since the last tick; each event is
    /// validated against the turn lock and the last accepted one wins
    fn drain_queue(run: &mut Run) -> SteerAction {
        let current = run.state.snake.direction;
        let mut accepted = None;
        while let Some(direction) = run.queued.pop_front() {
            if !current.blocks(direction) {
                accepted = Some(direction);
            }
        }
        accepted.map(SteerAction::Turn).unwrap_or(SteerAction::Continue)
    }

    /// Discard the finished run and return to mode selection
    pub fn restart(&mut self) {
        if self.phase != Phase::GameOver {
            return;
        }
        self.run = None;
        self.phase = Phase::ModeSelect;
    }
}
