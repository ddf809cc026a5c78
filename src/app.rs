//! Terminal application loop: owns the session, mirrors it into the
//! renderer, and multiplexes input, simulation and render timing.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Direction, GameConfig, StepOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{Hud, Renderer, SceneSync, TuiRenderer};
use crate::score::HighScoreStore;
use crate::session::{Phase, Session};

/// How often the step gate is polled; well under the fastest step interval
const POLL_PERIOD: Duration = Duration::from_millis(15);
/// Render cadence, ~30 FPS
const RENDER_PERIOD: Duration = Duration::from_millis(33);

pub struct App {
    session: Session,
    scene: SceneSync,
    input_handler: InputHandler,
    metrics: SessionMetrics,
    boundary: i32,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Self {
        Self {
            boundary: config.boundary,
            session: Session::new(config, store),
            scene: SceneSync::new(),
            input_handler: InputHandler::new(),
            metrics: SessionMetrics::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut renderer =
            TuiRenderer::new(self.boundary).context("failed to set up the terminal")?;

        // Run the loop with guaranteed terminal cleanup
        let result = self.run_loop(&mut renderer).await;
        renderer.shutdown()?;

        info!("session closed after {} rounds", self.metrics.games_played());
        result
    }

    async fn run_loop(&mut self, renderer: &mut TuiRenderer) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut poll_timer = interval(POLL_PERIOD);
        let mut render_timer = interval(RENDER_PERIOD);

        loop {
            tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation gate; most polls are render-only skips
                _ = poll_timer.tick() => {
                    let outcome = self.session.poll(Instant::now());
                    if matches!(outcome, StepOutcome::Ended(_)) {
                        self.metrics.on_game_over();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.draw(renderer)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            match self.input_handler.handle_key_event(key) {
                KeyAction::Quit => self.should_quit = true,
                action => self.route(action),
            }
        }
    }

    /// Apply a key action according to the current phase; anything that
    /// does not fit the phase is a no-op
    fn route(&mut self, action: KeyAction) {
        match self.session.phase() {
            Phase::ModeSelect => match action {
                KeyAction::Steer(Direction::North) => self.session.select_prev(),
                KeyAction::Steer(Direction::South) => self.session.select_next(),
                KeyAction::Confirm => {
                    self.session.confirm_mode();
                    self.metrics.on_round_start();
                }
                _ => {}
            },
            Phase::Playing => {
                if let KeyAction::Steer(direction) = action {
                    self.session.queue_direction(direction);
                }
            }
            Phase::GameOver => {
                if matches!(action, KeyAction::Restart | KeyAction::Confirm) {
                    self.session.restart();
                }
            }
        }
    }

    fn draw(&mut self, renderer: &mut TuiRenderer) -> Result<()> {
        renderer.set_hud(self.hud());
        match self.session.state() {
            Some(state) => self.scene.sync(renderer, state),
            None => self.scene.clear(renderer),
        }
        renderer.draw_frame()
    }

    fn hud(&self) -> Hud {
        let highs = self.session.highs();
        match self.session.phase() {
            Phase::ModeSelect => Hud::ModeSelect {
                cursor: self.session.cursor(),
                highs,
            },
            Phase::Playing => {
                let mode = self.session.mode().unwrap_or(self.session.cursor());
                Hud::Playing {
                    mode,
                    score: self.session.state().map_or(0, |state| state.score),
                    high_score: highs.get(mode),
                    elapsed: self.metrics.format_time(),
                }
            }
            Phase::GameOver => {
                let mode = self.session.mode().unwrap_or(self.session.cursor());
                Hud::GameOver {
                    mode,
                    score: self.session.state().map_or(0, |state| state.score),
                    high_score: highs.get(mode),
                    reason: self
                        .session
                        .state()
                        .and_then(|state| state.over)
                        .map_or("unknown", |reason| reason.label()),
                }
            }
        }
    }
}
