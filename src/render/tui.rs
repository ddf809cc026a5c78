use std::collections::HashMap;
use std::f32::consts::TAU;
use std::io::{stderr, Stderr};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};

use crate::game::Mode;
use crate::score::HighScores;

use super::scene::{BoxHandle, Material, Renderer, RotationAxis};

/// The food glyph cycles with its rotation angle, a poor man's spin
const FOOD_FRAMES: [&str; 4] = ["◆ ", "◈ ", "◇ ", "◈ "];

/// Presentational context for the current frame; everything outside the
/// box scene that the screen needs to show
#[derive(Debug, Clone)]
pub enum Hud {
    ModeSelect {
        cursor: Mode,
        highs: HighScores,
    },
    Playing {
        mode: Mode,
        score: u32,
        high_score: u32,
        elapsed: String,
    },
    GameOver {
        mode: Mode,
        score: u32,
        high_score: u32,
        reason: &'static str,
    },
}

impl Default for Hud {
    fn default() -> Self {
        Hud::ModeSelect {
            cursor: Mode::Classic,
            highs: HighScores::default(),
        }
    }
}

struct BoxState {
    material: Material,
    x: f32,
    y: f32,
    z: f32,
    spin: f32,
}

/// Terminal implementation of the [`Renderer`] capability set: boxes on
/// the y=0 plane become styled cells in a character grid. Owns the
/// terminal from construction until [`TuiRenderer::shutdown`].
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    boundary: i32,
    next_id: u64,
    boxes: HashMap<BoxHandle, BoxState>,
    hud: Hud,
}

impl TuiRenderer {
    pub fn new(boundary: i32) -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = stderr();
        execute!(out, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(out);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor().context("failed to hide cursor")?;
        terminal.clear().context("failed to clear terminal")?;

        Ok(Self {
            terminal,
            boundary,
            next_id: 0,
            boxes: HashMap::new(),
            hud: Hud::default(),
        })
    }

    pub fn set_hud(&mut self, hud: Hud) {
        self.hud = hud;
    }

    /// Restore the terminal; call once the loop is done
    pub fn shutdown(&mut self) -> Result<()> {
        disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("failed to leave alternate screen")?;
        self.terminal.show_cursor().context("failed to show cursor")?;
        Ok(())
    }
}

impl Renderer for TuiRenderer {
    fn create_box(&mut self, material: Material) -> BoxHandle {
        let handle = BoxHandle::new(self.next_id);
        self.next_id += 1;
        self.boxes.insert(
            handle,
            BoxState {
                material,
                x: 0.0,
                y: 0.0,
                z: 0.0,
                spin: 0.0,
            },
        );
        handle
    }

    fn set_position(&mut self, handle: BoxHandle, x: f32, y: f32, z: f32) {
        if let Some(state) = self.boxes.get_mut(&handle) {
            state.x = x;
            state.y = y;
            state.z = z;
        }
    }

    fn set_rotation(&mut self, handle: BoxHandle, axis: RotationAxis, radians: f32) {
        // Only the y spin has a visual counterpart in the glyph grid
        if axis == RotationAxis::Y {
            if let Some(state) = self.boxes.get_mut(&handle) {
                state.spin = radians;
            }
        }
    }

    fn remove(&mut self, handle: BoxHandle) {
        self.boxes.remove(&handle);
    }

    fn draw_frame(&mut self) -> Result<()> {
        let boundary = self.boundary;
        let boxes = &self.boxes;
        let hud = &self.hud;
        self.terminal
            .draw(|frame| draw(frame, boundary, boxes, hud))
            .context("failed to draw frame")?;
        Ok(())
    }
}

fn draw(frame: &mut Frame, boundary: i32, boxes: &HashMap<BoxHandle, BoxState>, hud: &Hud) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    frame.render_widget(header(hud), chunks[0]);

    // Center the playfield horizontally
    let game_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(chunks[1])[1];

    match hud {
        Hud::ModeSelect { cursor, highs } => {
            frame.render_widget(mode_menu(*cursor, *highs), game_area);
        }
        Hud::Playing { mode, .. } => {
            frame.render_widget(grid(game_area, boundary, boxes, mode.label()), game_area);
        }
        Hud::GameOver {
            score,
            high_score,
            reason,
            ..
        } => {
            frame.render_widget(game_over(*score, *high_score, reason), game_area);
        }
    }

    frame.render_widget(controls(hud), chunks[2]);
}

fn header(hud: &Hud) -> Paragraph<'_> {
    let line = match hud {
        Hud::ModeSelect { .. } => Line::from(vec![Span::styled(
            "S N A K E",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )]),
        Hud::Playing {
            mode,
            score,
            high_score,
            elapsed,
        } => Line::from(vec![
            Span::styled(mode.label(), Style::default().fg(Color::Magenta)),
            Span::raw("    "),
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(elapsed.clone(), Style::default().fg(Color::White)),
        ]),
        Hud::GameOver { mode, .. } => Line::from(vec![Span::styled(
            format!("{} round over", mode.label()),
            Style::default().fg(Color::Red),
        )]),
    };

    Paragraph::new(vec![line]).alignment(Alignment::Center)
}

fn mode_menu(cursor: Mode, highs: HighScores) -> Paragraph<'static> {
    let entry = |mode: Mode, blurb: &str| {
        let selected = mode == cursor;
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![Span::styled(
            format!("{marker}{}: {blurb} (best {})", mode.label(), highs.get(mode)),
            style,
        )])
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Select a mode",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        entry(Mode::Classic, "walls end the run"),
        entry(Mode::Modern, "wrap around, speeds up"),
        Line::from(""),
        Line::from(Span::styled(
            "Up/Down to choose, Enter to start",
            Style::default().fg(Color::Gray),
        )),
    ];

    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double),
    )
}

fn grid<'a>(
    _area: Rect,
    boundary: i32,
    boxes: &HashMap<BoxHandle, BoxState>,
    title: &'a str,
) -> Paragraph<'a> {
    // Project boxes near the plane onto grid cells; the head wins a cell
    // over body and food if they ever overlap for a frame
    let mut cells: HashMap<(i32, i32), (Material, f32)> = HashMap::new();
    for state in boxes.values() {
        if state.y.abs() > 0.5 {
            continue;
        }
        let key = (state.x.round() as i32, state.z.round() as i32);
        let slot = cells.entry(key).or_insert((state.material, state.spin));
        if rank(state.material) > rank(slot.0) {
            *slot = (state.material, state.spin);
        }
    }

    let mut lines = Vec::new();
    for z in -boundary..boundary {
        let mut spans = Vec::new();
        for x in -boundary..boundary {
            let span = match cells.get(&(x, z)) {
                Some((Material::SnakeHead, _)) => Span::styled(
                    "■ ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Some((Material::SnakeBody, _)) => {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                }
                Some((Material::Food, spin)) => Span::styled(
                    food_frame(*spin),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {title} ")),
        )
        .alignment(Alignment::Center)
}

fn rank(material: Material) -> u8 {
    match material {
        Material::SnakeBody => 0,
        Material::Food => 1,
        Material::SnakeHead => 2,
    }
}

fn food_frame(spin: f32) -> &'static str {
    let step = TAU / FOOD_FRAMES.len() as f32;
    FOOD_FRAMES[((spin.rem_euclid(TAU) / step) as usize) % FOOD_FRAMES.len()]
}

fn game_over(score: u32, high_score: u32, reason: &str) -> Paragraph<'_> {
    let text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::styled(
            format!("({reason})"),
            Style::default().fg(Color::Gray),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(high_score.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for the menu or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]),
    ];

    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
}

fn controls(hud: &Hud) -> Paragraph<'_> {
    let line = match hud {
        Hud::ModeSelect { .. } => Line::from(vec![
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" choose | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]),
        Hud::Playing { .. } => Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]),
        Hud::GameOver { .. } => Line::from(vec![
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" menu | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]),
    };

    Paragraph::new(vec![line]).alignment(Alignment::Center)
}
