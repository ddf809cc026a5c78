use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press means to the session. The app layer decides how each
/// action applies to the current phase (steering doubles as menu
/// navigation on the mode-select screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Confirm,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Steering - arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::North),
            KeyCode::Down => KeyAction::Steer(Direction::South),
            KeyCode::Left => KeyAction::Steer(Direction::West),
            KeyCode::Right => KeyAction::Steer(Direction::East),

            // Steering - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::North),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::South),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::West),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::East),

            // Controls
            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
