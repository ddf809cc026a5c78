//! Core simulation for the snake game.
//!
//! Everything in here is pure state and arithmetic with no I/O or
//! rendering dependencies; the terminal layer only reads [`GameState`]
//! and feeds [`SteerAction`]s in.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod state;

pub use action::{Axis, Direction, SteerAction};
pub use clock::StepClock;
pub use config::{GameConfig, Mode};
pub use engine::{GameEngine, StepOutcome};
pub use state::{Cell, EndReason, GameState, Snake};
