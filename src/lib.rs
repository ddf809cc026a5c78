//! Snake Arcade - a terminal snake with two rulesets.
//!
//! This library provides:
//! - Core simulation (game module): state, step function, interval gate
//! - Session state machine (session module): mode select, play, game over
//! - High-score persistence (score module)
//! - Input mapping (input module) and the terminal front end
//!   (render and app modules)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod score;
pub mod session;
