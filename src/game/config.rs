use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ruleset variant, chosen once per round before play starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fixed walls, fixed speed
    Classic,
    /// Toroidal wraparound, speeds up as the snake grows
    Modern,
}

impl Mode {
    /// Key used for the persisted high-score table and log lines
    pub fn key(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Modern => "modern",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::Modern => "Modern",
        }
    }
}

/// Configuration for a round of snake
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    /// Half-span of the square grid; both axes cover [-boundary, boundary)
    pub boundary: i32,
    /// Segment count at the start of a round
    pub initial_length: usize,
    /// Score awarded per food eaten
    pub food_reward: u32,
    /// Step interval in Classic mode (never changes mid-round)
    pub classic_step: Duration,
    /// Starting step interval in Modern mode
    pub modern_step: Duration,
    /// How much the Modern interval shrinks per speed-up
    pub modern_speedup: Duration,
    /// Fastest the Modern interval is allowed to get
    pub modern_step_floor: Duration,
    /// A Modern speed-up fires every this many foods eaten
    pub speedup_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            boundary: 10,
            initial_length: 1,
            food_reward: 10,
            classic_step: Duration::from_millis(120),
            modern_step: Duration::from_millis(150),
            modern_speedup: Duration::from_millis(10),
            modern_step_floor: Duration::from_millis(60),
            speedup_every: 5,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid half-span
    pub fn new(boundary: i32) -> Self {
        Self {
            boundary,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(3)
    }

    /// The step interval a round starts with in the given mode
    pub fn base_interval(&self, mode: Mode) -> Duration {
        match mode {
            Mode::Classic => self.classic_step,
            Mode::Modern => self.modern_step,
        }
    }
}
