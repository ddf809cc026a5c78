//! High-score persistence: a small JSON file keyed by mode.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::game::Mode;

/// Best score per mode for this install
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub classic: u32,
    pub modern: u32,
}

impl HighScores {
    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Classic => self.classic,
            Mode::Modern => self.modern,
        }
    }

    /// Record a round's final score; returns true when it beat the
    /// previous best for that mode
    pub fn record(&mut self, mode: Mode, score: u32) -> bool {
        let slot = match mode {
            Mode::Classic => &mut self.classic,
            Mode::Modern => &mut self.modern,
        };
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }
}

/// File-backed store for [`HighScores`]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the table; a missing or unreadable file is an empty table,
    /// never an error
    pub fn load(&self) -> HighScores {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => HighScores::default(),
        }
    }

    pub fn save(&self, scores: &HighScores) -> Result<()> {
        let json = serde_json::to_string_pretty(scores).context("failed to serialize high scores")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}
