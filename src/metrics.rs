//! Session-level counters shown in the header: round timer and rounds played.

use std::time::{Duration, Instant};

pub struct SessionMetrics {
    start_time: Instant,
    elapsed_time: Duration,
    games_played: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Restart the round timer
    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Elapsed round time as mm:ss
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = SessionMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::ZERO;
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_round_counter() {
        let mut metrics = SessionMetrics::new();
        metrics.on_game_over();
        metrics.on_game_over();
        assert_eq!(metrics.games_played(), 2);
    }

    #[test]
    fn test_round_start_resets_timer() {
        let mut metrics = SessionMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert!(metrics.elapsed_time >= Duration::from_millis(20));

        metrics.on_round_start();
        metrics.update();
        assert!(metrics.elapsed_time < Duration::from_millis(20));
    }
}
