use std::time::{Duration, Instant};

/// Interval gate that decouples the simulation rate from the render rate.
///
/// The owner polls [`StepClock::due`] as often as it likes; a tick only
/// fires once the current step interval has elapsed since the last one,
/// and every other poll is a render-only frame.
#[derive(Debug, Clone)]
pub struct StepClock {
    interval: Duration,
    last_tick: Instant,
}

impl StepClock {
    pub fn new(interval: Duration) -> Self {
        Self::new_at(interval, Instant::now())
    }

    pub fn new_at(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adopt a new interval, e.g. after a Modern-mode speed-up
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn due(&self, now: Instant) -> bool {
        now.duration_since(self.last_tick) >= self.interval
    }

    /// Mark a tick as taken
    pub fn fire(&mut self, now: Instant) {
        self.last_tick = now;
    }
}
