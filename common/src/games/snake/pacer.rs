use std::time::Duration;
use tokio::time::Instant;

/// Timing bookkeeping for the simulation ticker: remembers when the last
/// step was committed and decides when the next one is due.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickPacer {
    last_step: Option<Instant>,
}

impl TickPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a full interval from `now`, e.g. on game start or resume.
    pub fn restart(&mut self, now: Instant) {
        self.last_step = Some(now);
    }

    pub fn commit(&mut self, now: Instant) {
        self.last_step = Some(now);
    }

    pub fn is_due(&self, now: Instant, interval: Duration) -> bool {
        self.last_step
            .is_none_or(|last| now.saturating_duration_since(last) >= interval)
    }

    pub fn next_due(&self, now: Instant, interval: Duration) -> Instant {
        match self.last_step {
            Some(last) => last + interval,
            None => now,
        }
    }
}
