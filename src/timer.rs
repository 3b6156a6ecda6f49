use chrono::{DateTime, Local};

/// Time budget of a timed test.
///
/// The countdown runs on wall-clock time from the moment the session is
/// created, not from the first keystroke. Remaining time drops by one for
/// every whole second elapsed, so any tick cadence (or a simulated clock)
/// observes the same values.
#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    budget_secs: u32,
    started_at: DateTime<Local>,
    cancelled: bool,
}

impl Countdown {
    pub fn new(budget_secs: u32, started_at: DateTime<Local>) -> Self {
        Self {
            budget_secs,
            started_at,
            cancelled: false,
        }
    }

    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    pub fn remaining_secs(&self, now: DateTime<Local>) -> u32 {
        let elapsed = (now - self.started_at).num_seconds().max(0);
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.budget_secs.saturating_sub(elapsed)
    }

    /// A cancelled countdown never expires.
    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        !self.cancelled && self.remaining_secs(now) == 0
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
